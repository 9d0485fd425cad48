use crate::ast::{ASTNode, BinaryOperator, UnaryOperator};
use crate::error::CalcError;
use log::debug;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "expression.pest"] // Link to the grammar file
pub struct ExpressionParser;

impl ExpressionParser {
    pub fn parse_expression(input: &str) -> Result<ASTNode, CalcError> {
        debug!("parsing expression: {}", input);
        let parse_result = ExpressionParser::parse(Rule::expression, input)
            .map_err(|e| CalcError::Syntax(e.to_string()))?
            .next()
            .ok_or_else(|| CalcError::Syntax("empty parse result".to_string()))?;

        let root = parse_result
            .into_inner()
            .next()
            .ok_or_else(|| CalcError::Syntax("missing expression body".to_string()))?;
        Self::build_add_expression(root)
    }

    fn build_add_expression(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_mul_expression(pairs.next().unwrap())?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::PLUS => BinaryOperator::Add,
                Rule::MINUS => BinaryOperator::Subtract,
                _ => {
                    return Err(CalcError::Syntax(format!(
                        "unexpected additive operator: {:?}",
                        operator_pair.as_rule()
                    )))
                }
            };

            let right = Self::build_mul_expression(pairs.next().unwrap())?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_mul_expression(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut pairs = pair.into_inner();
        let mut node = Self::build_unary_expression(pairs.next().unwrap())?;

        while let Some(operator_pair) = pairs.next() {
            let operator = match operator_pair.as_rule() {
                Rule::STAR => BinaryOperator::Multiply,
                Rule::SLASH => BinaryOperator::Divide,
                Rule::FLOORDIV => BinaryOperator::FloorDivide,
                Rule::PERCENT => BinaryOperator::Modulo,
                _ => {
                    return Err(CalcError::Syntax(format!(
                        "unexpected multiplicative operator: {:?}",
                        operator_pair.as_rule()
                    )))
                }
            };

            let right = Self::build_unary_expression(pairs.next().unwrap())?;
            node = ASTNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    // Signs stack, so `--2` is allowed; the innermost sign applies first.
    fn build_unary_expression(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut pairs = pair.into_inner();
        let mut operators = Vec::new();

        let mut current = pairs.next().unwrap();
        while current.as_rule() != Rule::power_expression {
            operators.push(match current.as_rule() {
                Rule::PLUS => UnaryOperator::Plus,
                Rule::MINUS => UnaryOperator::Negate,
                _ => {
                    return Err(CalcError::Syntax(format!(
                        "unexpected sign: {:?}",
                        current.as_rule()
                    )))
                }
            });
            current = pairs.next().unwrap();
        }

        let mut node = Self::build_power_expression(current)?;
        for operator in operators.into_iter().rev() {
            node = ASTNode::UnaryOperation {
                operator,
                operand: Box::new(node),
            };
        }

        Ok(node)
    }

    // `**` binds tighter than any sign on its left and is right-associative:
    // the exponent is a full unary expression, so `2 ** 3 ** 2` is 2 ** (3 ** 2).
    fn build_power_expression(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut pairs = pair.into_inner();
        let base = Self::build_primary_expression(pairs.next().unwrap())?;

        match pairs.next() {
            None => Ok(base),
            Some(operator_pair) if operator_pair.as_rule() == Rule::POW => {
                let exponent = Self::build_unary_expression(pairs.next().unwrap())?;
                Ok(ASTNode::BinaryOperation {
                    left: Box::new(base),
                    operator: BinaryOperator::Power,
                    right: Box::new(exponent),
                })
            }
            Some(other) => Err(CalcError::Syntax(format!(
                "unexpected power operator: {:?}",
                other.as_rule()
            ))),
        }
    }

    fn build_primary_expression(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        match pair.as_rule() {
            Rule::number => {
                // the grammar only admits digit runs, which always parse
                let value = pair.as_str().parse::<f64>().unwrap();
                Ok(ASTNode::Number(value))
            }
            Rule::name_reference => Ok(ASTNode::Identifier(pair.as_str().to_string())),
            Rule::group => Self::build_add_expression(pair.into_inner().next().unwrap()),
            Rule::function_call => Self::build_function_call(pair),
            _ => Err(CalcError::Syntax(format!(
                "unexpected rule in primary expression: {:?}",
                pair.as_rule()
            ))),
        }
    }

    fn build_function_call(pair: Pair<Rule>) -> Result<ASTNode, CalcError> {
        let mut inner = pair.into_inner();
        let name = inner.next().unwrap().as_str().to_string();
        let args = inner
            .next()
            .unwrap()
            .into_inner()
            .map(Self::build_add_expression)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("parsed call to '{}' with {} argument(s)", name, args.len());
        Ok(ASTNode::FunctionCall { name, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(value: f64) -> Box<ASTNode> {
        Box::new(ASTNode::Number(value))
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(
            ExpressionParser::parse_expression("42").unwrap(),
            ASTNode::Number(42.0)
        );
        assert_eq!(
            ExpressionParser::parse_expression("3.25").unwrap(),
            ASTNode::Number(3.25)
        );
        assert_eq!(
            ExpressionParser::parse_expression(".5").unwrap(),
            ASTNode::Number(0.5)
        );
    }

    #[test]
    fn test_additive_precedence() {
        let ast = ExpressionParser::parse_expression("2 + 3 * 4").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: number(2.0),
            operator: BinaryOperator::Add,
            right: Box::new(ASTNode::BinaryOperation {
                left: number(3.0),
                operator: BinaryOperator::Multiply,
                right: number(4.0),
            }),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        let ast = ExpressionParser::parse_expression("(2 + 3) * 4").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::BinaryOperation {
                left: number(2.0),
                operator: BinaryOperator::Add,
                right: number(3.0),
            }),
            operator: BinaryOperator::Multiply,
            right: number(4.0),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_power_is_right_associative() {
        let ast = ExpressionParser::parse_expression("2 ** 3 ** 2").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: number(2.0),
            operator: BinaryOperator::Power,
            right: Box::new(ASTNode::BinaryOperation {
                left: number(3.0),
                operator: BinaryOperator::Power,
                right: number(2.0),
            }),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_sign_binds_looser_than_power() {
        let ast = ExpressionParser::parse_expression("-2 ** 2").unwrap();
        let expected = ASTNode::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand: Box::new(ASTNode::BinaryOperation {
                left: number(2.0),
                operator: BinaryOperator::Power,
                right: number(2.0),
            }),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_signed_exponent() {
        let ast = ExpressionParser::parse_expression("2 ** -1").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: number(2.0),
            operator: BinaryOperator::Power,
            right: Box::new(ASTNode::UnaryOperation {
                operator: UnaryOperator::Negate,
                operand: number(1.0),
            }),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_floor_division_and_modulo() {
        let ast = ExpressionParser::parse_expression("7 // 2 % 3").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::BinaryOperation {
                left: number(7.0),
                operator: BinaryOperator::FloorDivide,
                right: number(2.0),
            }),
            operator: BinaryOperator::Modulo,
            right: number(3.0),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_function_call_with_arguments() {
        let ast = ExpressionParser::parse_expression("pow(2, 3 + 1)").unwrap();
        let expected = ASTNode::FunctionCall {
            name: "pow".to_string(),
            args: vec![
                ASTNode::Number(2.0),
                ASTNode::BinaryOperation {
                    left: number(3.0),
                    operator: BinaryOperator::Add,
                    right: number(1.0),
                },
            ],
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_qualified_name() {
        let ast = ExpressionParser::parse_expression("math.sqrt(2) + math.pi").unwrap();
        let expected = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::FunctionCall {
                name: "math.sqrt".to_string(),
                args: vec![ASTNode::Number(2.0)],
            }),
            operator: BinaryOperator::Add,
            right: Box::new(ASTNode::Identifier("math.pi".to_string())),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_stacked_signs() {
        let ast = ExpressionParser::parse_expression("--2").unwrap();
        let expected = ASTNode::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand: Box::new(ASTNode::UnaryOperation {
                operator: UnaryOperator::Negate,
                operand: number(2.0),
            }),
        };
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_empty_argument_list_is_rejected() {
        assert!(matches!(
            ExpressionParser::parse_expression("sqrt()"),
            Err(CalcError::Syntax(_))
        ));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        for input in ["(2 + 3", "2 + 3)", "sqrt(4", "pow(2, 3"] {
            assert!(
                matches!(
                    ExpressionParser::parse_expression(input),
                    Err(CalcError::Syntax(_))
                ),
                "input '{}' should fail to parse, but it succeeded",
                input
            );
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            ExpressionParser::parse_expression(""),
            Err(CalcError::Syntax(_))
        ));
    }

    #[test]
    fn test_malformed_operator_runs() {
        for input in ["2 +", "* 3", "2 * / 3", "2 ** ** 3", "1 , 2"] {
            assert!(
                matches!(
                    ExpressionParser::parse_expression(input),
                    Err(CalcError::Syntax(_))
                ),
                "input '{}' should fail to parse, but it succeeded",
                input
            );
        }
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        for input in ["2 + 3 extra", "2 3", "pi pi"] {
            assert!(
                matches!(
                    ExpressionParser::parse_expression(input),
                    Err(CalcError::Syntax(_))
                ),
                "input '{}' should fail to parse, but it succeeded",
                input
            );
        }
    }

    #[test]
    fn test_spaced_star_pair_is_not_power() {
        // `* *` never merges into `**`
        assert!(ExpressionParser::parse_expression("2 * * 3").is_err());
    }

    #[test]
    fn test_excess_whitespace() {
        let spaced = ExpressionParser::parse_expression("2     +   3  *    4").unwrap();
        let tight = ExpressionParser::parse_expression("2+3*4").unwrap();
        assert_eq!(spaced, tight);
    }
}
