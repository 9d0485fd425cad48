use crate::error::CalcError;

pub mod evaluator;
pub mod parser;
pub mod validator;

pub use evaluator::{Evaluator, Function};
pub use parser::ExpressionParser as Parser;

/// Expression tree produced by the parser. Immutable once built; owned by the
/// parse that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    Identifier(String),
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<ASTNode>,
    },
    BinaryOperation {
        left: Box<ASTNode>,
        operator: BinaryOperator,
        right: Box<ASTNode>,
    },
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Negate,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Plus => operand,
            UnaryOperator::Negate => -operand,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Negate => "-",
        }
    }
}

impl TryFrom<&str> for UnaryOperator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(UnaryOperator::Plus),
            "-" => Ok(UnaryOperator::Negate),
            _ => Err(CalcError::Syntax(format!("unknown unary operator: {}", value))),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Power,
}

impl BinaryOperator {
    /// Applies the operator. `/`, `//` and `%` fail on an exactly-zero right
    /// operand; `**` lets NaN and infinity propagate.
    pub fn apply(&self, left: f64, right: f64) -> Result<f64, CalcError> {
        match self {
            BinaryOperator::Add => Ok(left + right),
            BinaryOperator::Subtract => Ok(left - right),
            BinaryOperator::Multiply => Ok(left * right),
            BinaryOperator::Divide => {
                if right == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            BinaryOperator::FloorDivide => {
                if right == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok((left / right).floor())
                }
            }
            // floored modulo, so the result carries the sign of the divisor
            BinaryOperator::Modulo => {
                if right == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(left - right * (left / right).floor())
                }
            }
            BinaryOperator::Power => Ok(left.powf(right)),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::FloorDivide => "//",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Power => "**",
        }
    }
}

impl TryFrom<&str> for BinaryOperator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(BinaryOperator::Add),
            "-" => Ok(BinaryOperator::Subtract),
            "*" => Ok(BinaryOperator::Multiply),
            "/" => Ok(BinaryOperator::Divide),
            "//" => Ok(BinaryOperator::FloorDivide),
            "%" => Ok(BinaryOperator::Modulo),
            "**" => Ok(BinaryOperator::Power),
            _ => Err(CalcError::Syntax(format!("unknown operator: {}", value))),
        }
    }
}
