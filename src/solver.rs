use crate::ast::Evaluator;
use crate::error::CalcError;
use log::debug;
use regex::Regex;

const EPSILON: f64 = 1e-10;

/// Terminal outcome of a solve. The two degenerate cases are valid
/// mathematical results, not errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinearSolution {
    Unique(f64),
    NoSolution,
    InfinitelyMany,
}

/// Linear form of one equation side: `coefficient * variable + constant`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideTerms {
    pub coefficient: f64,
    pub constant: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub solution: LinearSolution,
    pub variable: String,
    pub steps: Vec<String>,
}

/// Solves a single-variable linear equation. The input must contain exactly
/// one `=`; each side goes through the term scanner and the combined form
/// `totalCoefficient * variable = totalConstant` decides the outcome.
pub fn solve_linear(
    equation: &str,
    variable: &str,
    evaluator: &Evaluator,
) -> Result<SolveOutcome, CalcError> {
    let equation = equation.trim();
    if equation.matches('=').count() != 1 {
        return Err(CalcError::MalformedEquation(
            "equation must contain exactly one '='".to_string(),
        ));
    }
    let (left, right) = equation.split_once('=').ok_or_else(|| {
        CalcError::MalformedEquation("equation must contain exactly one '='".to_string())
    })?;

    let left_terms = scan_side(left, variable, evaluator)?;
    let right_terms = scan_side(right, variable, evaluator)?;

    let total_coefficient = left_terms.coefficient - right_terms.coefficient;
    let total_constant = right_terms.constant - left_terms.constant;

    let (solution, verdict) = if total_coefficient.abs() < EPSILON {
        if total_constant.abs() < EPSILON {
            (
                LinearSolution::InfinitelyMany,
                "the equation has infinitely many solutions".to_string(),
            )
        } else {
            (
                LinearSolution::NoSolution,
                "the equation has no solution".to_string(),
            )
        }
    } else {
        let root = total_constant / total_coefficient;
        (LinearSolution::Unique(root), format!("{} = {}", variable, root))
    };
    debug!("solved '{}' for {}: {:?}", equation, variable, solution);

    let steps = vec![
        format!("equation: {}", equation),
        format!(
            "left side: {} * {} + {}",
            left_terms.coefficient, variable, left_terms.constant
        ),
        format!(
            "right side: {} * {} + {}",
            right_terms.coefficient, variable, right_terms.constant
        ),
        format!(
            "rearranged: ({} - {}) * {} = {} - {}",
            left_terms.coefficient,
            right_terms.coefficient,
            variable,
            right_terms.constant,
            left_terms.constant
        ),
        format!(
            "simplified: {} * {} = {}",
            total_coefficient, variable, total_constant
        ),
        format!("solution: {}", verdict),
    ];

    Ok(SolveOutcome {
        solution,
        variable: variable.to_string(),
        steps,
    })
}

/// Best-effort linear-term scanner. An optionally signed numeric coefficient
/// immediately followed by the variable name counts as a variable term; the
/// text left after removing variable terms is evaluated as the constant
/// remainder, and contributes zero when it does not evaluate. Products of two
/// variables, parenthesized variable expressions and implicit multiplication
/// are not extracted reliably.
fn scan_side(side: &str, variable: &str, evaluator: &Evaluator) -> Result<SideTerms, CalcError> {
    let compact: String = side.chars().filter(|c| !c.is_whitespace()).collect();

    let pattern = format!(r"([+-]?\d*\.?\d*){}", regex::escape(variable));
    let scanner = Regex::new(&pattern).map_err(|e| {
        CalcError::MalformedEquation(format!("cannot scan for variable '{}': {}", variable, e))
    })?;

    let mut coefficient = 0.0;
    for captures in scanner.captures_iter(&compact) {
        let raw = &captures[1];
        coefficient += match raw {
            "" | "+" => 1.0,
            "-" => -1.0,
            _ => raw.parse::<f64>().map_err(|_| {
                CalcError::MalformedEquation(format!("invalid coefficient '{}'", raw))
            })?,
        };
    }

    let remainder = scanner.replace_all(&compact, "");
    let constant = match remainder.as_ref() {
        "" | "+" | "-" => 0.0,
        rest => crate::evaluate_expression(rest, evaluator).unwrap_or(0.0),
    };
    debug!(
        "scanned '{}': coefficient {}, constant {}",
        compact, coefficient, constant
    );

    Ok(SideTerms {
        coefficient,
        constant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions;

    fn evaluator() -> Evaluator {
        let mut evaluator = Evaluator::new();
        functions::register_defaults(&mut evaluator);
        evaluator
    }

    fn solve(equation: &str) -> LinearSolution {
        solve_linear(equation, "x", &evaluator()).unwrap().solution
    }

    #[test]
    fn test_basic_linear_equation() {
        assert_eq!(solve("2x + 3 = 7"), LinearSolution::Unique(2.0));
        assert_eq!(solve("3 + 2x = 7"), LinearSolution::Unique(2.0));
        assert_eq!(solve("x = 5"), LinearSolution::Unique(5.0));
        assert_eq!(solve("5 = x"), LinearSolution::Unique(5.0));
    }

    #[test]
    fn test_round_trip_for_known_roots() {
        for (a, b) in [(2.0, 4.0), (0.5, -3.0), (-7.0, 14.0)] {
            let equation = format!("{}x + {} = 0", a, b);
            match solve_linear(&equation, "x", &evaluator()).unwrap().solution {
                LinearSolution::Unique(root) => assert!((root - (-b / a)).abs() < 1e-9),
                other => panic!("expected a unique root for '{}', got {:?}", equation, other),
            }
        }
    }

    #[test]
    fn test_bare_and_negated_variable_terms() {
        assert_eq!(solve("x + 1 = 2"), LinearSolution::Unique(1.0));
        assert_eq!(solve("-x = 5"), LinearSolution::Unique(-5.0));
        assert_eq!(solve("2x - x = 3"), LinearSolution::Unique(3.0));
    }

    #[test]
    fn test_variable_on_both_sides() {
        assert_eq!(solve("2x + 1 = x + 4"), LinearSolution::Unique(3.0));
    }

    #[test]
    fn test_degenerate_equations() {
        assert_eq!(solve("x = x"), LinearSolution::InfinitelyMany);
        assert_eq!(solve("x = x + 1"), LinearSolution::NoSolution);
        assert_eq!(solve("2x + 1 = 2x + 1"), LinearSolution::InfinitelyMany);
    }

    #[test]
    fn test_constant_remainder_goes_through_the_evaluator() {
        // the remainder is parsed and evaluated, never text-substituted, so
        // constants survive intact
        match solve("x + pi = 0") {
            LinearSolution::Unique(root) => {
                assert!((root + std::f64::consts::PI).abs() < 1e-9)
            }
            other => panic!("expected a unique root, got {:?}", other),
        }
        assert_eq!(solve("x = 2 * 3 + 1"), LinearSolution::Unique(7.0));
    }

    #[test]
    fn test_custom_variable_name() {
        let outcome = solve_linear("3k = 12", "k", &evaluator()).unwrap();
        assert_eq!(outcome.solution, LinearSolution::Unique(4.0));
        assert_eq!(outcome.variable, "k");
    }

    #[test]
    fn test_equals_count_is_enforced() {
        for input in ["2x + 3", "x == 3", "1 = x = 2"] {
            assert!(
                matches!(
                    solve_linear(input, "x", &evaluator()),
                    Err(CalcError::MalformedEquation(_))
                ),
                "input '{}' should be malformed",
                input
            );
        }
    }

    #[test]
    fn test_decimal_coefficients() {
        assert_eq!(solve("0.5x = 4"), LinearSolution::Unique(8.0));
        assert_eq!(solve("2.5x + 1.5 = 9"), LinearSolution::Unique(3.0));
    }

    #[test]
    fn test_unrecognized_terms_contribute_zero() {
        // the scanner is not an algebraic parser: a parenthesized variable
        // product leaves a remainder that fails to evaluate and silently
        // becomes zero, so only the bare variable term survives
        assert_eq!(solve("2(x) = 4"), LinearSolution::Unique(4.0));
    }

    #[test]
    fn test_steps_describe_the_rearrangement() {
        let outcome = solve_linear("2x + 3 = 7", "x", &evaluator()).unwrap();
        assert_eq!(outcome.steps.len(), 6);
        assert!(outcome.steps[0].contains("2x + 3 = 7"));
        assert!(outcome.steps[4].contains("2 * x = 4"));
        assert!(outcome.steps[5].contains("x = 2"));
    }
}
