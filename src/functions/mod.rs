pub mod basic;
pub mod trig;

use crate::ast::Evaluator;
use crate::error::CalcError;

/// Fills the evaluator's allow-lists: every function the grammar may call and
/// every named constant an expression may reference.
pub fn register_defaults(evaluator: &mut Evaluator) {
    basic::register(evaluator);
    trig::register(evaluator);
    register_constants(evaluator);
}

fn register_constants(evaluator: &mut Evaluator) {
    evaluator.register_constant("pi", std::f64::consts::PI);
    evaluator.register_constant("e", std::f64::consts::E);
    evaluator.register_constant("tau", std::f64::consts::TAU);
}

/// Arity guard for the single-argument functions.
pub(crate) fn unary(
    name: &str,
    args: &[f64],
    function: impl Fn(f64) -> f64,
) -> Result<f64, CalcError> {
    match args {
        [x] => Ok(function(*x)),
        _ => Err(CalcError::Evaluation(format!(
            "{} expects exactly one argument, got {}",
            name,
            args.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_the_allow_list() {
        let mut evaluator = Evaluator::new();
        register_defaults(&mut evaluator);

        for name in [
            "sin", "cos", "tan", "log", "log10", "sqrt", "abs", "round", "pow", "min", "max",
            "sum",
        ] {
            assert!(evaluator.has_function(name), "function '{}' missing", name);
        }
        for name in ["pi", "e", "tau"] {
            assert!(evaluator.has_constant(name), "constant '{}' missing", name);
        }
        assert!(!evaluator.has_function("len"));
        assert!(!evaluator.has_constant("phi"));
    }
}
