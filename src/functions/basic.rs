use crate::ast::Evaluator;
use crate::error::CalcError;
use crate::functions::unary;

pub fn register(evaluator: &mut Evaluator) {
    evaluator.register_function("sqrt", |args| unary("sqrt", args, f64::sqrt));
    evaluator.register_function("abs", |args| unary("abs", args, f64::abs));
    evaluator.register_function("round", |args| unary("round", args, f64::round));
    evaluator.register_function("pow", pow);
    evaluator.register_function("min", min);
    evaluator.register_function("max", max);
    evaluator.register_function("sum", sum);
}

fn pow(args: &[f64]) -> Result<f64, CalcError> {
    match args {
        [base, exponent] => Ok(base.powf(*exponent)),
        _ => Err(CalcError::Evaluation(format!(
            "pow expects exactly two arguments, got {}",
            args.len()
        ))),
    }
}

// min/max/sum take any number of arguments; the grammar guarantees at least
// one, so the folds never see an empty slice.

fn min(args: &[f64]) -> Result<f64, CalcError> {
    Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
}

fn max(args: &[f64]) -> Result<f64, CalcError> {
    Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

fn sum(args: &[f64]) -> Result<f64, CalcError> {
    Ok(args.iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow() {
        assert_eq!(pow(&[2.0, 8.0]).unwrap(), 256.0);
        assert!(pow(&[2.0]).is_err());
        assert!(pow(&[2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn test_variadic_folds() {
        assert_eq!(min(&[3.0, -1.0, 2.0]).unwrap(), -1.0);
        assert_eq!(max(&[3.0, -1.0, 2.0]).unwrap(), 3.0);
        assert_eq!(sum(&[1.0, 2.0, 3.5]).unwrap(), 6.5);
        assert_eq!(min(&[4.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_unary_guard() {
        assert_eq!(unary("sqrt", &[9.0], f64::sqrt).unwrap(), 3.0);
        assert!(unary("sqrt", &[9.0, 2.0], f64::sqrt).is_err());
    }
}
