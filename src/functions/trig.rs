use crate::ast::Evaluator;
use crate::error::CalcError;
use crate::functions::unary;

pub fn register(evaluator: &mut Evaluator) {
    evaluator.register_function("sin", |args| unary("sin", args, f64::sin));
    evaluator.register_function("cos", |args| unary("cos", args, f64::cos));
    evaluator.register_function("tan", |args| unary("tan", args, f64::tan));
    evaluator.register_function("log", log);
    evaluator.register_function("log10", |args| unary("log10", args, f64::log10));
}

/// Natural logarithm, or `log(x, base)` with an explicit base.
fn log(args: &[f64]) -> Result<f64, CalcError> {
    match args {
        [x] => Ok(x.ln()),
        [x, base] => Ok(x.log(*base)),
        _ => Err(CalcError::Evaluation(format!(
            "log expects one or two arguments, got {}",
            args.len()
        ))),
    }
}
