pub mod ast;
pub mod batch;
pub mod dispatch;
pub mod error;
pub mod functions;
pub mod outcome;
pub mod render;
pub mod resources;
pub mod solver;
pub mod statistics;
pub mod tool;

pub use dispatch::Calculator;
pub use error::CalcError;

use ast::{validator, Evaluator, Parser};

/// Runs one arithmetic expression through the whole safety pipeline:
/// denylist scan, parse, full-tree validation against the evaluator's
/// allow-lists, then evaluation.
pub fn evaluate_expression(expression: &str, evaluator: &Evaluator) -> Result<f64, CalcError> {
    validator::check_denylist(expression)?;
    let ast = Parser::parse_expression(expression)?;
    validator::validate(&ast, evaluator)?;
    evaluator.evaluate(&ast)
}
