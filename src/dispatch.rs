use crate::ast::{validator, Evaluator, Parser};
use crate::error::CalcError;
use crate::outcome::CalculationOutcome;
use crate::{batch, functions, solver, statistics};
use log::debug;

/// Syntactic class of an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    LinearEquation,
    Batch,
    Statistics,
    Arithmetic,
}

/// Pure classification, no evaluation. First match wins, and equation
/// detection runs before batch detection, so an equation with a `;` in a
/// sub-clause ("2x=3;4") is still routed as one equation.
pub fn classify(input: &str) -> ExpressionKind {
    if input.contains('=') && input.chars().any(|c| c.is_ascii_alphabetic()) {
        ExpressionKind::LinearEquation
    } else if input.contains(';') {
        ExpressionKind::Batch
    } else if statistics::contains_statistics_call(input) {
        ExpressionKind::Statistics
    } else {
        ExpressionKind::Arithmetic
    }
}

/// The calculator core: one evaluator instance with populated allow-lists,
/// routing every input through the classifier to the matching component.
pub struct Calculator {
    evaluator: Evaluator,
}

impl Calculator {
    pub fn new() -> Self {
        let mut evaluator = Evaluator::new();
        functions::register_defaults(&mut evaluator);
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Classifies and runs one input. Computational failures come back as
    /// `Err`; batch segment failures stay isolated inside the batch outcome.
    pub fn run(&self, input: &str, variable: &str) -> Result<CalculationOutcome, CalcError> {
        let kind = classify(input);
        debug!("classified {:?}: {}", kind, input);
        match kind {
            ExpressionKind::LinearEquation => {
                let outcome = solver::solve_linear(input, variable, &self.evaluator)?;
                Ok(CalculationOutcome::equation(input, outcome))
            }
            ExpressionKind::Batch => Ok(CalculationOutcome::batch(input, batch::run(self, input))),
            ExpressionKind::Statistics => {
                let outcome = statistics::evaluate(input)?;
                Ok(CalculationOutcome::statistics(input, outcome))
            }
            ExpressionKind::Arithmetic => {
                let (value, steps) = self.run_arithmetic(input)?;
                Ok(CalculationOutcome::arithmetic(input, value, steps))
            }
        }
    }

    /// The arithmetic pipeline: denylist scan, parse, full-tree validation,
    /// then evaluation, with the step trace of each stage.
    pub(crate) fn run_arithmetic(&self, expression: &str) -> Result<(f64, Vec<String>), CalcError> {
        validator::check_denylist(expression)?;
        let ast = Parser::parse_expression(expression)?;
        validator::validate(&ast, &self.evaluator)?;
        let value = self.evaluator.evaluate(&ast)?;

        let steps = vec![
            format!("expression: {}", expression),
            format!("parsed: {:?}", ast),
            format!("result: {}", value),
        ];
        Ok((value, steps))
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
