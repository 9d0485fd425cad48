use crate::batch::BatchOutcome;
use crate::solver::{LinearSolution, SolveOutcome};
use crate::statistics::StatisticsOutcome;

/// Component-specific payload of a successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Computation {
    Arithmetic {
        value: f64,
    },
    Equation {
        solution: LinearSolution,
        variable: String,
    },
    Statistics {
        result: f64,
        data: Vec<f64>,
        count: usize,
    },
    Batch(BatchOutcome),
}

/// The result of one evaluation attempt: an operation label, the input it
/// ran on, the component payload and the ordered step trace. Produced fresh
/// per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome {
    pub operation: String,
    pub expression: String,
    pub computation: Computation,
    pub steps: Vec<String>,
}

impl CalculationOutcome {
    pub(crate) fn arithmetic(expression: &str, value: f64, steps: Vec<String>) -> Self {
        Self {
            operation: "mixed_expression".to_string(),
            expression: expression.to_string(),
            computation: Computation::Arithmetic { value },
            steps,
        }
    }

    pub(crate) fn equation(expression: &str, outcome: SolveOutcome) -> Self {
        Self {
            operation: "linear_equation".to_string(),
            expression: expression.to_string(),
            computation: Computation::Equation {
                solution: outcome.solution,
                variable: outcome.variable,
            },
            steps: outcome.steps,
        }
    }

    pub(crate) fn statistics(expression: &str, outcome: StatisticsOutcome) -> Self {
        let steps = vec![
            format!("data: {:?}", outcome.data),
            format!("count: {}", outcome.count),
            format!("operation: {}", outcome.operation),
            format!("result: {}", outcome.result),
        ];
        Self {
            operation: outcome.operation,
            expression: expression.to_string(),
            computation: Computation::Statistics {
                result: outcome.result,
                data: outcome.data,
                count: outcome.count,
            },
            steps,
        }
    }

    pub(crate) fn batch(expression: &str, outcome: BatchOutcome) -> Self {
        let steps = outcome
            .items
            .iter()
            .map(|item| match &item.result {
                Ok(value) => format!("{} => {}", item.expression, value),
                Err(error) => format!("{} => error: {}", item.expression, error),
            })
            .collect();
        Self {
            operation: "batch".to_string(),
            expression: expression.to_string(),
            computation: Computation::Batch(outcome),
            steps,
        }
    }
}
