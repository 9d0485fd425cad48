use crate::dispatch::{classify, Calculator, ExpressionKind};
use crate::error::CalcError;
use crate::statistics;
use log::debug;
use rayon::prelude::*;

/// One segment of a batch: its own dispatch, result and step trace. A failed
/// segment carries its error without affecting its neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub expression: String,
    pub operation: String,
    pub result: Result<f64, CalcError>,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub items: Vec<BatchItem>,
    /// Values of the successful segments only, in input order.
    pub successes: Vec<f64>,
}

/// Splits the input on `;`, drops empty segments, and evaluates the rest
/// independently. Segments run on the rayon pool; the ordered collect
/// reassembles them in input order, so the outcome is indistinguishable from
/// sequential execution.
pub fn run(calculator: &Calculator, input: &str) -> BatchOutcome {
    let segments: Vec<&str> = input
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();
    debug!("batch of {} segment(s)", segments.len());

    let items: Vec<BatchItem> = segments
        .par_iter()
        .map(|segment| evaluate_segment(calculator, segment))
        .collect();

    let successes = items
        .iter()
        .filter_map(|item| item.result.as_ref().ok().copied())
        .collect();

    BatchOutcome { items, successes }
}

// A segment that reaches this point cannot hold `=` (the whole input would
// have been routed as an equation) or `;`, so only the statistics and
// arithmetic routes remain.
fn evaluate_segment(calculator: &Calculator, segment: &str) -> BatchItem {
    match classify(segment) {
        ExpressionKind::Statistics => match statistics::evaluate(segment) {
            Ok(outcome) => BatchItem {
                expression: segment.to_string(),
                operation: outcome.operation.clone(),
                result: Ok(outcome.result),
                steps: vec![
                    format!("data: {:?}", outcome.data),
                    format!("result: {}", outcome.result),
                ],
            },
            Err(error) => BatchItem {
                expression: segment.to_string(),
                operation: "statistics".to_string(),
                result: Err(error),
                steps: Vec::new(),
            },
        },
        _ => match calculator.run_arithmetic(segment) {
            Ok((value, steps)) => BatchItem {
                expression: segment.to_string(),
                operation: "mixed_expression".to_string(),
                result: Ok(value),
                steps,
            },
            Err(error) => BatchItem {
                expression: segment.to_string(),
                operation: "mixed_expression".to_string(),
                result: Err(error),
                steps: Vec::new(),
            },
        },
    }
}
