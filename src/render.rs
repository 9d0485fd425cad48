use crate::batch::BatchItem;
use crate::error::CalcError;
use crate::outcome::{CalculationOutcome, Computation};
use crate::solver::LinearSolution;
use serde::Serialize;
use serde_json::{json, Value};

/// Fixed bound on the serialized response size. Applied after the full
/// result exists, never while computing it.
pub const MAX_RESPONSE_CHARS: usize = 25_000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StructuredResponse {
    operation: String,
    expression: String,
    result: Value,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch_results: Option<Vec<BatchEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    truncated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    truncation_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry {
    expression: String,
    operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorEntry>,
}

impl From<&BatchItem> for BatchEntry {
    fn from(item: &BatchItem) -> Self {
        Self {
            expression: item.expression.clone(),
            operation: item.operation.clone(),
            result: item.result.as_ref().ok().copied(),
            error: item.result.as_ref().err().map(ErrorEntry::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ErrorEntry {
    kind: String,
    message: String,
}

impl From<&CalcError> for ErrorEntry {
    fn from(error: &CalcError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Renders the structured payload, truncating oversized list content after
/// the fact.
pub fn structured(
    expression: &str,
    outcome: &Result<CalculationOutcome, CalcError>,
    timestamp: &str,
) -> Value {
    let mut response = match outcome {
        Ok(outcome) => success_response(outcome, timestamp),
        Err(error) => failure_response(expression, error, timestamp),
    };

    let serialized = serde_json::to_string(&response).unwrap_or_default();
    if serialized.chars().count() > MAX_RESPONSE_CHARS {
        truncate_structured(&mut response);
    }

    serde_json::to_value(&response).unwrap_or(Value::Null)
}

fn success_response(outcome: &CalculationOutcome, timestamp: &str) -> StructuredResponse {
    let mut response = StructuredResponse {
        operation: outcome.operation.clone(),
        expression: outcome.expression.clone(),
        result: Value::Null,
        timestamp: timestamp.to_string(),
        steps: Some(outcome.steps.clone()),
        data: None,
        batch_results: None,
        error: None,
        truncated: None,
        truncation_message: None,
    };

    match &outcome.computation {
        Computation::Arithmetic { value } => response.result = json!(value),
        Computation::Equation { solution, .. } => {
            response.result = match solution {
                LinearSolution::Unique(root) => json!(root),
                LinearSolution::NoSolution => json!({ "solution": "no_solution" }),
                LinearSolution::InfinitelyMany => {
                    json!({ "solution": "infinitely_many_solutions" })
                }
            }
        }
        Computation::Statistics { result, data, .. } => {
            response.result = json!(result);
            response.data = Some(data.clone());
        }
        Computation::Batch(batch) => {
            response.result = json!(batch.successes);
            response.batch_results = Some(batch.items.iter().map(BatchEntry::from).collect());
        }
    }

    response
}

fn failure_response(expression: &str, error: &CalcError, timestamp: &str) -> StructuredResponse {
    StructuredResponse {
        operation: "error".to_string(),
        expression: expression.to_string(),
        // the sentinel for a failed computation is an empty list, since JSON
        // cannot carry NaN
        result: json!([]),
        timestamp: timestamp.to_string(),
        steps: None,
        data: None,
        batch_results: None,
        error: Some(ErrorEntry::from(error)),
        truncated: None,
        truncation_message: None,
    }
}

fn truncate_structured(response: &mut StructuredResponse) {
    if let Value::Array(values) = &mut response.result {
        values.truncate(values.len() / 2);
    }
    if let Some(entries) = &mut response.batch_results {
        entries.truncate(entries.len() / 2);
    }
    if let Some(steps) = &mut response.steps {
        steps.truncate(steps.len() / 2);
    }
    response.truncated = Some(true);
    response.truncation_message = Some(format!(
        "response exceeded {} characters; long lists were cut to their first half",
        MAX_RESPONSE_CHARS
    ));
}

/// Renders the Markdown report, keeping the first half of its lines when the
/// full text exceeds the size cap.
pub fn markdown(
    expression: &str,
    outcome: &Result<CalculationOutcome, CalcError>,
    timestamp: &str,
) -> String {
    let full = match outcome {
        Ok(outcome) => success_markdown(outcome, timestamp),
        Err(error) => failure_markdown(expression, error, timestamp),
    };

    if full.chars().count() > MAX_RESPONSE_CHARS {
        truncate_markdown(&full)
    } else {
        full
    }
}

fn success_markdown(outcome: &CalculationOutcome, timestamp: &str) -> String {
    let mut report = String::from("# Calculation Result\n\n");
    report.push_str(&format!("**Expression:** `{}`\n", outcome.expression));
    report.push_str(&format!("**Operation:** {}\n", outcome.operation));
    report.push_str(&format!("**Result:** {}\n", result_line(outcome)));

    if let Computation::Batch(batch) = &outcome.computation {
        report.push_str("\n## Batch Results\n\n");
        for (index, item) in batch.items.iter().enumerate() {
            match &item.result {
                Ok(value) => {
                    report.push_str(&format!("{}. `{}` = {}\n", index + 1, item.expression, value))
                }
                Err(error) => report.push_str(&format!(
                    "{}. `{}` failed: {}\n",
                    index + 1,
                    item.expression,
                    error
                )),
            }
        }
    }

    report.push_str("\n## Steps\n\n");
    for (index, step) in outcome.steps.iter().enumerate() {
        report.push_str(&format!("{}. {}\n", index + 1, step));
    }

    report.push_str(&format!("\n**Timestamp:** {}\n", timestamp));
    report
}

fn result_line(outcome: &CalculationOutcome) -> String {
    match &outcome.computation {
        Computation::Arithmetic { value } => value.to_string(),
        Computation::Equation { solution, variable } => match solution {
            LinearSolution::Unique(root) => format!("{} = {}", variable, root),
            LinearSolution::NoSolution => "no solution".to_string(),
            LinearSolution::InfinitelyMany => "infinitely many solutions".to_string(),
        },
        Computation::Statistics { result, .. } => result.to_string(),
        Computation::Batch(batch) => format!("{:?}", batch.successes),
    }
}

fn failure_markdown(expression: &str, error: &CalcError, timestamp: &str) -> String {
    let mut report = String::from("# Calculation Result\n\n");
    report.push_str(&format!("**Expression:** `{}`\n\n", expression));
    report.push_str("## Error\n\n");
    report.push_str(&format!("**Kind:** {}\n", error.kind()));
    report.push_str(&format!("**Message:** {}\n", error));
    report.push_str(&format!("\n**Timestamp:** {}\n", timestamp));
    report
}

fn truncate_markdown(full: &str) -> String {
    let lines: Vec<&str> = full.lines().collect();
    let mut report = lines[..lines.len() / 2].join("\n");
    report.push_str(&format!(
        "\n\n*... truncated: the full response exceeded {} characters*\n",
        MAX_RESPONSE_CHARS
    ));
    report
}
