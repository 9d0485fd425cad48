use crate::dispatch::Calculator;
use crate::error::CalcError;
use crate::render;
use chrono::Local;
use log::info;
use serde_json::Value;

pub const MAX_EXPRESSION_CHARS: usize = 1000;
pub const MAX_VARIABLE_CHARS: usize = 10;

/// How the caller wants the outcome rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Markdown,
    Structured,
}

/// Input of the `calculate` operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculateRequest {
    pub expression: String,
    pub variable: String,
    pub response_format: ResponseFormat,
}

impl CalculateRequest {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            variable: "x".to_string(),
            response_format: ResponseFormat::default(),
        }
    }

    pub fn variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    pub fn format(mut self, response_format: ResponseFormat) -> Self {
        self.response_format = response_format;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolResponse {
    Markdown(String),
    Structured(Value),
}

impl ToolResponse {
    pub fn as_markdown(&self) -> Option<&str> {
        match self {
            ToolResponse::Markdown(text) => Some(text),
            ToolResponse::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ToolResponse::Markdown(_) => None,
            ToolResponse::Structured(payload) => Some(payload),
        }
    }
}

/// The `calculate` tool operation. Precondition violations surface as
/// validation errors without touching the evaluator; computational failures
/// are folded into the rendered payload instead of propagating.
pub fn calculate(calculator: &Calculator, request: &CalculateRequest) -> ToolResponse {
    let timestamp = Local::now().to_rfc3339();
    let outcome = validate_request(request).and_then(|expression| {
        info!("calculate: {}", expression);
        calculator.run(&expression, &request.variable)
    });

    let expression = request.expression.trim();
    match request.response_format {
        ResponseFormat::Markdown => {
            ToolResponse::Markdown(render::markdown(expression, &outcome, &timestamp))
        }
        ResponseFormat::Structured => {
            ToolResponse::Structured(render::structured(expression, &outcome, &timestamp))
        }
    }
}

fn validate_request(request: &CalculateRequest) -> Result<String, CalcError> {
    let expression = request.expression.trim();
    if expression.is_empty() {
        return Err(CalcError::Validation("expression must not be empty".to_string()));
    }
    if expression.chars().count() > MAX_EXPRESSION_CHARS {
        return Err(CalcError::Validation(format!(
            "expression exceeds {} characters",
            MAX_EXPRESSION_CHARS
        )));
    }

    let variable = &request.variable;
    if variable.is_empty()
        || variable.chars().count() > MAX_VARIABLE_CHARS
        || !is_identifier(variable)
    {
        return Err(CalcError::Validation(format!(
            "variable '{}' is not a valid identifier of 1-{} characters",
            variable, MAX_VARIABLE_CHARS
        )));
    }

    Ok(expression.to_string())
}

fn is_identifier(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
