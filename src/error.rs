use thiserror::Error;

/// Every failure the calculator can report. Computational variants are caught
/// at the component boundary and folded into the rendered outcome; only the
/// tool layer produces `Validation`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("security violation: {0}")]
    Security(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("malformed equation: {0}")]
    MalformedEquation(String),

    #[error("malformed statistics call: {0}")]
    StatisticsFormat(String),

    #[error("invalid input: {0}")]
    Validation(String),
}

impl CalcError {
    /// Stable discriminant for structured payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::Syntax(_) => "syntax_error",
            CalcError::Security(_) => "security_error",
            CalcError::DivisionByZero => "division_by_zero",
            CalcError::UnknownIdentifier(_) => "unknown_identifier",
            CalcError::Evaluation(_) => "evaluation_error",
            CalcError::MalformedEquation(_) => "malformed_equation",
            CalcError::StatisticsFormat(_) => "statistics_format_error",
            CalcError::Validation(_) => "validation_error",
        }
    }
}
