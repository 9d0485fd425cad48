use crate::ast::{ASTNode, Evaluator};
use crate::error::CalcError;
use log::debug;

/// Substrings that reject an input outright, before parsing. Defense in
/// depth on top of the AST walk, not a substitute for it.
pub const DENIED_SUBSTRINGS: [&str; 6] = ["import", "exec", "eval", "open", "file", "__"];

/// The single permitted name qualifier: `math.sqrt` and `math.pi` resolve
/// like their bare forms, every other dotted name is rejected.
pub const QUALIFIED_PREFIX: &str = "math";

/// Scans the raw text for denylisted substrings, case-insensitively.
pub fn check_denylist(raw: &str) -> Result<(), CalcError> {
    let lowered = raw.to_lowercase();
    for keyword in DENIED_SUBSTRINGS {
        if lowered.contains(keyword) {
            return Err(CalcError::Security(format!(
                "expression contains forbidden keyword '{}'",
                keyword
            )));
        }
    }
    Ok(())
}

/// Strips the permitted qualifier from a name, rejecting any other prefix.
pub(crate) fn unqualified(name: &str) -> Result<&str, CalcError> {
    match name.split_once('.') {
        None => Ok(name),
        Some((prefix, rest)) if prefix == QUALIFIED_PREFIX => Ok(rest),
        Some(_) => Err(CalcError::Security(format!(
            "disallowed qualified name '{}'",
            name
        ))),
    }
}

/// Walks the full tree and accepts only literals, arithmetic operations,
/// calls to allow-listed functions with recursively valid arguments, and
/// references to allow-listed names. Runs to completion before any
/// evaluation starts.
pub fn validate(node: &ASTNode, evaluator: &Evaluator) -> Result<(), CalcError> {
    match node {
        ASTNode::Number(_) => Ok(()),
        ASTNode::Identifier(name) => {
            let bare = unqualified(name)?;
            if evaluator.has_constant(bare) || evaluator.has_function(bare) {
                Ok(())
            } else {
                debug!("rejecting identifier '{}'", name);
                Err(CalcError::Security(format!(
                    "identifier '{}' is not allow-listed",
                    name
                )))
            }
        }
        ASTNode::UnaryOperation { operand, .. } => validate(operand, evaluator),
        ASTNode::BinaryOperation { left, right, .. } => {
            validate(left, evaluator)?;
            validate(right, evaluator)
        }
        ASTNode::FunctionCall { name, args } => {
            let bare = unqualified(name)?;
            if !evaluator.has_function(bare) {
                debug!("rejecting call to '{}'", name);
                return Err(CalcError::Security(format!(
                    "function '{}' is not allow-listed",
                    name
                )));
            }
            for arg in args {
                validate(arg, evaluator)?;
            }
            Ok(())
        }
    }
}
