use crate::ast::{validator, ASTNode};
use crate::error::CalcError;
use std::collections::HashMap;
use std::sync::Arc;

pub type Function = Arc<dyn Fn(&[f64]) -> Result<f64, CalcError> + Send + Sync>;

/// Reduces validated ASTs to numbers. Holds the two allow-lists: registered
/// functions and named constants. Both are filled once at startup and only
/// read afterwards, so a single instance can serve concurrent callers.
pub struct Evaluator {
    functions: HashMap<String, Function>,
    constants: HashMap<String, f64>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            constants: HashMap::new(),
        }
    }

    /// Registers a function with the evaluator.
    pub fn register_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&[f64]) -> Result<f64, CalcError> + Send + Sync + 'static,
    {
        self.functions.insert(name.to_string(), Arc::new(function));
    }

    /// Registers a named constant with the evaluator.
    pub fn register_constant(&mut self, name: &str, value: f64) {
        self.constants.insert(name.to_string(), value);
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn has_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Evaluates an `ASTNode`. Purely functional: arguments evaluate left to
    /// right, names resolve against the constant allow-list, and nothing is
    /// mutated.
    pub fn evaluate(&self, ast: &ASTNode) -> Result<f64, CalcError> {
        match ast {
            ASTNode::Number(n) => Ok(*n),

            ASTNode::Identifier(name) => {
                let bare = validator::unqualified(name)?;
                self.constants
                    .get(bare)
                    .copied()
                    .ok_or_else(|| CalcError::UnknownIdentifier(name.clone()))
            }

            ASTNode::UnaryOperation { operator, operand } => {
                Ok(operator.apply(self.evaluate(operand)?))
            }

            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = self.evaluate(left)?;
                let right_value = self.evaluate(right)?;
                operator.apply(left_value, right_value)
            }

            ASTNode::FunctionCall { name, args } => {
                let bare = validator::unqualified(name)?;
                let function = self.functions.get(bare).ok_or_else(|| {
                    CalcError::Evaluation(format!("function '{}' is not registered", name))
                })?;

                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.evaluate(arg)?);
                }
                function(&values)
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
