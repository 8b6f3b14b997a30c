//! Rewrite rule tables and transform configuration
//!
//! Rules are plain data handed by reference to every rewriter. The defaults
//! target `Decimal` from `decimal.js`; a JSON file can point the rewriter at
//! another precision type with the same method-call shape.

use crate::error::TransformError;
use fpr_frontend::BinaryOp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// The binary operators that have a precision-method counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl ArithmeticOp {
    pub fn from_binary_op(op: BinaryOp) -> Option<Self> {
        match op {
            BinaryOp::Add => Some(ArithmeticOp::Add),
            BinaryOp::Sub => Some(ArithmeticOp::Sub),
            BinaryOp::Mul => Some(ArithmeticOp::Mul),
            BinaryOp::Div => Some(ArithmeticOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorRule {
    pub operator: ArithmeticOp,
    /// Instance method called on the left operand, e.g. `plus`
    pub method: String,
}

/// `namespace.method(...)` becomes `<type>.<target>(...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRule {
    pub namespace: String,
    pub method: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteRules {
    /// Local name the precision type is bound to
    pub type_name: String,
    /// Module specifier the precision type is imported from
    pub module: String,
    pub operators: Vec<OperatorRule>,
    pub calls: Vec<CallRule>,
}

impl Default for RewriteRules {
    fn default() -> Self {
        let operators = [
            (ArithmeticOp::Div, "div"),
            (ArithmeticOp::Mul, "times"),
            (ArithmeticOp::Add, "plus"),
            (ArithmeticOp::Sub, "minus"),
        ]
        .into_iter()
        .map(|(operator, method)| OperatorRule {
            operator,
            method: method.to_string(),
        })
        .collect();

        let calls = ["sin", "cos", "tan"]
            .into_iter()
            .map(|method| CallRule {
                namespace: "Math".to_string(),
                method: method.to_string(),
                target: method.to_string(),
            })
            .collect();

        Self {
            type_name: "Decimal".to_string(),
            module: "decimal.js".to_string(),
            operators,
            calls,
        }
    }
}

impl RewriteRules {
    /// Precision method for an arithmetic operator, if the operator is mapped
    pub fn method_for(&self, op: ArithmeticOp) -> Option<&str> {
        self.operators
            .iter()
            .find(|rule| rule.operator == op)
            .map(|rule| rule.method.as_str())
    }

    /// Static precision method replacing `namespace.method`
    pub fn call_target(&self, namespace: &str, method: &str) -> Option<&str> {
        self.calls
            .iter()
            .find(|rule| rule.namespace == namespace && rule.method == method)
            .map(|rule| rule.target.as_str())
    }

    /// Reject tables that would print as invalid source
    pub fn validate(&self) -> Result<(), TransformError> {
        if !is_identifier(&self.type_name) {
            return Err(TransformError::config(format!(
                "type name '{}' is not an identifier",
                self.type_name
            )));
        }
        if self.module.is_empty() {
            return Err(TransformError::config("module specifier is empty"));
        }

        for (i, rule) in self.operators.iter().enumerate() {
            if !is_identifier(&rule.method) {
                return Err(TransformError::config(format!(
                    "method '{}' for operator '{}' is not an identifier",
                    rule.method, rule.operator
                )));
            }
            if self.operators[..i].iter().any(|r| r.operator == rule.operator) {
                return Err(TransformError::config(format!(
                    "operator '{}' is mapped more than once",
                    rule.operator
                )));
            }
        }

        for rule in &self.calls {
            for name in [&rule.namespace, &rule.method, &rule.target] {
                if !is_identifier(name) {
                    return Err(TransformError::config(format!(
                        "call rule {}.{} -> {}: '{}' is not an identifier",
                        rule.namespace, rule.method, rule.target, name
                    )));
                }
            }
        }

        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// What happens when an operand inside arithmetic cannot be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifyPolicy {
    /// Leave the whole arithmetic expression as written
    #[default]
    Passthrough,
    /// Fail the file with `UnsupportedNodeKind`
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub rules: RewriteRules,
    pub policy: ClassifyPolicy,
}

impl TransformConfig {
    pub fn from_json(text: &str) -> Result<Self, TransformError> {
        let config: TransformConfig =
            serde_json::from_str(text).map_err(|e| TransformError::config(e.to_string()))?;
        config.rules.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, TransformError> {
        let text = fs::read_to_string(path)
            .map_err(|e| TransformError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }
}
