//! Statement nodes and the top-level program

use super::expressions::Expression;
use crate::ast::NodeId;
use crate::lexer::QuoteStyle;
use fpr_common::SourceSpan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub node_id: NodeId,
    pub kind: StatementKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementKind {
    Import(ImportDeclaration),

    Variable(VariableDeclaration),

    Function(FunctionDeclaration),

    /// `export` in front of a declaration
    Export(Box<Statement>),

    Expression(Expression),

    Return(Option<Expression>),

    If {
        condition: Expression,
        then_stmt: Box<Statement>,
        else_stmt: Option<Box<Statement>>,
    },

    While {
        condition: Expression,
        body: Box<Statement>,
    },

    For {
        init: Option<Box<Statement>>, // variable declaration or expression statement
        condition: Option<Expression>,
        update: Option<Expression>,
        body: Box<Statement>,
    },

    Block(Vec<Statement>),

    Empty,
}

/// `import a, { b as c } from "m";`, `import * as ns from "m";` or `import "m";`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDeclaration {
    pub default_binding: Option<String>,
    pub namespace_binding: Option<String>,
    pub named: Vec<ImportSpecifier>,
    pub module: String,
    pub quote: QuoteStyle,
    /// Specifier text as written; `None` for synthesized imports
    pub raw_module: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: String,
}

impl ImportDeclaration {
    /// Every name this import binds in module scope
    pub fn local_names(&self) -> impl Iterator<Item = &str> {
        self.default_binding
            .as_deref()
            .into_iter()
            .chain(self.namespace_binding.as_deref())
            .chain(self.named.iter().map(|s| s.local.as_str()))
    }

    /// Import without bindings, evaluated only for its side effects
    pub fn is_side_effect_only(&self) -> bool {
        self.default_binding.is_none() && self.namespace_binding.is_none() && self.named.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationKeyword {
    Let,
    Const,
    Var,
}

impl DeclarationKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKeyword::Let => "let",
            DeclarationKeyword::Const => "const",
            DeclarationKeyword::Var => "var",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclaration {
    pub keyword: DeclarationKeyword,
    pub declarators: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub node_id: NodeId,
    pub name: String,
    pub type_annotation: Option<String>,
    pub initializer: Option<Expression>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: Option<String>,
}

/// One parsed source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub node_id: NodeId,
    pub file_name: String,
    pub statements: Vec<Statement>,
    /// First node id not used by any node in this tree
    pub next_node_id: NodeId,
    pub span: SourceSpan,
}

impl Program {
    pub fn imports(&self) -> impl Iterator<Item = &ImportDeclaration> {
        self.statements.iter().filter_map(|stmt| match &stmt.kind {
            StatementKind::Import(import) => Some(import),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_local_names() {
        let import = ImportDeclaration {
            default_binding: Some("Decimal".to_string()),
            namespace_binding: None,
            named: vec![ImportSpecifier {
                imported: "Numeric".to_string(),
                local: "Num".to_string(),
            }],
            module: "decimal.js".to_string(),
            quote: QuoteStyle::Double,
            raw_module: None,
        };
        let names: Vec<&str> = import.local_names().collect();
        assert_eq!(names, vec!["Decimal", "Num"]);
        assert!(!import.is_side_effect_only());
    }
}
