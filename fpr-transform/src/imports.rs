//! Precision type import management

use crate::rules::RewriteRules;
use fpr_common::{Diagnostic, SourceLocation, SourceSpan};
use fpr_frontend::ast::{ImportDeclaration, NodeIdGenerator, Program, Statement, StatementKind};
use fpr_frontend::QuoteStyle;
use log::{debug, warn};

/// What `ensure_precision_import` did to a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    AlreadyPresent,
    Added,
    /// The type's local name is bound by an import from another module
    NameTaken { module: String, location: SourceLocation },
}

impl ImportOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, ImportOutcome::Added)
    }

    /// Warning for a compilation when the import could not be added
    pub fn diagnostic(&self, rules: &RewriteRules) -> Option<Diagnostic> {
        match self {
            ImportOutcome::NameTaken { module, location } => Some(
                Diagnostic::warning(
                    format!(
                        "'{}' is already imported from '{}'; rewritten code will use that binding",
                        rules.type_name, module
                    ),
                    Some(location.clone()),
                )
                .with_note(format!("Expected an import from '{}'", rules.module)),
            ),
            ImportOutcome::AlreadyPresent | ImportOutcome::Added => None,
        }
    }
}

/// Does `import` bind the precision type from its module?
fn binds_precision_type(import: &ImportDeclaration, rules: &RewriteRules) -> bool {
    import.module == rules.module && import.local_names().any(|name| name == rules.type_name)
}

/// The import statement from some other module that already takes the
/// precision type's local name
fn conflicting_import<'p>(program: &'p Program, rules: &RewriteRules) -> Option<(&'p ImportDeclaration, &'p SourceSpan)> {
    program.statements.iter().find_map(|stmt| match &stmt.kind {
        StatementKind::Import(import)
            if import.module != rules.module && import.local_names().any(|name| name == rules.type_name) =>
        {
            Some((import, &stmt.span))
        }
        _ => None,
    })
}

pub fn has_precision_import(program: &Program, rules: &RewriteRules) -> bool {
    program.imports().any(|import| binds_precision_type(import, rules))
}

/// Prepend `import <type> from "<module>";` unless the program already has it
///
/// Running it again on its own output adds nothing.
pub fn ensure_precision_import(program: &mut Program, rules: &RewriteRules, ids: &mut NodeIdGenerator) -> ImportOutcome {
    if has_precision_import(program, rules) {
        debug!("{}: '{}' already imported", program.file_name, rules.type_name);
        return ImportOutcome::AlreadyPresent;
    }

    if let Some((existing, span)) = conflicting_import(program, rules) {
        warn!(
            "{}: '{}' is already imported from '{}', not adding an import from '{}'",
            program.file_name, rules.type_name, existing.module, rules.module
        );
        return ImportOutcome::NameTaken {
            module: existing.module.clone(),
            location: span.start.clone(),
        };
    }

    let import = ImportDeclaration {
        default_binding: Some(rules.type_name.clone()),
        namespace_binding: None,
        named: Vec::new(),
        module: rules.module.clone(),
        quote: QuoteStyle::Double,
        raw_module: None,
    };
    program.statements.insert(
        0,
        Statement {
            node_id: ids.next(),
            kind: StatementKind::Import(import),
            span: SourceSpan::synthesized(),
        },
    );
    debug!("{}: added import of '{}'", program.file_name, rules.module);
    ImportOutcome::Added
}
