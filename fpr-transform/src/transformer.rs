//! Source-to-source transform
//!
//! `Transformer` strings the pieces together for one file: parse, ensure
//! the precision import, walk, print. Loaders hold it as a `SourceTransform`.

use crate::error::TransformError;
use crate::imports::{ensure_precision_import, ImportOutcome};
use crate::rules::TransformConfig;
use crate::walker::{TreeWalker, WalkStats};
use fpr_frontend::ast::{NodeIdGenerator, Program};
use fpr_frontend::{Frontend, SourceParser, SourcePrinter};
use log::{debug, info};

/// A text-in, text-out module transform
pub trait SourceTransform {
    fn transform_source(&self, source: &str, file_name: &str) -> Result<String, TransformError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
    pub import: ImportOutcome,
    pub walk: WalkStats,
}

pub struct Transformer<P = Frontend, W = Frontend> {
    parser: P,
    printer: W,
    config: TransformConfig,
}

impl Transformer {
    /// Transformer using the bundled frontend for both parsing and printing
    pub fn with_config(config: TransformConfig) -> Self {
        Self::new(Frontend::default(), Frontend::default(), config)
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::with_config(TransformConfig::default())
    }
}

impl<P: SourceParser, W: SourcePrinter> Transformer<P, W> {
    pub fn new(parser: P, printer: W, config: TransformConfig) -> Self {
        Self {
            parser,
            printer,
            config,
        }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Rewrite an already parsed program
    pub fn transform_program(&self, mut program: Program) -> Result<(Program, TransformReport), TransformError> {
        let rules = &self.config.rules;
        let mut ids = NodeIdGenerator::starting_at(program.next_node_id);

        let import = ensure_precision_import(&mut program, rules, &mut ids);

        let mut walker = TreeWalker::new(rules, self.config.policy, ids);
        let mut program = walker.walk_program(program)?;
        let walk = walker.stats();
        program.next_node_id = walker.into_ids().peek();

        debug!(
            "{}: {} rewritten, {} dropped, {} left as written",
            program.file_name, walk.rewritten, walk.discarded, walk.passthrough
        );
        Ok((program, TransformReport { import, walk }))
    }

    pub fn parse_and_transform(&self, source: &str, file_name: &str) -> Result<Program, TransformError> {
        let program = self.parser.parse(source, file_name)?;
        let (program, _) = self.transform_program(program)?;
        Ok(program)
    }
}

impl<P: SourceParser, W: SourcePrinter> SourceTransform for Transformer<P, W> {
    fn transform_source(&self, source: &str, file_name: &str) -> Result<String, TransformError> {
        let program = self.parser.parse(source, file_name)?;
        let (program, report) = self.transform_program(program)?;
        info!("Transformed {} ({} rewrites)", file_name, report.walk.rewritten);
        Ok(self.printer.print(&program))
    }
}

/// Transform one module with the bundled frontend
pub fn transform_source(source: &str, file_name: &str, config: &TransformConfig) -> Result<String, TransformError> {
    Transformer::with_config(config.clone()).transform_source(source, file_name)
}
