//! Compiler host integration
//!
//! A `CompilerHost` is how a compilation reaches source files and writes its
//! output. `TransformingHost` wraps any host and hands out rewritten trees
//! from `get_source_file`, so the rest of the pipeline sees precision-safe
//! code without knowing a transform ran.

use crate::error::TransformError;
use crate::transformer::Transformer;
use fpr_common::{CompilerError, Diagnostic, ErrorReporter, Severity};
use fpr_frontend::ast::Program;
use fpr_frontend::{Frontend, PrintOptions};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub trait CompilerHost {
    fn read_file(&self, file_name: &str) -> Result<String, CompilerError>;

    fn write_file(&mut self, file_name: &str, contents: &str) -> Result<(), CompilerError>;

    /// Load and parse a source file
    fn get_source_file(&mut self, file_name: &str) -> Result<Program, TransformError> {
        let source = self.read_file(file_name)?;
        Ok(Frontend::parse_source(&source, file_name)?)
    }

    /// Non-fatal diagnostics gathered while loading files since the last call
    fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Host backed by the local file system
#[derive(Debug, Clone, Default)]
pub struct FileSystemHost;

impl CompilerHost for FileSystemHost {
    fn read_file(&self, file_name: &str) -> Result<String, CompilerError> {
        fs::read_to_string(file_name).map_err(|e| CompilerError::IoError {
            message: format!("Cannot read file '{}': {}", file_name, e),
        })
    }

    fn write_file(&mut self, file_name: &str, contents: &str) -> Result<(), CompilerError> {
        if let Some(dir) = Path::new(file_name).parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(file_name, contents).map_err(|e| CompilerError::IoError {
            message: format!("Cannot write file '{}': {}", file_name, e),
        })
    }
}

/// Host keeping sources and outputs in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    files: BTreeMap<String, String>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file_name: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(file_name.into(), contents.into());
    }

    pub fn file(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(String::as_str)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl CompilerHost for InMemoryHost {
    fn read_file(&self, file_name: &str) -> Result<String, CompilerError> {
        self.files
            .get(file_name)
            .cloned()
            .ok_or_else(|| CompilerError::IoError {
                message: format!("Cannot read file '{}': not found", file_name),
            })
    }

    fn write_file(&mut self, file_name: &str, contents: &str) -> Result<(), CompilerError> {
        self.add_file(file_name, contents);
        Ok(())
    }
}

/// Host whose source files come back already rewritten
pub struct TransformingHost<H> {
    inner: H,
    transformer: Transformer,
    diagnostics: Vec<Diagnostic>,
}

impl<H: CompilerHost> TransformingHost<H> {
    pub fn new(inner: H, transformer: Transformer) -> Self {
        Self {
            inner,
            transformer,
            diagnostics: Vec::new(),
        }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: CompilerHost> CompilerHost for TransformingHost<H> {
    fn read_file(&self, file_name: &str) -> Result<String, CompilerError> {
        self.inner.read_file(file_name)
    }

    fn write_file(&mut self, file_name: &str, contents: &str) -> Result<(), CompilerError> {
        self.inner.write_file(file_name, contents)
    }

    fn get_source_file(&mut self, file_name: &str) -> Result<Program, TransformError> {
        let program = self.inner.get_source_file(file_name)?;
        let (program, report) = self.transformer.transform_program(program)?;
        debug!(
            "{}: serving rewritten tree ({} rewrites)",
            file_name, report.walk.rewritten
        );
        self.diagnostics
            .extend(report.import.diagnostic(&self.transformer.config().rules));
        Ok(program)
    }

    fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = self.inner.take_diagnostics();
        diagnostics.append(&mut self.diagnostics);
        diagnostics
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Directory for emitted files; next to each source when unset
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct EmitResult {
    pub emitted_files: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Nothing was written because errors were reported
    pub emit_skipped: bool,
}

impl EmitResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 0 on success, 1 when emit was skipped or a file failed to write
    pub fn exit_code(&self) -> i32 {
        if self.emit_skipped || self.has_errors() {
            1
        } else {
            0
        }
    }
}

/// One compilation over a set of root files
pub struct Compilation<'h, H> {
    host: &'h mut H,
    options: CompileOptions,
    reporter: ErrorReporter,
}

impl<'h, H: CompilerHost> Compilation<'h, H> {
    pub fn new(host: &'h mut H, options: CompileOptions) -> Self {
        Self {
            host,
            options,
            reporter: ErrorReporter::new(),
        }
    }

    /// Load every root file, then emit JavaScript if nothing failed
    pub fn compile(mut self, root_files: &[String]) -> EmitResult {
        let mut programs = Vec::with_capacity(root_files.len());
        for file_name in root_files {
            match self.host.get_source_file(file_name) {
                Ok(program) => programs.push(program),
                Err(err) => {
                    self.reporter.report(Diagnostic::from(&err));
                }
            }
            for diagnostic in self.host.take_diagnostics() {
                self.reporter.report(diagnostic);
            }
        }

        let output_names: Vec<String> = programs
            .iter()
            .map(|program| self.output_file_name(&program.file_name))
            .collect();
        self.check_output_collisions(&programs, &output_names);

        if self.reporter.has_errors() {
            info!("Skipping emit: {}", self.reporter.summary());
            return EmitResult {
                emitted_files: Vec::new(),
                diagnostics: self.reporter.into_diagnostics(),
                emit_skipped: true,
            };
        }

        let print_options = PrintOptions::javascript();
        let mut emitted_files = Vec::new();
        for (program, output_name) in programs.iter().zip(output_names) {
            let text = Frontend::print_program(program, &print_options);
            match self.host.write_file(&output_name, &text) {
                Ok(()) => {
                    debug!("Emitted {}", output_name);
                    emitted_files.push(output_name);
                }
                Err(err) => {
                    self.reporter.report(Diagnostic::from(&err));
                }
            }
        }

        EmitResult {
            emitted_files,
            diagnostics: self.reporter.into_diagnostics(),
            emit_skipped: false,
        }
    }

    /// Two roots emitting to the same path is an error
    fn check_output_collisions(&mut self, programs: &[Program], output_names: &[String]) {
        let mut writers: BTreeMap<&str, &str> = BTreeMap::new();
        for (program, output_name) in programs.iter().zip(output_names) {
            if let Some(first) = writers.insert(output_name, &program.file_name) {
                self.reporter.error(
                    format!(
                        "Cannot write file '{}' because both '{}' and '{}' emit it",
                        output_name, first, program.file_name
                    ),
                    None,
                );
            }
        }
    }

    fn output_file_name(&self, file_name: &str) -> String {
        let js = Path::new(file_name).with_extension("js");
        match (&self.options.out_dir, js.file_name()) {
            (Some(dir), Some(name)) => dir.join(name).to_string_lossy().into_owned(),
            _ => js.to_string_lossy().into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{ClassifyPolicy, TransformConfig};
    use fpr_frontend::SourcePrinter;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn transforming_host(files: &[(&str, &str)], policy: ClassifyPolicy) -> TransformingHost<InMemoryHost> {
        let mut host = InMemoryHost::new();
        for (name, contents) in files {
            host.add_file(*name, *contents);
        }
        let config = TransformConfig {
            policy,
            ..TransformConfig::default()
        };
        TransformingHost::new(host, Transformer::with_config(config))
    }

    #[test]
    fn test_source_file_is_rewritten() {
        let mut host = transforming_host(&[("src/tax.ts", "export const rate: number = 0.2 * 0.5;\n")], ClassifyPolicy::Passthrough);
        let program = host.get_source_file("src/tax.ts").unwrap();
        assert_eq!(program.file_name, "src/tax.ts");
        assert_eq!(
            Frontend::default().print(&program),
            "import Decimal from \"decimal.js\";\nexport const rate: number = new Decimal(0.2).times(0.5);\n"
        );
    }

    #[test]
    fn test_compile_emits_javascript() {
        let mut host = transforming_host(
            &[(
                "src/tax.ts",
                indoc! {"
                    export function tax(amount: number): number {
                        const share: number = 0.2 * 0.5;
                        return amount;
                    }
                "},
            )],
            ClassifyPolicy::Passthrough,
        );

        let result = Compilation::new(&mut host, CompileOptions::default()).compile(&["src/tax.ts".to_string()]);
        assert_eq!(result.exit_code(), 0);
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.emitted_files, vec!["src/tax.js".to_string()]);

        let expected = indoc! {r#"
            import Decimal from "decimal.js";
            export function tax(amount) {
                const share = new Decimal(0.2).times(0.5);
                return amount;
            }
        "#};
        assert_eq!(host.inner().file("src/tax.js"), Some(expected));
    }

    #[test]
    fn test_out_dir() {
        let mut host = transforming_host(&[("lib/a.ts", "let a = 1;\n")], ClassifyPolicy::Passthrough);
        let options = CompileOptions {
            out_dir: Some(PathBuf::from("dist")),
        };
        let result = Compilation::new(&mut host, options).compile(&["lib/a.ts".to_string()]);
        let expected = PathBuf::from("dist").join("a.js").to_string_lossy().into_owned();
        assert_eq!(result.emitted_files, vec![expected.clone()]);

        let memory = host.into_inner();
        let names: Vec<&str> = memory.file_names().collect();
        assert_eq!(names, vec![expected.as_str(), "lib/a.ts"]);
    }

    #[test]
    fn test_out_dir_collisions_skip_emit() {
        let mut host = transforming_host(
            &[("a/x.ts", "let a = 1;\n"), ("b/x.ts", "let b = 2;\n")],
            ClassifyPolicy::Passthrough,
        );
        let options = CompileOptions {
            out_dir: Some(PathBuf::from("dist")),
        };
        let result = Compilation::new(&mut host, options).compile(&["a/x.ts".to_string(), "b/x.ts".to_string()]);

        assert!(result.emit_skipped);
        assert_eq!(result.exit_code(), 1);
        let output = PathBuf::from("dist").join("x.js").to_string_lossy().into_owned();
        assert_eq!(
            result.diagnostics[0].to_string(),
            format!("Cannot write file '{}' because both 'a/x.ts' and 'b/x.ts' emit it", output)
        );
        assert_eq!(host.inner().file_names().count(), 2);
    }

    #[test]
    fn test_import_conflict_is_a_warning() {
        let mut host = transforming_host(
            &[("money.ts", "import Decimal from 'big-decimal';\nlet fee = 0.1 + 0.2;\n")],
            ClassifyPolicy::Passthrough,
        );
        let result = Compilation::new(&mut host, CompileOptions::default()).compile(&["money.ts".to_string()]);

        assert_eq!(result.exit_code(), 0);
        assert_eq!(result.error_count(), 0);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, Severity::Warning);
        assert!(result.diagnostics[0]
            .to_string()
            .starts_with("money.ts (1,1): 'Decimal' is already imported from 'big-decimal'"));
        assert_eq!(
            host.inner().file("money.js"),
            Some("import Decimal from 'big-decimal';\nlet fee = new Decimal(0.1).plus(0.2);\n")
        );
    }

    #[test]
    fn test_errors_skip_emit() {
        let mut host = transforming_host(
            &[
                ("good.ts", "let a = 1 + 2;\n"),
                ("bad.ts", "let b = price * 2;\nlet c = (;\n"),
            ],
            ClassifyPolicy::Strict,
        );
        let roots = vec!["good.ts".to_string(), "bad.ts".to_string(), "missing.ts".to_string()];
        let result = Compilation::new(&mut host, CompileOptions::default()).compile(&roots);

        assert!(result.emit_skipped);
        assert_eq!(result.exit_code(), 1);
        assert!(result.emitted_files.is_empty());
        assert!(host.inner().file("good.js").is_none());

        let rendered: Vec<String> = result.diagnostics.iter().map(|d| d.to_string()).collect();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].starts_with("bad.ts (2,"), "got {:?}", rendered[0]);
        assert_eq!(rendered[1], "Cannot read file 'missing.ts': not found");
    }

    #[test]
    fn test_strict_classification_is_reported_with_position() {
        let mut host = transforming_host(&[("bad.ts", "let b = price * 2;\n")], ClassifyPolicy::Strict);
        let result = Compilation::new(&mut host, CompileOptions::default()).compile(&["bad.ts".to_string()]);
        assert_eq!(result.exit_code(), 1);
        assert_eq!(
            result.diagnostics[0].to_string(),
            "bad.ts (1,9): Unsupported node kind: Identifier\n  Only numeric literals, arithmetic and calls can be converted to fixed point"
        );
    }
}
