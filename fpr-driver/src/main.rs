//! Fixed-Point Rewriter Driver
//!
//! `fpr transform` prints rewritten TypeScript; `fpr compile` runs the
//! rewrite inside a compilation and emits JavaScript.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fpr_transform::{
    ClassifyPolicy, CompileOptions, Compilation, FileSystemHost, SourceTransform, TransformConfig,
    Transformer, TransformingHost,
};
use log::{debug, LevelFilter};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fpr")]
#[command(about = "Rewrite floating-point arithmetic into arbitrary-precision decimal calls")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RuleArgs {
    /// JSON file with rewrite rules and policy
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail a file when arithmetic has an operand that cannot be converted
    #[arg(long)]
    strict: bool,
}

impl RuleArgs {
    fn load(&self) -> Result<TransformConfig> {
        let mut config = match &self.config {
            Some(path) => TransformConfig::load(path)
                .with_context(|| format!("loading rewrite config {}", path.display()))?,
            None => TransformConfig::default(),
        };
        if self.strict {
            config.policy = ClassifyPolicy::Strict;
        }
        debug!("Rewrite policy: {:?}", config.policy);
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite sources and emit JavaScript
    Compile {
        /// Root source files
        #[arg(required = true)]
        files: Vec<String>,

        /// Directory for emitted files (defaults to next to each source)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Print rewritten TypeScript
    Transform {
        /// Source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file (defaults to stdout; only with a single input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Compile { files, out_dir, rules } => compile(&files, out_dir, &rules),
        Commands::Transform { files, output, rules } => transform(&files, output, &rules).map(|()| 0),
    };

    match result {
        Ok(0) => ExitCode::SUCCESS,
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn compile(files: &[String], out_dir: Option<PathBuf>, rules: &RuleArgs) -> Result<u8> {
    let transformer = Transformer::with_config(rules.load()?);
    let mut host = TransformingHost::new(FileSystemHost, transformer);

    let result = Compilation::new(&mut host, CompileOptions { out_dir }).compile(files);
    for diagnostic in &result.diagnostics {
        eprintln!("{}", diagnostic);
    }
    for file in &result.emitted_files {
        debug!("Wrote {}", file);
    }

    if result.emit_skipped {
        eprintln!("Emit skipped: {} error(s)", result.error_count());
    }
    Ok(u8::try_from(result.exit_code()).unwrap_or(1))
}

fn transform(files: &[PathBuf], output: Option<PathBuf>, rules: &RuleArgs) -> Result<()> {
    if output.is_some() && files.len() > 1 {
        anyhow::bail!("--output can only be used with a single input file");
    }

    let transformer = Transformer::with_config(rules.load()?);
    let mut rewritten = String::new();
    for path in files {
        let source = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let file_name = path.to_string_lossy();
        let text = transformer
            .transform_source(&source, &file_name)
            .with_context(|| format!("transforming {}", path.display()))?;
        rewritten.push_str(&text);
    }

    match output {
        Some(path) => fs::write(&path, rewritten).with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", rewritten),
    }
    Ok(())
}
