//! Jander Compiler - semantic checker for LA programs
//!
//! Usage: janderc [OPTIONS] <input> <output>

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use jander_compiler::common::DiagnosticReporter;
use jander_compiler::driver::Pipeline;
use jander_compiler::frontend::FrontendConfig;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(ClapParser, Debug)]
#[command(name = "janderc")]
#[command(author = "Jander Compiler Team")]
#[command(version)]
#[command(about = "Lexical, syntactic and semantic checker for LA programs", long_about = None)]
struct Args {
    /// Input source file
    input: PathBuf,

    /// File that receives the diagnostics
    output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over the level picked by `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    tracing::info!(input = %filename, output = %args.output.display(), "compiling");

    let config = FrontendConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        verbose: args.verbose,
    };
    let output = Pipeline::new().compile_source(&source, &filename, &config, &reporter, file_id);

    output
        .write_to(&args.output)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    tracing::info!(lines = output.lines().len(), "output written");
    Ok(())
}
