//! corec-drv — CLI entry point.
//!
//! Wires a source path through the lexer/parser/emitter pipeline in
//! `corec-par` and `corec-gen`, matching `faxc-drv`'s `main`-wraps-`anyhow`
//! shape and `faxt`'s `clap`-derive/`tracing-subscriber` setup.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use corec_lex::Lexer;
use corec_util::SourceFile;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// corec — a single-pass compiler for the corec language.
#[derive(ClapParser, Debug)]
#[command(name = "corec")]
#[command(author, version, about = "Compiles a corec source file", long_about = None)]
struct Cli {
    /// Source file to compile.
    source: PathBuf,

    /// Output path for the emitted intermediate file.
    #[arg(short = 'o', long = "out", default_value = "a.out")]
    out: PathBuf,

    /// Emit human-readable comments in the generated output.
    #[arg(short, long)]
    debug: bool,

    /// Print the token stream instead of compiling.
    #[arg(long)]
    emit_tokens: bool,

    /// Print the declared global names instead of compiling.
    #[arg(long)]
    emit_symbols: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))
    }
    .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

fn run(cli: &Cli) -> Result<bool> {
    tracing::info!(path = %cli.source.display(), "reading source");
    let source = SourceFile::load(&cli.source)
        .with_context(|| format!("failed to read '{}'", cli.source.display()))?;

    if cli.emit_tokens {
        return emit_tokens(&source);
    }

    tracing::debug!("lexing and parsing");
    let output = corec_par::compile(&source, cli.debug);

    if cli.emit_symbols {
        for name in &output.global_names {
            println!("{name}");
        }
        return Ok(output.success);
    }

    for diagnostic in &output.diagnostics {
        eprintln!("{diagnostic}");
    }

    if output.success {
        tracing::info!(path = %cli.out.display(), "committing output");
        output
            .emitter
            .commit(&cli.out)
            .with_context(|| format!("failed to write '{}'", cli.out.display()))?;
    } else {
        tracing::warn!("compilation recorded errors; no output written");
    }

    Ok(output.success)
}

fn emit_tokens(source: &SourceFile) -> Result<bool> {
    let lexer = Lexer::new(source);
    for token in lexer {
        println!("{token}");
    }
    Ok(true)
}
