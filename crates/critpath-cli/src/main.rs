//! critpath CLI - Critical Path Method scheduler
//!
//! Command-line interface for reading task tables, scheduling them and
//! rendering the result.

mod diagnostics;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use critpath_core::{Plan, Renderer, Scheduler};
use critpath_render::{DotRenderer, MermaidRenderer, TextRenderer};
use critpath_solver::{CpmSolver, SinkAnchor};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::diagnostics::{Diagnostic, ExitCode};
use crate::report::JsonRenderer;

#[derive(Parser)]
#[command(name = "critpath")]
#[command(author, version, about = "Critical path scheduling for task tables", long_about = None)]
struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a task table
    Check {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter (default: whitespace; `\t` or `tab` for tabs)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<char>,
    },

    /// Schedule a task table and render the result
    Schedule {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter (default: whitespace; `\t` or `tab` for tabs)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<char>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Late-finish anchor for tasks without successors
        #[arg(long, value_enum, default_value_t = Anchor::Own)]
        anchor: Anchor,
    },
}

impl Commands {
    fn file(&self) -> &Path {
        match self {
            Commands::Check { file, .. } | Commands::Schedule { file, .. } => file,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Mermaid,
    Dot,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Anchor {
    /// Each sink finishes at its own early finish
    Own,
    /// Every sink finishes at the project finish
    Project,
}

impl From<Anchor> for SinkAnchor {
    fn from(anchor: Anchor) -> Self {
        match anchor {
            Anchor::Own => SinkAnchor::OwnFinish,
            Anchor::Project => SinkAnchor::ProjectFinish,
        }
    }
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    match value {
        "\\t" | "tab" => Ok('\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(format!("expected a single character, got '{}'", value)),
            }
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Check { file, delimiter } => cmd_check(file, *delimiter, cli.quiet),
        Commands::Schedule {
            file,
            delimiter,
            format,
            output,
            anchor,
        } => cmd_schedule(file, *delimiter, *format, output.as_deref(), *anchor),
    };

    match result {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            let diagnostic = Diagnostic::from_error(&err, cli.command.file());
            let stderr = std::io::stderr();
            let _ = diagnostics::emit(&mut stderr.lock(), &diagnostic);
            ExitCode::Failure.into()
        }
    }
}

fn load(file: &Path, delimiter: Option<char>) -> Result<Plan> {
    let plan = critpath_parser::parse_file(file, delimiter)?;
    info!(file = %file.display(), tasks = plan.len(), "plan loaded");
    Ok(plan)
}

fn cmd_check(file: &Path, delimiter: Option<char>, quiet: bool) -> Result<()> {
    let plan = load(file, delimiter)?;
    if !quiet {
        println!(
            "{}: {} tasks, {} dependencies, {} sources, {} sinks",
            file.display(),
            plan.len(),
            plan.edges().count(),
            plan.sources().count(),
            plan.sinks().count()
        );
    }
    Ok(())
}

fn cmd_schedule(
    file: &Path,
    delimiter: Option<char>,
    format: Format,
    output: Option<&Path>,
    anchor: Anchor,
) -> Result<()> {
    let plan = load(file, delimiter)?;
    let schedule = CpmSolver::new()
        .with_anchor(anchor.into())
        .schedule(&plan)?;
    info!(
        project_finish = schedule.project_finish,
        critical = schedule.critical_path.len(),
        "plan scheduled"
    );

    let rendered = match format {
        Format::Text => TextRenderer::new().render(&plan, &schedule)?,
        Format::Mermaid => MermaidRenderer::new().render(&plan, &schedule)?,
        Format::Dot => DotRenderer::new().render(&plan, &schedule)?,
        Format::Json => JsonRenderer.render(&plan, &schedule)?,
    };

    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => print!("{}", rendered),
    }
    Ok(())
}
