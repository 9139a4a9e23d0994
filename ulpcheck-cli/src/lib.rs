#![warn(missing_docs)]
//! ulpcheck CLI Library
//!
//! This module provides the command line front end of ulpcheck test binaries.
//! Use `ulpcheck::run()` (or `ulpcheck_cli::run()`) as the whole body of
//! `main` to run every `#[unittest]` linked into the binary.
//!
//! # Example
//!
//! ```ignore
//! use ulpcheck::prelude::*;
//!
//! #[unittest]
//! fn sqrt_of_four(ctx: &mut TestContext) -> TestResult {
//!     fuzzy_compare!(ctx, 4.0f64.sqrt(), 2.0);
//!     Ok(())
//! }
//!
//! fn main() {
//!     ulpcheck::run()
//! }
//! ```

mod config;
mod executor;
mod planner;

pub use config::*;
pub use executor::{Runner, Verdict, distance_summary, pass_line};
pub use planner::{ExecutionPlan, build_plan};

use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ulpcheck_core::{Registry, TestContext};
use ulpcheck_report::{Console, OutputStyle, PlotSink, RunSummary, StdoutConsole};

/// ulpcheck CLI arguments
#[derive(Parser, Debug, Default)]
#[command(name = "ulpcheck")]
#[command(version, about = "ulpcheck - unit tests with ULP-aware comparisons")]
pub struct Cli {
    /// Run only the test with exactly this name
    #[arg(long, value_name = "NAME")]
    pub only: Option<String>,

    /// Report maximal and mean ULP distance for every test
    #[arg(long)]
    pub maxdist: bool,

    /// Write reference/distance pairs of every fuzzy comparison to this file
    #[arg(long, value_name = "PATH")]
    pub plotdist: Option<PathBuf>,

    /// Editor-friendly `file:line: error:` diagnostics
    #[arg(long, visible_alias = "single-line")]
    pub vim: bool,

    /// List tests without running them
    #[arg(long)]
    pub list: bool,

    /// Colour mode
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: discover ulpcheck.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Effective settings after merging configuration and command line
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Exact-name filter
    pub only: Option<String>,
    /// Diagnostic layout
    pub style: OutputStyle,
    /// Whether to emit ANSI colours
    pub color: bool,
    /// Distance instrumentation
    pub instrumentation: bool,
    /// Plot file
    pub plot: Option<PathBuf>,
    /// Silence the panic hook while tests run
    pub quiet_panics: bool,
}

impl RunSettings {
    /// Merge `config` with `cli`; command line flags win
    pub fn resolve(cli: &Cli, config: &UlpcheckConfig) -> Self {
        let style = if cli.vim {
            OutputStyle::SingleLine
        } else {
            config.output.style
        };
        let color = cli
            .color
            .unwrap_or(config.output.color)
            .resolve(std::io::stdout().is_terminal());

        Self {
            only: cli.only.clone().or_else(|| config.runner.only.clone()),
            style,
            color,
            instrumentation: cli.maxdist || config.instrumentation.max_distance,
            plot: cli
                .plotdist
                .clone()
                .or_else(|| config.instrumentation.plot.clone()),
            quiet_panics: config.runner.quiet_panics,
        }
    }
}

/// Run every `#[unittest]` in the binary and exit with the failure count
pub fn run() -> ! {
    run_registry(Registry::discover())
}

/// Run the tests of `registry` and exit with the failure count
///
/// Parses the process arguments. A setup error (unreadable configuration,
/// plot file that cannot be created) exits with status 1 before any test runs.
pub fn run_registry(registry: Registry) -> ! {
    let cli = Cli::parse();
    match run_with_cli(cli, &registry) {
        Ok(summary) => std::process::exit(summary.exit_code()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Run with already parsed arguments, printing to stdout
pub fn run_with_cli(cli: Cli, registry: &Registry) -> anyhow::Result<RunSummary> {
    run_with_console(cli, registry, Box::new(StdoutConsole))
}

/// Run with already parsed arguments, printing to `console`
pub fn run_with_console(
    cli: Cli,
    registry: &Registry,
    mut console: Box<dyn Console>,
) -> anyhow::Result<RunSummary> {
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => UlpcheckConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => UlpcheckConfig::discover().unwrap_or_default(),
    };
    let settings = RunSettings::resolve(&cli, &config);
    tracing::debug!(?settings, "resolved settings");

    if let Err(e) = registry.validate() {
        tracing::warn!("{}", e);
    }

    let plan = build_plan(registry, settings.only.as_deref());
    if settings.only.is_some() && plan.is_empty() {
        tracing::warn!("no test is named {:?}", settings.only);
    }

    if cli.list {
        list_tests(&plan, console.as_mut());
        console.flush();
        return Ok(RunSummary::default());
    }

    colored::control::set_override(settings.color);

    let mut ctx = TestContext::new(console)
        .with_style(settings.style)
        .with_color(settings.color)
        .with_instrumentation(settings.instrumentation);
    if let Some(path) = &settings.plot {
        let sink = PlotSink::create(path)
            .with_context(|| format!("failed to open plot file {}", path.display()))?;
        ctx = ctx.with_plot(sink);
    }

    let mut runner = Runner::new(ctx).quiet_panics(settings.quiet_panics);
    Ok(runner.run(&plan))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ulpcheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ulpcheck=warn"))
    };
    // A subscriber may already be installed by an earlier run in this process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn list_tests(plan: &ExecutionPlan<'_>, console: &mut dyn Console) {
    console.write_line("ulpcheck plan:");
    for descriptor in &plan.descriptors {
        let line = match descriptor.location() {
            Some(location) => format!("├── {} ({})", descriptor.name(), location),
            None => format!("├── {}", descriptor.name()),
        };
        console.write_line(&line);
    }
    console.write_line(&format!("{} tests found.", plan.len()));
}
