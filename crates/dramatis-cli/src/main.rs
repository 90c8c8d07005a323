#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use dramatis_core::{AnalysisError, timing};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "dramatis: character network analysis for literary texts",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit a per-stage timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format (defaults to pretty on a TTY, text otherwise).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (defaults to ./dramatis.toml, then the user config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Analyze a cast document",
        long_about = "Build the character graph, compute centrality, communities and layout, \
                      and print a summary.",
        after_help = "EXAMPLES:\n    # Summarize a cast\n    dramatis analyze cast.json\n\n    # Write the full report with a reproducible layout\n    dramatis analyze cast.json --output report.json --seed 7\n\n    # Weight by interaction lists instead of co-occurrence\n    dramatis analyze cast.json --weight-by interaction_frequency"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Rank characters by one metric",
        after_help = "EXAMPLES:\n    # Top 10 brokers\n    dramatis rank cast.json --metric betweenness\n\n    # Who talks most\n    dramatis rank cast.json --metric dialogue --top 3 --json"
    )]
    Rank(cmd::rank::RankArgs),

    #[command(
        about = "Write one report per weighting method",
        after_help = "EXAMPLES:\n    dramatis variations cast.json --output-dir outputs --seed 1"
    )]
    Variations(cmd::variations::VariationsArgs),

    #[command(about = "Generate shell completions")]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("DRAMATIS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "dramatis=debug,info"
        } else {
            "dramatis=info,warn"
        })
    });

    let format = env::var("DRAMATIS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let timing_enabled = cli.timing || timing::timing_enabled_from_env();
    timing::set_timing_enabled(timing_enabled);
    timing::clear_timings();

    let output = cli.output_mode();
    debug!(?output, "output mode resolved");

    let result = run(&cli, output);

    if timing_enabled {
        print_timing(output);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let cli_error = err
                .downcast_ref::<AnalysisError>()
                .map_or_else(|| CliError::new(format!("{err:#}")), CliError::from);
            if render_error(output, &cli_error).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let config = cmd::load_config(cli.config.as_deref(), &project_root)?;
    if cli.verbose {
        info!(weight_by = %config.weight_by, "verbose mode enabled");
    }

    match &cli.command {
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, config, output),
        Commands::Rank(args) => cmd::rank::run_rank(args, config, output),
        Commands::Variations(args) => cmd::variations::run_variations(args, config, output),
        Commands::Completions(_) => Ok(()),
    }
}

fn print_timing(output: OutputMode) {
    let report = timing::collect_report();
    if report.is_empty() {
        eprintln!("timing report: no samples recorded");
    } else if output.is_json() {
        eprintln!("{}", report.to_json());
    } else {
        eprintln!("timing report:");
        eprint!("{}", report.display_table());
    }
}
