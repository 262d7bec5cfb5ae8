mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::calculator::{GrowthArgs, InvestmentArgs, TrajectoryArgs};
use commands::report::ReportArgs;

/// Return-on-investment calculator
#[derive(Parser)]
#[command(
    name = "roi",
    version,
    about = "Return-on-investment calculator",
    long_about = "Compare what a principal grows to under simple interest, annual \
                  compounding, NPS / lumpsum / investment growth and a monthly SIP, \
                  with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Decimal places shown for amounts
    #[arg(long, default_value_t = 2, global = true)]
    decimals: u32,

    /// Log to stderr (-v debug, -vv trace); RUST_LOG applies otherwise
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Simple interest on a lump sum
    SimpleInterest(InvestmentArgs),
    /// Annually compounded interest on a lump sum
    CompoundInterest(InvestmentArgs),
    /// Lump-sum growth (NPS, lumpsum, investment)
    Growth(GrowthArgs),
    /// Systematic investment plan: the principal is invested every month
    Sip(InvestmentArgs),
    /// Year-wise SIP amount, one point per year
    Trajectory(TrajectoryArgs),
    /// Every plan at once, with the SIP growth curve
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dp = cli.decimals;
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::SimpleInterest(args) => commands::calculator::run_simple_interest(args, dp),
        Commands::CompoundInterest(args) => commands::calculator::run_compound_interest(args, dp),
        Commands::Growth(args) => commands::calculator::run_growth(args, dp),
        Commands::Sip(args) => commands::calculator::run_sip(args, dp),
        Commands::Trajectory(args) => commands::calculator::run_trajectory(args, dp),
        Commands::Report(args) => commands::report::run_report(args, dp),
        Commands::Version => {
            println!("roi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
