mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::installment::InstallmentArgs;
use commands::mortgage::{MortgageArgs, MortgageCompareArgs};
use commands::price::ParsePriceArgs;
use commands::roi::RoiArgs;
use commands::CommandOutput;

/// Real-estate financial calculators
#[derive(Parser)]
#[command(
    name = "rca",
    version,
    about = "Installment, mortgage and rental-yield calculators",
    long_about = "Calculators for real-estate agents with exact whole-rouble money: \
                  installment plans with markup, annuity mortgages under the standard, \
                  family, IT and Far East programs, and short-term rental yield with a \
                  deposit baseline."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation details to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Installment plan: down payment plus equal monthly instalments
    Installment(InstallmentArgs),
    /// Annuity mortgage under one program
    Mortgage(MortgageArgs),
    /// Every mortgage program side by side, cheapest first
    MortgageCompare(MortgageCompareArgs),
    /// List the mortgage programs
    Programs,
    /// Short-term rental yield, payback and deposit baseline
    Roi(RoiArgs),
    /// Parse a free-text price such as "15 млн" or "850к"
    ParsePrice(ParsePriceArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
    /// The chat report
    Text,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("realty_calc_core=debug,rca=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<CommandOutput, Box<dyn std::error::Error>> = match cli.command {
        Commands::Installment(args) => commands::installment::run_installment(args),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::MortgageCompare(args) => commands::mortgage::run_mortgage_compare(args),
        Commands::Programs => commands::mortgage::run_programs(),
        Commands::Roi(args) => commands::roi::run_roi(args),
        Commands::ParsePrice(args) => commands::price::run_parse_price(args),
        Commands::Version => {
            println!("rca {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(out) => {
            output::format_output(&cli.output, &out);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
