mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{LoanArgs, PaymentArgs};

/// Fixed-rate loan amortization schedules
#[derive(Parser)]
#[command(
    name = "loansim",
    version,
    about = "Fixed-rate loan amortization schedules",
    long_about = "Derives the fixed monthly payment for an amortizing loan and \
                  simulates the month-by-month payoff schedule, including extra \
                  monthly payments and the resulting early-payoff projection."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the fixed monthly payment for a loan
    Payment(PaymentArgs),
    /// Simulate the full payoff schedule
    Simulate(LoanArgs),
    /// Emit only the per-period schedule rows (chart/CSV friendly)
    Schedule(LoanArgs),
    /// Print the payoff summary lines
    Summary(LoanArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Simulate(args) => commands::loan::run_simulate(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Version => {
            println!("loansim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
