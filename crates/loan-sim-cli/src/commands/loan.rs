use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_sim_core::amortization::calendar;
use loan_sim_core::amortization::payment::{self, PaymentInput};
use loan_sim_core::amortization::schedule::{self, LoanParameters};
use loan_sim_core::amortization::summary;

use crate::input;

/// Arguments for payment derivation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual interest rate in percent (e.g. 5.0 for 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments shared by the schedule-producing subcommands
#[derive(Args)]
pub struct LoanArgs {
    /// Loan term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual interest rate in percent (e.g. 5.0 for 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Start date (YYYY-MM-DD); payments fall on month ends from here
    #[arg(long)]
    pub start_date: Option<String>,

    /// Extra payment applied entirely to principal each month
    #[arg(long, default_value = "0")]
    pub extra: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment_input: PaymentInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PaymentInput {
            years: args.years.ok_or("--years is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
        }
    };

    let result = payment::calculate_payment(&payment_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_simulate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = loan_parameters(&args)?;
    let result = schedule::simulate_loan(&params)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = loan_parameters(&args)?;
    let result = schedule::simulate_loan(&params)?;
    Ok(serde_json::to_value(&result.result.schedule)?)
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = loan_parameters(&args)?;
    let result = schedule::simulate_loan(&params)?;
    let summary = summary::summarize(&result.result);
    Ok(serde_json::to_value(summary)?)
}

/// Resolve simulation parameters from a JSON file, piped stdin, or flags.
fn loan_parameters(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return Ok(input::file::read_json(path)?);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }

    let start_date = args
        .start_date
        .as_deref()
        .ok_or("--start-date is required (or provide --input)")?;

    Ok(LoanParameters {
        years: args.years.ok_or("--years is required (or provide --input)")?,
        annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        start_date: calendar::parse_iso_date(start_date)?,
        extra_monthly_payment: args.extra,
    })
}
