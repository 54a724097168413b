//! Presentation-boundary views over a simulation: chart-ready parallel
//! series and the formatted summary lines a dashboard renders.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::SimulationResult;
use crate::types::Money;

/// Parallel series for charting: one value per schedule entry, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSeries {
    /// Month-end payment dates.
    pub dates: Vec<NaiveDate>,
    /// Principal component per payment.
    pub principal_paid: Vec<Money>,
    /// Interest component per payment.
    pub interest_paid: Vec<Money>,
    /// Balance remaining after each payment.
    pub remaining_balance: Vec<Money>,
}

/// The four summary lines of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    /// e.g. "30 years and 0 months"
    pub payoff_duration: String,
    /// e.g. "$637,550.93"
    pub total_paid: String,
    /// e.g. "$1,771.51"
    pub monthly_payment: String,
    /// Final payment date, ISO formatted.
    pub payoff_date: String,
}

/// Split a schedule into parallel series suitable for plotting.
pub fn chart_series(result: &SimulationResult) -> ScheduleSeries {
    let len = result.schedule.len();
    let mut series = ScheduleSeries {
        dates: Vec::with_capacity(len),
        principal_paid: Vec::with_capacity(len),
        interest_paid: Vec::with_capacity(len),
        remaining_balance: Vec::with_capacity(len),
    };

    for entry in &result.schedule {
        series.dates.push(entry.date);
        series.principal_paid.push(entry.principal_paid);
        series.interest_paid.push(entry.interest_paid);
        series.remaining_balance.push(entry.remaining_balance);
    }

    series
}

/// Render the summary scalars of a simulation.
pub fn summarize(result: &SimulationResult) -> LoanSummary {
    LoanSummary {
        payoff_duration: format!(
            "{} years and {} months",
            result.years_elapsed, result.months_remainder
        ),
        total_paid: format_currency(result.total_paid),
        monthly_payment: format_currency(result.effective_monthly_payment),
        payoff_date: result.payoff_date.format("%Y-%m-%d").to_string(),
    }
}

/// Simple dollar formatting: cent rounding and comma grouping.
/// 1234567.891 becomes "$1,234,567.89".
pub fn format_currency(amount: Money) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if cents.is_sign_negative() { "-" } else { "" };
    let abs = cents.abs();
    let whole = abs.trunc();
    let fraction = ((abs - whole) * dec!(100)).to_u32().unwrap_or(0);

    let digits = whole.normalize().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{fraction:02}")
}
