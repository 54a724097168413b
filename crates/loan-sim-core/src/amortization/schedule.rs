//! Amortization schedule simulation.
//!
//! Simulates the month-by-month payoff of a fixed-rate loan: interest and
//! principal split per period, balance reduction, and early payoff when
//! extra monthly payments are applied. All math in `rust_decimal::Decimal`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{calendar, payment};
use crate::error::LoanSimError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanSimResult;

/// Positive percent rates below this look like decimal-form slips (0.05
/// passed where 5.0 was meant).
const PERCENT_FORM_FLOOR: Decimal = dec!(1);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// One simulation run's immutable inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Loan term in years.
    pub years: u32,
    /// Annual interest rate in percent (5.0 = 5%).
    pub annual_rate_pct: Rate,
    /// Loan principal.
    pub principal: Money,
    /// Loan start date; payments fall on month ends from this month on.
    pub start_date: NaiveDate,
    /// Additional amount applied entirely to principal each month.
    #[serde(default)]
    pub extra_monthly_payment: Money,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One elapsed month of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    /// Period number (0-indexed).
    pub period: u32,
    /// Month-end payment date.
    pub date: NaiveDate,
    /// Balance remaining after this payment.
    pub remaining_balance: Money,
    /// Principal component of this payment.
    pub principal_paid: Money,
    /// Interest component of this payment.
    pub interest_paid: Money,
    /// Total paid this period.
    pub total_payment: Money,
}

/// Full simulation output, recomputed wholesale per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Month-by-month payment breakdown, chronological.
    pub schedule: Vec<PaymentScheduleEntry>,
    /// Whole years until payoff.
    pub years_elapsed: u32,
    /// Months beyond the whole years.
    pub months_remainder: u32,
    /// Sum of all payments made.
    pub total_paid: Money,
    /// Sum of all interest paid.
    pub total_interest: Money,
    /// Fixed monthly payment absent extra payments.
    pub minimum_payment: Money,
    /// Minimum payment plus the extra monthly payment.
    pub effective_monthly_payment: Money,
    /// Date of the final payment.
    pub payoff_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the payoff schedule for a fixed-rate loan.
pub fn simulate_loan(
    params: &LoanParameters,
) -> LoanSimResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();

    let (output, warnings) = compute_schedule(params)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Amortization Schedule",
        params,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

fn compute_schedule(params: &LoanParameters) -> LoanSimResult<(SimulationResult, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();
    validate_parameters(params)?;

    if params.annual_rate_pct > Decimal::ZERO && params.annual_rate_pct < PERCENT_FORM_FLOOR {
        warnings.push(format!(
            "Annual rate {}% is below 1%; rates are percent units (5.0 = 5%)",
            params.annual_rate_pct
        ));
    }

    let minimum =
        payment::minimum_payment(params.years, params.annual_rate_pct, params.principal)?;
    let monthly_rate = payment::monthly_rate(params.annual_rate_pct);
    let total_periods = params.years * 12;
    let dates = calendar::payment_dates(params.start_date, total_periods as usize)?;

    let mut balance = params.principal;
    let mut schedule = Vec::with_capacity(total_periods as usize);
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for period in 0..total_periods {
        let interest_paid = balance * monthly_rate;
        let mut principal_paid = (minimum - interest_paid) + params.extra_monthly_payment;

        // The last scheduled period retires the balance exactly; this also
        // clamps any overpayment from extra payments in earlier periods.
        if principal_paid > balance || period + 1 == total_periods {
            principal_paid = balance;
        }

        let total_payment = principal_paid + interest_paid;
        balance -= principal_paid;

        total_paid += total_payment;
        total_interest += interest_paid;

        schedule.push(PaymentScheduleEntry {
            period,
            date: dates[period as usize],
            remaining_balance: balance,
            principal_paid,
            interest_paid,
            total_payment,
        });

        // Early payoff once extra payments exhaust the balance
        if balance <= Decimal::ZERO {
            break;
        }
    }

    let last = schedule.last().ok_or_else(|| LoanSimError::InvalidInput {
        field: "years".into(),
        reason: "Simulation produced no periods".into(),
    })?;
    let payoff_date = last.date;
    let periods = schedule.len() as u32;

    Ok((
        SimulationResult {
            years_elapsed: periods / 12,
            months_remainder: periods % 12,
            total_paid,
            total_interest,
            minimum_payment: minimum,
            effective_monthly_payment: minimum + params.extra_monthly_payment,
            payoff_date,
            schedule,
        },
        warnings,
    ))
}

fn validate_parameters(params: &LoanParameters) -> LoanSimResult<()> {
    if params.years == 0 {
        return Err(LoanSimError::InvalidInput {
            field: "years".into(),
            reason: "Loan term must be at least one year".into(),
        });
    }
    if params.principal <= Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if params.annual_rate_pct < Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if params.extra_monthly_payment < Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "extra_monthly_payment".into(),
            reason: "Extra monthly payment cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_params() -> LoanParameters {
        LoanParameters {
            years: 10,
            annual_rate_pct: dec!(0),
            principal: dec!(12000),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            extra_monthly_payment: Decimal::ZERO,
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let out = simulate_loan(&base_params()).unwrap();
        let result = &out.result;
        assert_eq!(result.schedule.len(), 120);
        assert_eq!(result.minimum_payment, dec!(100));
        assert_eq!(result.total_paid, dec!(12000));
        assert_eq!(result.total_interest, Decimal::ZERO);
        assert_eq!(result.schedule[119].remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_early_payoff_break() {
        let params = LoanParameters {
            extra_monthly_payment: dec!(100),
            ..base_params()
        };
        let out = simulate_loan(&params).unwrap();
        // 200/month against 12000 pays off in 60 periods
        assert_eq!(out.result.schedule.len(), 60);
        assert_eq!(out.result.years_elapsed, 5);
        assert_eq!(out.result.months_remainder, 0);
        assert_eq!(out.result.effective_monthly_payment, dec!(200));
    }

    #[test]
    fn test_final_period_clamp_prevents_negative_balance() {
        let params = LoanParameters {
            extra_monthly_payment: dec!(130),
            ..base_params()
        };
        let out = simulate_loan(&params).unwrap();
        // 230/month against 12000: 52 full payments then a partial 53rd
        let last = out.result.schedule.last().unwrap();
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert!(last.principal_paid < dec!(230));
        assert!(out.result.schedule.len() < 120);
    }

    #[test]
    fn test_negative_extra_payment_rejected() {
        let params = LoanParameters {
            extra_monthly_payment: dec!(-1),
            ..base_params()
        };
        assert!(simulate_loan(&params).is_err());
    }

    #[test]
    fn test_sub_percent_rate_warns() {
        let params = LoanParameters {
            annual_rate_pct: dec!(0.05),
            ..base_params()
        };
        let out = simulate_loan(&params).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("percent units"));
    }
}
