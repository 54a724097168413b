use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanSimError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::LoanSimResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Payment derivation input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    /// Loan term in years.
    pub years: u32,
    /// Annual interest rate in percent (5.0 = 5%).
    pub annual_rate_pct: Rate,
    /// Loan principal.
    pub principal: Money,
}

/// Payment derivation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    /// Fixed monthly payment that retires the loan over the full term.
    pub monthly_payment: Money,
    /// Monthly rate in decimal form.
    pub monthly_rate: Rate,
    /// Number of scheduled periods (years * 12).
    pub total_periods: u32,
}

/// Fixed monthly payment M = P*r*(1+r)^n / ((1+r)^n - 1).
///
/// A zero rate collapses the annuity denominator to zero; that case pays
/// the principal down straight-line: M = P / n.
pub fn minimum_payment(
    years: u32,
    annual_rate_pct: Rate,
    principal: Money,
) -> LoanSimResult<Money> {
    validate(years, annual_rate_pct, principal)?;

    let n = Decimal::from(years * 12);
    let r = monthly_rate(annual_rate_pct);

    if r.is_zero() {
        return Ok(principal / n);
    }

    let growth = (Decimal::ONE + r).powd(n);
    Ok(principal * r * growth / (growth - Decimal::ONE))
}

/// Convert an annual percent rate to a monthly decimal rate.
pub fn monthly_rate(annual_rate_pct: Rate) -> Rate {
    annual_rate_pct / PERCENT / MONTHS_PER_YEAR
}

/// Derive the payment with the standard output envelope.
pub fn calculate_payment(input: &PaymentInput) -> LoanSimResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();

    let monthly_payment = minimum_payment(input.years, input.annual_rate_pct, input.principal)?;
    let output = PaymentOutput {
        monthly_payment,
        monthly_rate: monthly_rate(input.annual_rate_pct),
        total_periods: input.years * 12,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Level Payment (Annuity Formula)",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}

fn validate(years: u32, annual_rate_pct: Rate, principal: Money) -> LoanSimResult<()> {
    if years == 0 {
        return Err(LoanSimError::InvalidInput {
            field: "years".into(),
            reason: "Loan term must be at least one year".into(),
        });
    }
    if principal <= Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(LoanSimError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_rate_is_straight_line() {
        // 12000 over 120 months at 0% is exactly 100/month
        let m = minimum_payment(10, dec!(0), dec!(12000)).unwrap();
        assert_eq!(m, dec!(100));
    }

    #[test]
    fn test_standard_thirty_year() {
        // 330k at 5% over 30y: table value ~1771.51/month
        let m = minimum_payment(30, dec!(5.0), dec!(330000)).unwrap();
        assert!(
            (m - dec!(1771.51)).abs() < dec!(0.02),
            "Expected ~1771.51, got {}",
            m
        );
    }

    #[test]
    fn test_payment_scales_with_principal() {
        let m1 = minimum_payment(30, dec!(5.0), dec!(100000)).unwrap();
        let m2 = minimum_payment(30, dec!(5.0), dec!(200000)).unwrap();
        assert!((m2 - m1 * dec!(2)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(minimum_payment(0, dec!(5.0), dec!(1000)).is_err());
        assert!(minimum_payment(10, dec!(5.0), dec!(0)).is_err());
        assert!(minimum_payment(10, dec!(5.0), dec!(-1)).is_err());
        assert!(minimum_payment(10, dec!(-0.01), dec!(1000)).is_err());
    }

    #[test]
    fn test_envelope_reports_periods() {
        let input = PaymentInput {
            years: 15,
            annual_rate_pct: dec!(4.5),
            principal: dec!(250000),
        };
        let out = calculate_payment(&input).unwrap();
        assert_eq!(out.result.total_periods, 180);
        assert_eq!(out.result.monthly_rate, dec!(4.5) / dec!(100) / dec!(12));
    }
}
