//! Month-end payment calendar.
//!
//! Schedule entries are dated on month ends: the first payment falls on the
//! last day of the month containing the start date, each subsequent payment
//! one month later.

use chrono::{Datelike, NaiveDate};

use crate::error::LoanSimError;
use crate::LoanSimResult;

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> LoanSimResult<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| LoanSimError::DateError(format!("month-end overflow past {date}")))
}

/// Month-end dates for `periods` consecutive months starting at the month
/// of `start`.
pub fn payment_dates(start: NaiveDate, periods: usize) -> LoanSimResult<Vec<NaiveDate>> {
    let mut dates = Vec::with_capacity(periods);
    let mut cursor = start;
    for _ in 0..periods {
        let eom = month_end(cursor)?;
        dates.push(eom);
        // First of the following month
        cursor = eom
            .succ_opt()
            .ok_or_else(|| LoanSimError::DateError(format!("calendar overflow past {eom}")))?;
    }
    Ok(dates)
}

/// Parse an ISO 8601 (YYYY-MM-DD) date at the input boundary.
pub fn parse_iso_date(value: &str) -> LoanSimResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| LoanSimError::InvalidInput {
        field: "start_date".into(),
        reason: format!("'{value}' is not a YYYY-MM-DD date"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_end_mid_month() {
        assert_eq!(month_end(date(2024, 1, 1)).unwrap(), date(2024, 1, 31));
        assert_eq!(month_end(date(2024, 1, 31)).unwrap(), date(2024, 1, 31));
    }

    #[test]
    fn test_month_end_leap_february() {
        assert_eq!(month_end(date(2024, 2, 10)).unwrap(), date(2024, 2, 29));
        assert_eq!(month_end(date(2025, 2, 10)).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_month_end_december_rollover() {
        assert_eq!(month_end(date(2024, 12, 5)).unwrap(), date(2024, 12, 31));
    }

    #[test]
    fn test_payment_dates_sequence() {
        let dates = payment_dates(date(2024, 1, 1), 4).unwrap();
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30),
            ]
        );
    }

    #[test]
    fn test_payment_dates_year_boundary() {
        let dates = payment_dates(date(2023, 11, 15), 3).unwrap();
        assert_eq!(
            dates,
            vec![date(2023, 11, 30), date(2023, 12, 31), date(2024, 1, 31)]
        );
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-01-01").unwrap(), date(2024, 1, 1));
        assert_eq!(parse_iso_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
        assert!(parse_iso_date("01/02/2024").is_err());
        assert!(parse_iso_date("2023-02-29").is_err());
        assert!(parse_iso_date("not-a-date").is_err());
    }
}
