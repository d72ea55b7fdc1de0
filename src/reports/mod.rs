//! The fixed reporting queries and their qualification rules.
//!
//! Table and column names follow the academy's existing schema
//! (`inscripcion_simulacros`, `banco_pagos`, `estudiantes`,
//! `inscripciones`, `areas`) — this service only reads it.

mod queries;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use sqlx::FromRow;

pub use queries::{count_enrollments, count_qualifying_payments, enrollments_by_area};

/// The period the area breakdown is scoped to.
pub const CURRENT_PERIOD_ID: u32 = 1;

/// The campaign window a payment must fall in to count as "paid".
///
/// Dates are inclusive on both ends. The amount must be strictly above
/// `min_exclusive` and at most `max_inclusive` (soles): exactly 14.00
/// does not qualify, exactly 18.00 does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentWindow {
    /// First qualifying payment date.
    pub start: NaiveDate,
    /// Last qualifying payment date.
    pub end: NaiveDate,
    /// Amounts must be strictly greater than this.
    pub min_exclusive: Decimal,
    /// Amounts must be less than or equal to this.
    pub max_inclusive: Decimal,
}

impl PaymentWindow {
    /// Whether a payment on `paid_on` of `amount` soles qualifies.
    pub fn qualifies(&self, paid_on: NaiveDate, amount: Decimal) -> bool {
        paid_on >= self.start
            && paid_on <= self.end
            && amount > self.min_exclusive
            && amount <= self.max_inclusive
    }
}

/// The current campaign: 2025-11-27 through 2025-12-13, >14 and <=18 soles.
pub static CAMPAIGN_WINDOW: Lazy<PaymentWindow> = Lazy::new(|| PaymentWindow {
    start: date(2025, 11, 27),
    end: date(2025, 12, 13),
    min_exclusive: dec!(14),
    max_inclusive: dec!(18),
});

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid campaign date")
}

/// One row of the area breakdown: an area name and its distinct
/// enrolled-student count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AreaCount {
    /// Area (subject track) name.
    pub area: String,
    /// Distinct enrolled students in that area.
    pub total_inscritos: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_excludes_minimum_amount_on_first_day() {
        assert!(!CAMPAIGN_WINDOW.qualifies(date(2025, 11, 27), dec!(14.00)));
    }

    #[test]
    fn window_includes_just_above_minimum_on_first_day() {
        assert!(CAMPAIGN_WINDOW.qualifies(date(2025, 11, 27), dec!(14.01)));
    }

    #[test]
    fn window_includes_maximum_amount_on_last_day() {
        assert!(CAMPAIGN_WINDOW.qualifies(date(2025, 12, 13), dec!(18.00)));
    }

    #[test]
    fn window_excludes_day_after_end_regardless_of_amount() {
        assert!(!CAMPAIGN_WINDOW.qualifies(date(2025, 12, 14), dec!(15.00)));
        assert!(!CAMPAIGN_WINDOW.qualifies(date(2025, 12, 14), dec!(18.00)));
    }

    #[test]
    fn window_excludes_day_before_start() {
        assert!(!CAMPAIGN_WINDOW.qualifies(date(2025, 11, 26), dec!(15.00)));
    }

    #[test]
    fn window_excludes_amount_above_maximum() {
        assert!(!CAMPAIGN_WINDOW.qualifies(date(2025, 12, 1), dec!(18.01)));
    }
}
