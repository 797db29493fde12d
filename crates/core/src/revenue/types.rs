//! Revenue and occupancy figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Month abbreviations for period labels, indexed by month - 1.
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Returns the human-readable label for a period, e.g. "Mar 2026".
///
/// Months outside 1-12 fall back to the raw number; callers validate the
/// month before persisting, so this only happens for unvalidated input.
#[must_use]
pub fn period_label(month: i32, year: i32) -> String {
    match usize::try_from(month) {
        Ok(m) if (1..=12).contains(&m) => format!("{} {year}", MONTHS[m - 1]),
        _ => format!("{month} {year}"),
    }
}

/// One property-month's financial figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueFigures {
    /// Gross revenue for the period.
    pub gross_revenue: Decimal,
    /// Expenses for the period.
    pub expenses: Decimal,
}

impl RevenueFigures {
    /// Net distributable income: gross revenue minus expenses.
    #[must_use]
    pub fn net_income(&self) -> Decimal {
        self.gross_revenue - self.expenses
    }

    /// Profit margin as a percentage of gross revenue.
    ///
    /// Zero when gross revenue is zero.
    #[must_use]
    pub fn profit_margin(&self) -> Decimal {
        if self.gross_revenue.is_zero() {
            return Decimal::ZERO;
        }
        self.net_income() / self.gross_revenue * Decimal::ONE_HUNDRED
    }
}

/// One property-month's occupancy figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyFigures {
    /// Nights booked in the period.
    pub nights_booked: i32,
    /// Nights the unit was available in the period.
    pub nights_available: i32,
}

impl OccupancyFigures {
    /// Occupancy rate as a percentage of available nights.
    ///
    /// Zero when no nights were available.
    #[must_use]
    pub fn occupancy_rate(&self) -> Decimal {
        if self.nights_available == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.nights_booked) / Decimal::from(self.nights_available)
            * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(1, 2026), "Jan 2026");
        assert_eq!(period_label(12, 2025), "Dec 2025");
        assert_eq!(period_label(13, 2026), "13 2026");
        assert_eq!(period_label(0, 2026), "0 2026");
    }

    #[test]
    fn test_net_income() {
        let figures = RevenueFigures {
            gross_revenue: dec!(2_500_000),
            expenses: dec!(350_000),
        };
        assert_eq!(figures.net_income(), dec!(2_150_000));
    }

    #[test]
    fn test_net_income_negative() {
        let figures = RevenueFigures {
            gross_revenue: dec!(100_000),
            expenses: dec!(150_000),
        };
        assert_eq!(figures.net_income(), dec!(-50_000));
    }

    #[test]
    fn test_profit_margin() {
        let figures = RevenueFigures {
            gross_revenue: dec!(2_500_000),
            expenses: dec!(350_000),
        };
        assert_eq!(figures.profit_margin(), dec!(86));

        let zero_gross = RevenueFigures {
            gross_revenue: Decimal::ZERO,
            expenses: dec!(100),
        };
        assert_eq!(zero_gross.profit_margin(), Decimal::ZERO);
    }

    #[test]
    fn test_occupancy_rate() {
        let figures = OccupancyFigures {
            nights_booked: 21,
            nights_available: 30,
        };
        assert_eq!(figures.occupancy_rate(), dec!(70));

        let empty = OccupancyFigures {
            nights_booked: 0,
            nights_available: 0,
        };
        assert_eq!(empty.occupancy_rate(), Decimal::ZERO);
    }
}
