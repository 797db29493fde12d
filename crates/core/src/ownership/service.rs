//! Ownership service for issuance validation and portfolio math.
//!
//! Pure business logic with no database dependencies. The repositories feed
//! this service the current fractional configuration and stake snapshots;
//! it never reads state itself.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::error::OwnershipError;
use super::types::{FractionalConfig, PortfolioTotals, StakeSnapshot};

/// Ownership service for issuance validation and portfolio aggregation.
pub struct OwnershipService;

impl OwnershipService {
    /// Validates a property's fraction supply on create/update.
    ///
    /// Absence means the property is not fractionally owned; when present,
    /// the supply must be positive.
    ///
    /// # Errors
    ///
    /// Returns `OwnershipError::InvalidFractionSupply` for a non-positive supply.
    pub fn validate_fraction_supply(total_fractions: Option<i32>) -> Result<(), OwnershipError> {
        match total_fractions {
            Some(total) if total <= 0 => Err(OwnershipError::InvalidFractionSupply(total)),
            _ => Ok(()),
        }
    }

    /// Validates an investment assignment against the property's supply.
    ///
    /// Rules:
    /// - Fractional property: the stake must carry a positive fraction count
    ///   no greater than the unsold supply.
    /// - Non-fractional property: the stake must not carry fractions.
    ///
    /// # Errors
    ///
    /// Returns an `OwnershipError` describing the violated rule.
    pub fn validate_assignment(
        config: &FractionalConfig,
        fractions_requested: Option<i32>,
    ) -> Result<(), OwnershipError> {
        if config.is_fractional() {
            let Some(requested) = fractions_requested else {
                return Err(OwnershipError::FractionsRequired);
            };
            if requested <= 0 {
                return Err(OwnershipError::InvalidFractionCount(requested));
            }
            let available = config.fractions_available();
            if requested > available {
                return Err(OwnershipError::NotEnoughFractions {
                    requested,
                    available,
                });
            }
            Ok(())
        } else {
            match fractions_requested {
                Some(_) => Err(OwnershipError::NotFractional),
                None => Ok(()),
            }
        }
    }

    /// Computes a stake's ownership percentage of a property.
    ///
    /// Zero when either side of the ratio is absent or non-positive.
    #[must_use]
    pub fn ownership_percentage(
        fractions_owned: Option<i32>,
        total_fractions: Option<i32>,
    ) -> Decimal {
        match (fractions_owned, total_fractions) {
            (Some(owned), Some(total)) if owned > 0 && total > 0 => {
                Decimal::from(owned) / Decimal::from(total) * Decimal::ONE_HUNDRED
            }
            _ => Decimal::ZERO,
        }
    }

    /// Aggregates portfolio totals across a user's stakes.
    #[must_use]
    pub fn portfolio_totals(stakes: &[StakeSnapshot]) -> PortfolioTotals {
        let total_initial_value: Decimal = stakes.iter().map(|s| s.valuation.initial_value).sum();
        let total_current_value: Decimal = stakes.iter().map(|s| s.valuation.current_value).sum();

        let total_growth_percentage = if total_initial_value.is_zero() {
            Decimal::ZERO
        } else {
            (total_current_value - total_initial_value) / total_initial_value
                * Decimal::ONE_HUNDRED
        };

        let total_fractions = stakes
            .iter()
            .map(|s| i64::from(s.fractions_owned.unwrap_or(0)))
            .sum();

        let properties: HashSet<_> = stakes.iter().map(|s| s.property_id).collect();

        PortfolioTotals {
            total_initial_value,
            total_current_value,
            total_growth_percentage,
            total_fractions,
            properties_count: properties.len() as u64,
            active_investments: stakes.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::types::Valuation;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn fractional(total: i32, sold: i32) -> FractionalConfig {
        FractionalConfig {
            total_fractions: Some(total),
            fractions_sold: sold,
        }
    }

    fn flat() -> FractionalConfig {
        FractionalConfig {
            total_fractions: None,
            fractions_sold: 0,
        }
    }

    fn stake(property_id: Uuid, fractions: Option<i32>, initial: Decimal, current: Decimal) -> StakeSnapshot {
        StakeSnapshot {
            property_id,
            fractions_owned: fractions,
            valuation: Valuation {
                initial_value: initial,
                current_value: current,
            },
        }
    }

    #[test]
    fn test_is_fractional() {
        assert!(fractional(1000, 0).is_fractional());
        assert!(!flat().is_fractional());
        assert!(
            !FractionalConfig {
                total_fractions: Some(0),
                fractions_sold: 0
            }
            .is_fractional()
        );
    }

    #[test]
    fn test_fractions_available() {
        assert_eq!(fractional(1000, 300).fractions_available(), 700);
        assert_eq!(flat().fractions_available(), 0);
    }

    #[test]
    fn test_validate_fraction_supply() {
        assert!(OwnershipService::validate_fraction_supply(None).is_ok());
        assert!(OwnershipService::validate_fraction_supply(Some(1000)).is_ok());
        assert!(matches!(
            OwnershipService::validate_fraction_supply(Some(0)),
            Err(OwnershipError::InvalidFractionSupply(0))
        ));
        assert!(matches!(
            OwnershipService::validate_fraction_supply(Some(-5)),
            Err(OwnershipError::InvalidFractionSupply(-5))
        ));
    }

    #[test]
    fn test_validate_assignment_within_supply() {
        assert!(OwnershipService::validate_assignment(&fractional(1000, 300), Some(700)).is_ok());
        assert!(OwnershipService::validate_assignment(&fractional(1000, 0), Some(1)).is_ok());
    }

    #[test]
    fn test_validate_assignment_over_supply() {
        let result = OwnershipService::validate_assignment(&fractional(1000, 800), Some(300));
        assert_eq!(
            result,
            Err(OwnershipError::NotEnoughFractions {
                requested: 300,
                available: 200
            })
        );
    }

    #[test]
    fn test_validate_assignment_requires_fractions_when_fractional() {
        assert_eq!(
            OwnershipService::validate_assignment(&fractional(1000, 0), None),
            Err(OwnershipError::FractionsRequired)
        );
    }

    #[rstest]
    #[case(0)]
    #[case(-10)]
    fn test_validate_assignment_rejects_non_positive(#[case] requested: i32) {
        assert_eq!(
            OwnershipService::validate_assignment(&fractional(1000, 0), Some(requested)),
            Err(OwnershipError::InvalidFractionCount(requested))
        );
    }

    #[test]
    fn test_validate_assignment_flat_property() {
        assert!(OwnershipService::validate_assignment(&flat(), None).is_ok());
        assert_eq!(
            OwnershipService::validate_assignment(&flat(), Some(10)),
            Err(OwnershipError::NotFractional)
        );
    }

    #[test]
    fn test_ownership_percentage() {
        assert_eq!(
            OwnershipService::ownership_percentage(Some(300), Some(1000)),
            dec!(30)
        );
        assert_eq!(
            OwnershipService::ownership_percentage(Some(200), Some(1000)),
            dec!(20)
        );
        assert_eq!(
            OwnershipService::ownership_percentage(None, Some(1000)),
            Decimal::ZERO
        );
        assert_eq!(
            OwnershipService::ownership_percentage(Some(300), None),
            Decimal::ZERO
        );
        assert_eq!(
            OwnershipService::ownership_percentage(Some(300), Some(0)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_growth_figures() {
        let valuation = Valuation {
            initial_value: dec!(5_000_000),
            current_value: dec!(6_250_000),
        };
        assert_eq!(valuation.growth_amount(), dec!(1_250_000));
        assert_eq!(valuation.growth_percentage(), dec!(25));

        let zero_initial = Valuation {
            initial_value: Decimal::ZERO,
            current_value: dec!(100),
        };
        assert_eq!(zero_initial.growth_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_portfolio_totals() {
        let property_a = Uuid::new_v4();
        let property_b = Uuid::new_v4();
        let stakes = vec![
            stake(property_a, Some(300), dec!(3_000_000), dec!(3_600_000)),
            stake(property_a, Some(200), dec!(2_000_000), dec!(2_400_000)),
            stake(property_b, None, dec!(5_000_000), dec!(6_000_000)),
        ];

        let totals = OwnershipService::portfolio_totals(&stakes);
        assert_eq!(totals.total_initial_value, dec!(10_000_000));
        assert_eq!(totals.total_current_value, dec!(12_000_000));
        assert_eq!(totals.total_growth_percentage, dec!(20));
        assert_eq!(totals.total_fractions, 500);
        assert_eq!(totals.properties_count, 2);
        assert_eq!(totals.active_investments, 3);
    }

    #[test]
    fn test_portfolio_totals_empty() {
        let totals = OwnershipService::portfolio_totals(&[]);
        assert_eq!(totals, PortfolioTotals::default());
    }
}
