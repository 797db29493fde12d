//! Property-based tests for the distribution engine.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::engine::DistributionEngine;
use super::types::{RevenuePeriodSnapshot, StakeInput};

/// Strategy for monetary amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for one stake's fraction count (absent, zero, or positive).
fn fractions_strategy() -> impl Strategy<Value = Option<i32>> {
    prop_oneof![
        2 => (1i32..=1_000i32).prop_map(Some),
        1 => Just(Some(0)),
        1 => Just(None),
    ]
}

fn stakes_strategy() -> impl Strategy<Value = Vec<StakeInput>> {
    prop::collection::vec(fractions_strategy(), 1..12).prop_map(|fractions| {
        fractions
            .into_iter()
            .map(|fractions_owned| StakeInput {
                investment_id: Uuid::new_v4(),
                fractions_owned,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Bounded conservation: the distributed sum equals net income scaled by
    /// the qualifying share of the total supply, up to division remainder.
    #[test]
    fn prop_bounded_conservation(
        gross in amount_strategy(),
        stakes in stakes_strategy(),
        total_fractions in 1i32..=100_000i32,
    ) {
        let revenue = RevenuePeriodSnapshot {
            distributed: false,
            gross_revenue: gross,
            expenses: Decimal::ZERO,
        };

        let shares = DistributionEngine::plan(&revenue, Some(total_fractions), &stakes).unwrap();

        let qualifying: i64 = stakes
            .iter()
            .filter_map(|s| s.fractions_owned)
            .filter(|f| *f > 0)
            .map(i64::from)
            .sum();

        let distributed: Decimal = shares.iter().map(|s| s.earnings_amount).sum();
        let expected = gross * Decimal::from(qualifying) / Decimal::from(total_fractions);

        prop_assert!((distributed - expected).abs() < dec!(0.0001),
            "distributed {distributed} vs expected {expected}");
    }

    /// Exactly the stakes with positive fractions participate, in order.
    #[test]
    fn prop_participation_subset(
        gross in amount_strategy(),
        stakes in stakes_strategy(),
    ) {
        let revenue = RevenuePeriodSnapshot {
            distributed: false,
            gross_revenue: gross,
            expenses: Decimal::ZERO,
        };

        let shares = DistributionEngine::plan(&revenue, Some(10_000), &stakes).unwrap();

        let qualifying: Vec<Uuid> = stakes
            .iter()
            .filter(|s| s.fractions_owned.is_some_and(|f| f > 0))
            .map(|s| s.investment_id)
            .collect();
        let credited: Vec<Uuid> = shares.iter().map(|s| s.investment_id).collect();

        prop_assert_eq!(credited, qualifying);
    }

    /// Every planned share is strictly positive and its percentage is within (0, 100].
    #[test]
    fn prop_shares_positive_and_bounded(
        gross in amount_strategy(),
        stakes in stakes_strategy(),
        total_fractions in 1_000i32..=100_000i32,
    ) {
        let revenue = RevenuePeriodSnapshot {
            distributed: false,
            gross_revenue: gross,
            expenses: Decimal::ZERO,
        };

        let shares = DistributionEngine::plan(&revenue, Some(total_fractions), &stakes).unwrap();

        for share in &shares {
            prop_assert!(share.earnings_amount > Decimal::ZERO);
            prop_assert!(share.ownership_percentage > Decimal::ZERO);
            prop_assert!(share.ownership_percentage <= dec!(100));
        }
    }

    /// A distributed period is always rejected regardless of the other inputs.
    #[test]
    fn prop_distributed_flag_always_rejects(
        gross in amount_strategy(),
        stakes in stakes_strategy(),
    ) {
        let revenue = RevenuePeriodSnapshot {
            distributed: true,
            gross_revenue: gross,
            expenses: Decimal::ZERO,
        };

        let result = DistributionEngine::plan(&revenue, Some(1_000), &stakes);
        prop_assert_eq!(result, Err(super::error::DistributionError::AlreadyDistributed));
    }
}
