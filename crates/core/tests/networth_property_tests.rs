//! Property-based tests for net-worth snapshot roll-ups and change calculation.
//!
//! These tests verify that the aggregation identities hold across random
//! holdings, using the `proptest` crate for random test case generation.

use chrono::{DateTime, TimeZone, Utc};
use kingston_core::networth::{build_snapshot_data, compute_change, HoldingInput, PreviousSnapshot};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

const OWNER_KEYS: [&str; 3] = ["john", "mary", "sam"];
const TYPE_LABELS: [&str; 4] = ["GIAs", "ISAs", "Bank Accounts", "Mortgages"];

// =============================================================================
// Generators
// =============================================================================

/// Non-negative amount in pence, as a two-decimal-place Decimal.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000).prop_map(|pence| Decimal::new(pence, 2))
}

fn arb_holding() -> impl Strategy<Value = HoldingInput> {
    (
        0usize..TYPE_LABELS.len(),
        "[A-Za-z ]{1,20}",
        any::<bool>(),
        any::<bool>(),
        proptest::collection::btree_map(0usize..OWNER_KEYS.len(), arb_amount(), 0..=3),
        arb_amount(),
    )
        .prop_map(|(type_idx, name, is_managed, is_liability, amounts, joint)| {
            let owner_amounts: BTreeMap<String, Decimal> = amounts
                .into_iter()
                .map(|(k, v)| (OWNER_KEYS[k].to_string(), v))
                .collect();
            HoldingInput {
                item_type: TYPE_LABELS[type_idx].to_string(),
                name: format!("Item {}", name),
                is_managed,
                is_liability,
                owner_amounts,
                joint,
            }
        })
}

fn owner_keys() -> Vec<String> {
    OWNER_KEYS.iter().map(|k| k.to_string()).collect()
}

fn date(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(days)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Group totals equal the sum of their items, and the grand total equals
    /// managed + unmanaged.
    #[test]
    fn prop_additivity(holdings in proptest::collection::vec(arb_holding(), 0..25)) {
        let data = build_snapshot_data(&owner_keys(), &holdings).unwrap();

        let mut grand_total = Decimal::ZERO;
        for group in data.item_types() {
            let items_total: Decimal = group.items().iter().map(|i| i.total()).sum();
            prop_assert_eq!(items_total, group.total());
            for key in OWNER_KEYS {
                let per_key: Decimal = group.items().iter().map(|i| i.amount_for(key)).sum();
                prop_assert_eq!(per_key, group.totals().amount_for(key));
            }
            grand_total += group.total();
        }

        let summary = data.summary();
        prop_assert_eq!(grand_total, summary.managed_total() + summary.unmanaged_total());
    }

    /// Net worth is always assets minus liabilities.
    #[test]
    fn prop_net_worth_identity(holdings in proptest::collection::vec(arb_holding(), 0..25)) {
        let data = build_snapshot_data(&owner_keys(), &holdings).unwrap();
        let summary = data.summary();
        prop_assert_eq!(
            summary.net_worth(),
            summary.total_assets() - summary.total_liabilities()
        );
    }

    /// Every item's total is its owner amounts plus joint.
    #[test]
    fn prop_item_total(holdings in proptest::collection::vec(arb_holding(), 1..10)) {
        let data = build_snapshot_data(&owner_keys(), &holdings).unwrap();
        for item in data.item_types().iter().flat_map(|t| t.items()) {
            let expected: Decimal = item.owner_amounts().values().copied().sum::<Decimal>() + item.joint();
            prop_assert_eq!(item.total(), expected);
        }
    }

    /// Without history there is never a change.
    #[test]
    fn prop_no_history_guard(pence in any::<i64>(), days in 0i64..5000) {
        let change = compute_change(Decimal::new(pence, 2), date(days), None).unwrap();
        prop_assert!(change.is_none());
    }

    /// A zero previous net worth never yields a percentage and never fails.
    #[test]
    fn prop_zero_division_guard(pence in -1_000_000_000i64..1_000_000_000, days in 1i64..5000) {
        let previous = PreviousSnapshot { snapshot_date: date(0), net_worth: Decimal::ZERO };
        let change = compute_change(Decimal::new(pence, 2), date(days), Some(previous))
            .unwrap()
            .unwrap();
        prop_assert!(change.percentage.is_none());
        prop_assert_eq!(change.value, Decimal::new(pence, 2));
    }

    /// The signed change is exactly current minus previous.
    #[test]
    fn prop_sign_preservation(
        current in -1_000_000_000i64..1_000_000_000,
        previous in -1_000_000_000i64..1_000_000_000,
    ) {
        let prev = PreviousSnapshot { snapshot_date: date(0), net_worth: Decimal::new(previous, 2) };
        let change = compute_change(Decimal::new(current, 2), date(30), Some(prev))
            .unwrap()
            .unwrap();
        prop_assert_eq!(change.value, Decimal::new(current - previous, 2));
    }
}
