//! Unit tests for the snapshot builder.

use super::*;
use crate::errors::{Error, ValidationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn owners() -> Vec<String> {
    vec!["john".to_string(), "mary".to_string()]
}

fn holding(
    item_type: &str,
    name: &str,
    is_managed: bool,
    amounts: &[(&str, Decimal)],
    joint: Decimal,
) -> HoldingInput {
    HoldingInput {
        item_type: item_type.to_string(),
        name: name.to_string(),
        is_managed,
        is_liability: false,
        owner_amounts: amounts
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<BTreeMap<_, _>>(),
        joint,
    }
}

fn liability(item_type: &str, name: &str, joint: Decimal) -> HoldingInput {
    HoldingInput {
        is_liability: true,
        ..holding(item_type, name, false, &[], joint)
    }
}

fn scenario_holdings() -> Vec<HoldingInput> {
    vec![
        holding(
            "GIAs",
            "Zurich Vista GIA",
            true,
            &[("john", dec!(125000)), ("mary", dec!(95000))],
            dec!(0),
        ),
        holding(
            "Bank Accounts",
            "Natwest Current Account",
            true,
            &[("john", dec!(2250)), ("mary", dec!(1750))],
            dec!(0),
        ),
        holding(
            "Bank Accounts",
            "Barclays (unmanaged)",
            false,
            &[("john", dec!(0)), ("mary", dec!(0))],
            dec!(4500),
        ),
    ]
}

#[test]
fn test_end_to_end_scenario_totals() {
    let data = build_snapshot_data(&owners(), &scenario_holdings()).unwrap();
    let summary = data.summary();

    assert_eq!(summary.managed_total(), dec!(224000));
    assert_eq!(summary.unmanaged_total(), dec!(4500));
    assert_eq!(summary.total_assets(), dec!(228500));
    assert_eq!(summary.total_liabilities(), dec!(0));
    assert_eq!(summary.net_worth(), dec!(228500));
    assert!(summary.change_since_last().is_none());
}

#[test]
fn test_groups_and_subtotals() {
    let data = build_snapshot_data(&owners(), &scenario_holdings()).unwrap();
    let types = data.item_types();
    assert_eq!(types.len(), 2);

    let gias = &types[0];
    assert_eq!(gias.item_type(), "GIAs");
    assert_eq!(gias.items()[0].total(), dec!(220000));
    assert_eq!(gias.total(), dec!(220000));

    let bank = &types[1];
    assert_eq!(bank.item_type(), "Bank Accounts");
    assert_eq!(bank.totals().amount_for("john"), dec!(2250));
    assert_eq!(bank.totals().amount_for("mary"), dec!(1750));
    assert_eq!(bank.totals().joint(), dec!(4500));
    assert_eq!(bank.total(), dec!(8500));
}

#[test]
fn test_groups_keep_first_appearance_order_and_items_keep_supplied_order() {
    let holdings = vec![
        holding("Pensions", "Zeta SIPP", true, &[("john", dec!(1))], dec!(0)),
        holding("Bank Accounts", "Monzo", false, &[], dec!(2)),
        holding("Pensions", "Aviva Pension", true, &[("mary", dec!(3))], dec!(0)),
    ];
    let data = build_snapshot_data(&owners(), &holdings).unwrap();

    let labels: Vec<&str> = data.item_types().iter().map(|t| t.item_type()).collect();
    assert_eq!(labels, vec!["Pensions", "Bank Accounts"]);

    let pension_names: Vec<&str> = data.item_types()[0]
        .items()
        .iter()
        .map(|i| i.name())
        .collect();
    // Not alphabetised
    assert_eq!(pension_names, vec!["Zeta SIPP", "Aviva Pension"]);
}

#[test]
fn test_grouping_is_case_sensitive() {
    let holdings = vec![
        holding("GIAs", "A", true, &[], dec!(1)),
        holding("gias", "B", true, &[], dec!(1)),
    ];
    let data = build_snapshot_data(&owners(), &holdings).unwrap();
    assert_eq!(data.item_types().len(), 2);
}

#[test]
fn test_missing_owner_amounts_are_zero_filled() {
    let holdings = vec![holding("ISAs", "Stocks ISA", true, &[("mary", dec!(20000))], dec!(0))];
    let data = build_snapshot_data(&owners(), &holdings).unwrap();
    let item = &data.item_types()[0].items()[0];
    assert_eq!(item.owner_amounts().len(), 2);
    assert_eq!(item.amount_for("john"), Decimal::ZERO);
    assert_eq!(item.total(), dec!(20000));
}

#[test]
fn test_empty_holdings_produce_zero_snapshot() {
    let data = build_snapshot_data(&owners(), &[]).unwrap();
    assert!(data.item_types().is_empty());
    assert_eq!(data.summary().managed_total(), Decimal::ZERO);
    assert_eq!(data.summary().unmanaged_total(), Decimal::ZERO);
    assert_eq!(data.net_worth(), Decimal::ZERO);
}

#[test]
fn test_liabilities_reduce_net_worth() {
    let mut holdings = scenario_holdings();
    holdings.push(liability("Mortgages", "Halifax Mortgage", dec!(150000)));
    let data = build_snapshot_data(&owners(), &holdings).unwrap();
    let summary = data.summary();

    assert_eq!(summary.total_assets(), dec!(228500));
    assert_eq!(summary.total_liabilities(), dec!(150000));
    assert_eq!(summary.net_worth(), dec!(78500));
    // Liabilities still count toward the managed/unmanaged partition
    assert_eq!(summary.unmanaged_total(), dec!(154500));
}

#[test]
fn test_unknown_owner_is_rejected() {
    let holdings = vec![holding("GIAs", "Mystery GIA", true, &[("peter", dec!(10))], dec!(0))];
    let result = build_snapshot_data(&owners(), &holdings);
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::UnknownOwner { ref owner, .. })) if owner == "peter"
    ));
}

#[test]
fn test_negative_joint_is_rejected() {
    let mut holdings = scenario_holdings();
    holdings.push(holding("Bank Accounts", "Overdrawn", false, &[], dec!(-100)));
    let result = build_snapshot_data(&owners(), &holdings);
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::NegativeAmount { ref key, .. })) if key == "joint"
    ));
}

#[test]
fn test_negative_owner_amount_is_rejected() {
    let holdings = vec![holding("GIAs", "GIA", true, &[("mary", dec!(-0.01))], dec!(0))];
    assert!(matches!(
        build_snapshot_data(&owners(), &holdings),
        Err(Error::Validation(ValidationError::NegativeAmount { .. }))
    ));
}

#[test]
fn test_invalid_owner_sets_are_rejected() {
    let dup = vec!["john".to_string(), "john".to_string()];
    assert!(matches!(
        build_snapshot_data(&dup, &[]),
        Err(Error::Validation(ValidationError::DuplicateOwnerKey(_)))
    ));

    let reserved = vec!["total".to_string()];
    assert!(matches!(
        build_snapshot_data(&reserved, &[]),
        Err(Error::Validation(ValidationError::ReservedOwnerKey(_)))
    ));
}

#[test]
fn test_blank_type_label_is_rejected() {
    let holdings = vec![holding("  ", "Loose item", false, &[], dec!(1))];
    assert!(matches!(
        build_snapshot_data(&owners(), &holdings),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_serialized_shape_uses_snake_case_and_owner_columns() {
    let data = build_snapshot_data(&owners(), &scenario_holdings()).unwrap();
    let json = serde_json::to_value(&data).unwrap();

    let item = &json["item_types"][1]["items"][1];
    assert_eq!(json["item_types"][1]["type"], "Bank Accounts");
    assert_eq!(item["name"], "Barclays (unmanaged)");
    assert_eq!(item["is_managed"], false);
    assert_eq!(item["john"], 0.0);
    assert_eq!(item["joint"], 4500.0);
    assert_eq!(item["total"], 4500.0);
    assert_eq!(json["item_types"][0]["totals"]["john"], 125000.0);

    let summary = &json["summary"];
    assert_eq!(summary["managed_total"], 224000.0);
    assert_eq!(summary["net_worth"], 228500.0);
    assert!(summary["change_since_last"].is_null());
}

#[test]
fn test_persisted_document_round_trips_and_verifies() {
    let data = build_snapshot_data(&owners(), &scenario_holdings()).unwrap();
    let text = serde_json::to_string(&data).unwrap();
    let restored: SnapshotData = serde_json::from_str(&text).unwrap();
    assert_eq!(restored, data);
    assert!(restored.verify().is_ok());
}

#[test]
fn test_verify_detects_tampered_total() {
    let data = build_snapshot_data(&owners(), &scenario_holdings()).unwrap();
    let mut json = serde_json::to_value(&data).unwrap();
    json["item_types"][0]["items"][0]["total"] = serde_json::json!(1.0);
    let tampered: SnapshotData = serde_json::from_value(json).unwrap();
    assert!(matches!(
        tampered.verify(),
        Err(Error::InvariantViolation(_))
    ));
}
