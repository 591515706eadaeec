//! Period-over-period net worth change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::networth_model::{ChangeSinceLast, NetWorthSnapshotSummary, PreviousSnapshot};
use crate::constants::PERIOD_MONTH_FORMAT;
use crate::errors::{Error, Result};

/// Compares the current net worth with the previous snapshot.
///
/// Returns `Ok(None)` when there is no previous snapshot. The percentage is
/// `None` when the previous net worth is zero. Neither value nor percentage
/// is rounded, so signs are preserved however small the change.
///
/// # Errors
/// `InvariantViolation` if the decimal arithmetic overflows.
pub fn compute_change(
    current_net_worth: Decimal,
    current_date: DateTime<Utc>,
    previous: Option<PreviousSnapshot>,
) -> Result<Option<ChangeSinceLast>> {
    let Some(previous) = previous else {
        return Ok(None);
    };

    let value = current_net_worth
        .checked_sub(previous.net_worth)
        .ok_or_else(|| {
            Error::InvariantViolation(format!(
                "net worth change overflowed: {} - {}",
                current_net_worth, previous.net_worth
            ))
        })?;

    let percentage = if previous.net_worth.is_zero() {
        None
    } else {
        let ratio = value
            .checked_div(previous.net_worth)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| {
                Error::InvariantViolation(format!(
                    "percentage change overflowed: {} / {}",
                    value, previous.net_worth
                ))
            })?;
        Some(ratio)
    };

    Ok(Some(ChangeSinceLast {
        value,
        percentage,
        last_snapshot_date: previous.snapshot_date,
        last_snapshot_net_worth: previous.net_worth,
        period_display: format_period(previous.snapshot_date, current_date),
        current_date,
    }))
}

/// Formats "{MMM YY} to {MMM YY}", e.g. "Apr 24 to Aug 25".
pub fn format_period(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    format!(
        "{} to {}",
        from.format(PERIOD_MONTH_FORMAT),
        to.format(PERIOD_MONTH_FORMAT)
    )
}

/// Picks the snapshot a new one taken at `before` is compared against.
///
/// Only snapshots strictly earlier than `before` qualify. The latest date
/// wins; identical timestamps are resolved by the highest id.
pub fn select_previous_snapshot(
    snapshots: &[NetWorthSnapshotSummary],
    before: DateTime<Utc>,
) -> Option<&NetWorthSnapshotSummary> {
    snapshots
        .iter()
        .filter(|s| s.snapshot_date < before)
        .max_by_key(|s| (s.snapshot_date, s.id))
}
