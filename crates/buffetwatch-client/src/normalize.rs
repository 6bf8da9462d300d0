//! Normalization from raw buffet entries to [`buffetwatch_core::ResultRecord`]s.
//!
//! This is the single place where a slot's fetch outcome is turned into its
//! output record group, and where the explicit default-substitution step
//! happens: missing entry fields become empty strings rather than being
//! defaulted piecemeal at the access sites.

use buffetwatch_core::{BranchConfig, ErrorRecord, PriceRecord, ResultRecord};
use serde_json::Value;

use crate::error::ClientError;
use crate::types::{BuffetEntry, BuffetPriceResponse};

/// Error reason recorded when the retry budget was exhausted without a
/// parseable 200 response.
pub const FAILED_TO_FETCH: &str = "Failed to fetch";

/// Error reason recorded when a 200 response carried no buffet entries.
pub const NO_BUFFET_DATA: &str = "No buffet data";

/// Maps one slot's fetch outcome into its record group.
///
/// Exactly one of three shapes comes back, keyed by (branch, date, slot time):
/// a single [`FAILED_TO_FETCH`] record, a single [`NO_BUFFET_DATA`] record,
/// or one [`PriceRecord`] per buffet entry in entry order. Never an empty
/// list.
#[must_use]
pub fn records_for_slot(
    branch: &BranchConfig,
    date: &str,
    slot_time: &str,
    outcome: Result<BuffetPriceResponse, ClientError>,
) -> Vec<ResultRecord> {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(
                branch = %branch.branch_id,
                slot_time,
                error = %err,
                "slot fetch failed after all attempts"
            );
            return vec![error_record(branch, date, slot_time, FAILED_TO_FETCH)];
        }
    };

    let entries = response.into_entries();
    if entries.is_empty() {
        return vec![error_record(branch, date, slot_time, NO_BUFFET_DATA)];
    }

    entries
        .into_iter()
        .map(|entry| price_record(branch, date, slot_time, entry))
        .collect()
}

fn error_record(branch: &BranchConfig, date: &str, slot_time: &str, reason: &str) -> ResultRecord {
    ResultRecord::Error(ErrorRecord {
        branch: branch.name.clone(),
        branch_id: branch.branch_id.clone(),
        date: date.to_owned(),
        slot_time: slot_time.to_owned(),
        error: reason.to_owned(),
    })
}

fn price_record(
    branch: &BranchConfig,
    date: &str,
    slot_time: &str,
    entry: BuffetEntry,
) -> ResultRecord {
    ResultRecord::Price(PriceRecord {
        branch: branch.name.clone(),
        branch_id: branch.branch_id.clone(),
        date: date.to_owned(),
        slot_time: slot_time.to_owned(),
        period: entry
            .period
            .and_then(|p| p.period_name)
            .unwrap_or_default(),
        customer_type: entry.customer_type.unwrap_or_default(),
        food_type: entry.food_type.unwrap_or_default(),
        plan: entry.display_name.unwrap_or_default(),
        price: entry.total_amount.unwrap_or_else(empty_value),
        original_price: entry.original_price.unwrap_or_else(empty_value),
    })
}

/// Substitute for a missing price field: the output format uses the empty
/// string, not `null`, for absent values.
fn empty_value() -> Value {
    Value::String(String::new())
}
