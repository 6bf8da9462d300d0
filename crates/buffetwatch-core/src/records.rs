//! Output record types for the aggregated pricing document.
//!
//! Field names carry their report-facing capitalization via `serde(rename)`
//! so the serialized document matches the downstream consumer's expectations
//! exactly (`"Branch ID"`, `"Slot Time"`, ...). Struct field order is the
//! serialization order.

use serde::Serialize;
use serde_json::Value;

/// One row of the output document.
///
/// Every (branch, slot time) pair attempted produces exactly one group of
/// records: either a single [`ErrorRecord`] or one [`PriceRecord`] per buffet
/// entry the upstream returned. Untagged so both shapes serialize as plain
/// objects in the same flat list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResultRecord {
    Price(PriceRecord),
    Error(ErrorRecord),
}

impl ResultRecord {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, ResultRecord::Error(_))
    }
}

/// Placeholder row emitted when a slot yields no usable pricing data.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "Branch ID")]
    pub branch_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Slot Time")]
    pub slot_time: String,
    #[serde(rename = "Error")]
    pub error: String,
}

/// One priced buffet offering for a slot.
///
/// `price` and `original_price` are kept as raw JSON values: the upstream
/// sends numbers, and they are copied through verbatim. A missing field is
/// substituted with the empty string during normalization, so the column is
/// heterogeneous by design of the output format.
#[derive(Debug, Clone, Serialize)]
pub struct PriceRecord {
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "Branch ID")]
    pub branch_id: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Slot Time")]
    pub slot_time: String,
    #[serde(rename = "Period")]
    pub period: String,
    #[serde(rename = "Customer Type")]
    pub customer_type: String,
    #[serde(rename = "Food Type")]
    pub food_type: String,
    #[serde(rename = "Plan")]
    pub plan: String,
    #[serde(rename = "Price")]
    pub price: Value,
    #[serde(rename = "Original Price")]
    pub original_price: Value,
}
