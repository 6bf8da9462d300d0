//! Request and response types for the buffet pricing endpoint.
//!
//! ## Observed response shape
//!
//! Successful responses nest the pricing rows at
//! `results.buffets.buffet_data`. Any level of that path can be absent, and
//! individual entries routinely omit fields, so the whole tree is decoded
//! partially: every field is optional and default substitution happens in
//! `normalize.rs`, not here.
//!
//! ### `totalAmount` / `originalPrice`
//! Numeric in observed responses (e.g. `699`, `799`), but the output document
//! copies them through verbatim, so both are modeled as raw
//! `serde_json::Value` rather than forced into a numeric type.
//!
//! ### `period`
//! An object with a `periodName` string (`"Lunch"`, `"Dinner"`). Entries have
//! been observed without it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON POST body for one pricing query.
///
/// Fully determined by (branch, date, slot); constructed fresh per call.
#[derive(Debug, Clone, Serialize)]
pub struct BuffetPriceRequest {
    pub branch_id: String,
    /// Reservation date in `"YYYY-MM-DD"` format.
    pub reservation_date: String,
    /// Reservation time in `"HH:MM:SS"` format.
    pub reservation_time: String,
    pub slot_id: i64,
}

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
pub struct BuffetPriceResponse {
    #[serde(default)]
    pub results: Option<ResultsSection>,
}

#[derive(Debug, Deserialize)]
pub struct ResultsSection {
    #[serde(default)]
    pub buffets: Option<BuffetsSection>,
}

#[derive(Debug, Deserialize)]
pub struct BuffetsSection {
    #[serde(default)]
    pub buffet_data: Vec<BuffetEntry>,
}

/// One priced meal-plan offering returned for a slot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuffetEntry {
    #[serde(default)]
    pub period: Option<PeriodInfo>,
    #[serde(default)]
    pub customer_type: Option<String>,
    #[serde(default)]
    pub food_type: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Value>,
    #[serde(default)]
    pub original_price: Option<Value>,
}

/// The seating period an entry belongs to.
#[derive(Debug, Deserialize)]
pub struct PeriodInfo {
    #[serde(default, rename = "periodName")]
    pub period_name: Option<String>,
}

impl BuffetPriceResponse {
    /// Extracts the buffet entries, treating any absent level of the
    /// `results.buffets.buffet_data` path as an empty list.
    #[must_use]
    pub fn into_entries(self) -> Vec<BuffetEntry> {
        self.results
            .and_then(|r| r.buffets)
            .map(|b| b.buffet_data)
            .unwrap_or_default()
    }
}
