use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::valuation::PropertyKind;

/// Vertical tag used by the shared estimation history.
pub const REAL_ESTATE_VERTICAL: &str = "real_estate";

/// Compact summary of a finished estimation, suitable for a cross-vertical
/// history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationExport {
    pub id: String,
    pub vertical: String,
    pub name: String,
    pub date: NaiveDate,
    pub final_price: i64,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub property_kind: PropertyKind,
    pub city: String,
    pub area: f64,
    pub rooms: u32,
}
