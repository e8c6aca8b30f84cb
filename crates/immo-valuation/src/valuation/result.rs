use serde::{Deserialize, Serialize};

use super::catalogue::Feature;
use super::domain::SourceCategory;

/// Five-tier label comparing the final price to the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    HighlyCompetitive,
    Competitive,
    AtMarketAverage,
    AboveAverage,
    High,
}

impl MarketPosition {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.90 {
            Self::HighlyCompetitive
        } else if ratio < 0.97 {
            Self::Competitive
        } else if ratio <= 1.03 {
            Self::AtMarketAverage
        } else if ratio <= 1.10 {
            Self::AboveAverage
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighlyCompetitive => "highly competitive",
            Self::Competitive => "competitive",
            Self::AtMarketAverage => "at market average",
            Self::AboveAverage => "above average",
            Self::High => "high",
        }
    }
}

/// What produced an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "feature", rename_all = "snake_case")]
pub enum AdjustmentKind {
    Condition,
    EnergyClass,
    Exposure,
    Feature(Feature),
    Damping,
    Cap,
}

impl AdjustmentKind {
    pub fn is_correction(self) -> bool {
        matches!(self, Self::Damping | Self::Cap)
    }
}

/// One line of the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedAdjustment {
    pub kind: AdjustmentKind,
    pub name: String,
    /// Percentage of the base price.
    pub percent: f64,
    /// Monetary effect on the base price.
    pub impact: f64,
}

impl AppliedAdjustment {
    pub(crate) fn new(kind: AdjustmentKind, name: String, percent: f64, base_price: f64) -> Self {
        Self {
            kind,
            name,
            percent,
            impact: base_price * (percent / 100.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub category: SourceCategory,
    pub records: usize,
    /// Category average, area-scaled for sales and listings.
    pub average: i64,
    /// Normalised weight before renormalisation over populated categories.
    pub weight_percent: f64,
    /// Share of the base price actually contributed by the category.
    pub contribution: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceBreakdown {
    pub sales: CategoryDetail,
    pub listings: CategoryDetail,
    pub estimates: CategoryDetail,
}

impl SourceBreakdown {
    pub fn get(&self, category: SourceCategory) -> &CategoryDetail {
        match category {
            SourceCategory::Sales => &self.sales,
            SourceCategory::Listings => &self.listings,
            SourceCategory::Estimates => &self.estimates,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryDetail> {
        [&self.sales, &self.listings, &self.estimates].into_iter()
    }
}

/// Output of a single valuation. Monetary fields are rounded to whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub base_price: i64,
    pub final_price: i64,
    pub price_per_area: i64,
    pub low: i64,
    pub high: i64,
    pub confidence_score: u8,
    pub market_position: MarketPosition,
    /// Adjustment percentage actually applied after damping and capping.
    pub applied_percent: f64,
    pub interval_half_width: f64,
    pub coefficient_of_variation: f64,
    pub sources: SourceBreakdown,
    pub adjustments: Vec<AppliedAdjustment>,
}

impl ValuationResult {
    pub fn raw_adjustments(&self) -> impl Iterator<Item = &AppliedAdjustment> {
        self.adjustments
            .iter()
            .filter(|adjustment| !adjustment.kind.is_correction())
    }

    pub fn correction(&self, kind: AdjustmentKind) -> Option<&AppliedAdjustment> {
        self.adjustments
            .iter()
            .find(|adjustment| adjustment.kind == kind)
    }
}
