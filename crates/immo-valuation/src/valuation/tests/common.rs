use chrono::NaiveDate;

use crate::valuation::{
    AgencyEstimate, ComparableId, ComparableSet, Feature, ListingRecord, PropertyAttributes,
    QualitativeAdjustments, SaleRecord, SourceWeights,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn property(area: f64) -> PropertyAttributes {
    PropertyAttributes {
        estimation_name: "T3 Lyon 3e".to_string(),
        city: "Lyon".to_string(),
        postal_code: "69003".to_string(),
        area,
        ..PropertyAttributes::default()
    }
}

pub(super) fn sale(id: &str, price: f64, area: f64) -> SaleRecord {
    SaleRecord {
        id: ComparableId(id.to_string()),
        price,
        area,
        date: Some(date(2025, 6, 15)),
        location: "10 rue Duquesne".to_string(),
        comment: String::new(),
    }
}

pub(super) fn listing(id: &str, price: f64, area: f64) -> ListingRecord {
    ListingRecord {
        id: ComparableId(id.to_string()),
        price,
        area,
        rooms: Some(3),
        source: "Leboncoin".to_string(),
        link: String::new(),
        comment: String::new(),
    }
}

pub(super) fn estimate_range(id: &str, min_price: f64, max_price: f64) -> AgencyEstimate {
    AgencyEstimate {
        id: ComparableId(id.to_string()),
        min_price,
        max_price,
        source: "Agence locale".to_string(),
        date: Some(date(2026, 1, 15)),
        comment: String::new(),
    }
}

/// Two sales, two listings and one agency range around 270k for 65 m².
pub(super) fn lyon_comparables() -> ComparableSet {
    ComparableSet {
        sales: vec![
            sale("1", 260_000.0, 62.0),
            sale("2", 275_000.0, 68.0),
        ],
        listings: vec![
            listing("3", 285_000.0, 64.0),
            listing("4", 270_000.0, 66.0),
        ],
        estimates: vec![estimate_range("5", 255_000.0, 290_000.0)],
    }
}

pub(super) fn default_weights() -> SourceWeights {
    SourceWeights::new(50.0, 30.0, 20.0)
}

pub(super) fn neutral() -> QualitativeAdjustments {
    QualitativeAdjustments::neutral()
}

/// Neutral selection with the first `count` boolean features switched on.
pub(super) fn with_features(count: usize) -> QualitativeAdjustments {
    let features: Vec<Feature> = Feature::ordered().into_iter().take(count).collect();
    neutral().with(&features)
}

/// Sales-only set whose base price is exactly `price` for a 100 m² subject.
pub(super) fn flat_market(price: f64) -> ComparableSet {
    ComparableSet {
        sales: vec![sale("flat", price, 100.0)],
        ..ComparableSet::default()
    }
}
