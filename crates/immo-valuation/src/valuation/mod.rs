//! Hybrid price estimation: weighted blend of comparable sources followed by
//! damped, capped qualitative adjustments.

mod catalogue;
mod domain;
mod heuristics;
mod result;
mod rules;

#[cfg(test)]
mod tests;

pub use catalogue::{Condition, EnergyClass, Exposure, Feature, QualitativeAdjustments};
pub use domain::{
    AgencyEstimate, ComparableId, ComparableRecord, ComparableSet, ListingRecord,
    PropertyAttributes, PropertyKind, SaleRecord, SourceCategory, SourceWeights,
};
pub use heuristics::{confidence_score, interval_half_width, standard_deviation};
pub use result::{
    AdjustmentKind, AppliedAdjustment, CategoryDetail, MarketPosition, SourceBreakdown,
    ValuationResult,
};
pub use rules::{damping_coefficient, ADJUSTMENT_CAP_PERCENT};

use tracing::{debug, warn};

/// Smallest base price, in currency units, the engine will value.
const MIN_BASE_PRICE: f64 = 1.0;

/// Reasons a valuation cannot be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    #[error("no price source supplied")]
    NoPriceSource,
    #[error("property area must be a positive number, got {area}")]
    InvalidArea { area: f64 },
    #[error("invalid source weights: {reason}")]
    InvalidWeights { reason: String },
    #[error("no populated source category carries a positive weight")]
    NoWeightedSource,
    #[error("comparables produce a base price below one currency unit ({base_price})")]
    NonPositiveBasePrice { base_price: f64 },
}

/// Values `property` from its comparables. Pure: the inputs are only read.
pub fn estimate(
    property: &PropertyAttributes,
    comparables: &ComparableSet,
    weights: &SourceWeights,
    adjustments: &QualitativeAdjustments,
) -> Result<ValuationResult, ValuationError> {
    if comparables.is_empty() {
        return Err(ValuationError::NoPriceSource);
    }
    if !property.area.is_finite() || property.area <= 0.0 {
        return Err(ValuationError::InvalidArea {
            area: property.area,
        });
    }
    validate_weights(weights)?;

    let categories = category_averages(property.area, comparables);
    let total_weight = weights.total();

    let mut weighted_sum = 0.0;
    let mut effective_weight = 0.0;
    let mut contributions = [0.0; 3];
    for (index, category) in categories.iter().enumerate() {
        if category.populated {
            let normalized = weights.get(category.category) / total_weight;
            contributions[index] = category.average * normalized;
            weighted_sum += contributions[index];
            effective_weight += normalized;
        }
    }

    if effective_weight <= 0.0 {
        return Err(ValuationError::NoWeightedSource);
    }

    let base_price = weighted_sum / effective_weight;
    // At the -30% floor this still rounds to a final price of at least 1.
    if !base_price.is_finite() || base_price < MIN_BASE_PRICE {
        return Err(ValuationError::NonPositiveBasePrice { base_price });
    }

    let outcome = rules::apply_adjustments(base_price, adjustments);

    let adjusted = base_price * (1.0 + outcome.applied_percent / 100.0);
    let final_price = adjusted.round();
    let price_per_area = (final_price / property.area).round();

    let record_count = comparables.len();
    let deviation = standard_deviation(&comparables.raw_prices());
    let coefficient_of_variation = deviation / base_price;

    let half_width = interval_half_width(record_count, coefficient_of_variation);
    // Rounding must not collapse the interval onto the final price.
    let low = (final_price * (1.0 - half_width))
        .round()
        .min(final_price - 1.0);
    let high = (final_price * (1.0 + half_width))
        .round()
        .max(final_price + 1.0);

    let confidence = confidence_score(
        record_count,
        coefficient_of_variation,
        outcome.entries.len(),
    );
    let market_position = MarketPosition::from_ratio(final_price / base_price);

    let detail = |index: usize| {
        let category: &CategoryAverage = &categories[index];
        CategoryDetail {
            category: category.category,
            records: comparables.count(category.category),
            average: category.average.round() as i64,
            weight_percent: weights.get(category.category) / total_weight * 100.0,
            contribution: (contributions[index] / effective_weight).round() as i64,
        }
    };
    let sources = SourceBreakdown {
        sales: detail(0),
        listings: detail(1),
        estimates: detail(2),
    };

    debug!(
        records = record_count,
        base_price,
        raw_percent = outcome.raw_percent,
        damping = outcome.damping,
        applied_percent = outcome.applied_percent,
        final_price,
        confidence,
        "valuation computed"
    );

    Ok(ValuationResult {
        base_price: base_price.round() as i64,
        final_price: final_price as i64,
        price_per_area: price_per_area as i64,
        low: low as i64,
        high: high as i64,
        confidence_score: confidence,
        market_position,
        applied_percent: outcome.applied_percent,
        interval_half_width: half_width,
        coefficient_of_variation,
        sources,
        adjustments: outcome.entries,
    })
}

fn validate_weights(weights: &SourceWeights) -> Result<(), ValuationError> {
    for category in SourceCategory::ordered() {
        let weight = weights.get(category);
        if !weight.is_finite() || weight < 0.0 {
            return Err(ValuationError::InvalidWeights {
                reason: format!(
                    "{} weight must be a non-negative number, got {weight}",
                    category.label().to_lowercase()
                ),
            });
        }
    }

    if !weights.total().is_finite() {
        return Err(ValuationError::InvalidWeights {
            reason: "weights overflow when summed".to_string(),
        });
    }

    if weights.total() <= 0.0 {
        return Err(ValuationError::InvalidWeights {
            reason: "weights sum to zero".to_string(),
        });
    }

    Ok(())
}

struct CategoryAverage {
    category: SourceCategory,
    average: f64,
    populated: bool,
}

fn category_averages(subject_area: f64, comparables: &ComparableSet) -> [CategoryAverage; 3] {
    let sales = per_area_average(
        SourceCategory::Sales,
        comparables
            .sales
            .iter()
            .map(|record| (record.id.as_str(), record.price, record.area)),
    );
    let listings = per_area_average(
        SourceCategory::Listings,
        comparables
            .listings
            .iter()
            .map(|record| (record.id.as_str(), record.price, record.area)),
    );

    let midpoints: Vec<f64> = comparables
        .estimates
        .iter()
        .map(AgencyEstimate::midpoint)
        .collect();

    [
        CategoryAverage {
            category: SourceCategory::Sales,
            average: sales.map(|avg| avg * subject_area).unwrap_or(0.0),
            populated: sales.is_some(),
        },
        CategoryAverage {
            category: SourceCategory::Listings,
            average: listings.map(|avg| avg * subject_area).unwrap_or(0.0),
            populated: listings.is_some(),
        },
        CategoryAverage {
            category: SourceCategory::Estimates,
            average: mean(&midpoints).unwrap_or(0.0),
            populated: !midpoints.is_empty(),
        },
    ]
}

/// Mean price per square metre over records with a usable area.
fn per_area_average<'a>(
    category: SourceCategory,
    records: impl Iterator<Item = (&'a str, f64, f64)>,
) -> Option<f64> {
    let ratios: Vec<f64> = records
        .filter_map(|(id, price, area)| {
            if area.is_finite() && area > 0.0 {
                Some(price / area)
            } else {
                warn!(
                    category = category.label(),
                    comparable = id,
                    area,
                    "skipping comparable without a usable area"
                );
                None
            }
        })
        .collect();

    mean(&ratios)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
