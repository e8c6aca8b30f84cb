use super::common::*;
use crate::valuation::{
    estimate, AdjustmentKind, ComparableSet, Condition, EnergyClass, Exposure, Feature,
    MarketPosition, QualitativeAdjustments, SourceCategory, SourceWeights, ValuationError,
};

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

#[test]
fn base_price_matches_manual_weighting() {
    let comparables = lyon_comparables();
    let result = estimate(&property(65.0), &comparables, &default_weights(), &neutral())
        .expect("valuation succeeds");

    let sales_avg = (260_000.0 / 62.0 + 275_000.0 / 68.0) / 2.0 * 65.0;
    let listings_avg = (285_000.0 / 64.0 + 270_000.0 / 66.0) / 2.0 * 65.0;
    let estimates_avg = (255_000.0 + 290_000.0) / 2.0;
    let expected: f64 = sales_avg * 0.5 + listings_avg * 0.3 + estimates_avg * 0.2;

    assert_eq!(result.base_price, expected.round() as i64);
    assert_eq!(result.base_price, 271_666);
    assert_eq!(result.sources.sales.average, 267_724);
    assert_eq!(result.sources.listings.average, 277_681);
    assert_eq!(result.sources.estimates.average, 272_500);
    assert_eq!(result.sources.sales.contribution, 133_862);
    assert_eq!(result.sources.listings.contribution, 83_304);
    assert_eq!(result.sources.estimates.contribution, 54_500);
    assert!(close(result.sources.sales.weight_percent, 50.0));
    assert!(close(result.sources.listings.weight_percent, 30.0));
    assert!(close(result.sources.estimates.weight_percent, 20.0));
}

#[test]
fn neutral_adjustments_leave_base_untouched() {
    let result = estimate(&property(65.0), &lyon_comparables(), &default_weights(), &neutral())
        .expect("valuation succeeds");

    assert!(result.adjustments.is_empty());
    assert_eq!(result.final_price, result.base_price);
    assert_eq!(result.market_position, MarketPosition::AtMarketAverage);
    assert_eq!(result.price_per_area, (271_666.0_f64 / 65.0).round() as i64);
}

#[test]
fn lyon_sample_produces_full_report() {
    let adjustments = QualitativeAdjustments {
        condition: Condition::Good,
        energy_class: EnergyClass::C,
        exposure: Exposure::South,
        ..QualitativeAdjustments::default()
    }
    .with(&[
        Feature::Balcony,
        Feature::Parking,
        Feature::ClearView,
        Feature::NearTransit,
        Feature::WellMaintainedBuilding,
    ]);

    let result = estimate(
        &property(65.0),
        &lyon_comparables(),
        &default_weights(),
        &adjustments,
    )
    .expect("valuation succeeds");

    // 7 factors summing to +33%, damped by 0.70.
    assert_eq!(result.adjustments.len(), 8);
    let damping = result
        .correction(AdjustmentKind::Damping)
        .expect("damping entry present");
    assert!(close(damping.percent, -9.9));
    assert!(damping.name.contains("7 adjustments"));
    assert!(damping.name.contains("70%"));
    assert!(result.correction(AdjustmentKind::Cap).is_none());
    assert!(close(result.applied_percent, 23.1));

    assert_eq!(result.final_price, 334_421);
    assert_eq!(result.price_per_area, 5_145);
    assert_eq!(result.interval_half_width, 0.08);
    assert_eq!(result.low, 307_667);
    assert_eq!(result.high, 361_175);
    assert_eq!(result.confidence_score, 95);
    assert_eq!(result.market_position, MarketPosition::High);
}

#[test]
fn empty_category_is_excluded_from_weighting() {
    let mut comparables = lyon_comparables();
    comparables.listings.clear();
    let weights = SourceWeights::new(20.0, 60.0, 20.0);

    let result = estimate(&property(65.0), &comparables, &weights, &neutral())
        .expect("valuation succeeds");

    let sales_avg = (260_000.0 / 62.0 + 275_000.0 / 68.0) / 2.0 * 65.0;
    let expected: f64 = (sales_avg * 0.2 + 272_500.0 * 0.2) / 0.4;
    assert_eq!(result.base_price, expected.round() as i64);
    assert_eq!(result.base_price, 270_112);
    assert_eq!(result.sources.listings.contribution, 0);
    assert_eq!(result.sources.listings.records, 0);
    assert!(close(result.sources.listings.weight_percent, 60.0));
    assert_eq!(
        result.sources.sales.contribution + result.sources.estimates.contribution,
        result.base_price
    );
}

#[test]
fn single_agency_estimate_is_taken_verbatim() {
    let comparables = ComparableSet {
        estimates: vec![estimate_range("only", 200_000.0, 220_000.0)],
        ..ComparableSet::default()
    };
    let weights = SourceWeights::new(0.0, 0.0, 20.0);

    let result = estimate(&property(70.0), &comparables, &weights, &neutral())
        .expect("valuation succeeds");

    assert_eq!(result.base_price, 210_000);
    assert_eq!(result.final_price, 210_000);
    assert_eq!(result.interval_half_width, 0.15);
    assert_eq!(result.low, 178_500);
    assert_eq!(result.high, 241_500);
    // 40 + one record + zero dispersion bonus, no adjustments.
    assert_eq!(result.confidence_score, 61);
}

#[test]
fn no_comparables_is_rejected() {
    let err = estimate(
        &property(65.0),
        &ComparableSet::default(),
        &default_weights(),
        &neutral(),
    )
    .expect_err("empty input must fail");

    assert_eq!(err, ValuationError::NoPriceSource);
    assert_eq!(err.to_string(), "no price source supplied");
}

#[test]
fn degenerate_inputs_surface_typed_errors() {
    let comparables = lyon_comparables();

    match estimate(&property(0.0), &comparables, &default_weights(), &neutral()) {
        Err(ValuationError::InvalidArea { area }) => assert_eq!(area, 0.0),
        other => panic!("expected invalid area, got {other:?}"),
    }

    match estimate(
        &property(65.0),
        &comparables,
        &SourceWeights::new(0.0, 0.0, 0.0),
        &neutral(),
    ) {
        Err(ValuationError::InvalidWeights { reason }) => assert!(reason.contains("zero")),
        other => panic!("expected invalid weights, got {other:?}"),
    }

    match estimate(
        &property(65.0),
        &comparables,
        &SourceWeights::new(50.0, -10.0, 20.0),
        &neutral(),
    ) {
        Err(ValuationError::InvalidWeights { reason }) => assert!(reason.contains("listings")),
        other => panic!("expected invalid weights, got {other:?}"),
    }

    let estimates_only = ComparableSet {
        estimates: vec![estimate_range("e", 200_000.0, 220_000.0)],
        ..ComparableSet::default()
    };
    assert_eq!(
        estimate(
            &property(65.0),
            &estimates_only,
            &SourceWeights::new(50.0, 50.0, 0.0),
            &neutral(),
        ),
        Err(ValuationError::NoWeightedSource)
    );
}

#[test]
fn zero_area_comparables_are_skipped_in_averages() {
    let comparables = ComparableSet {
        sales: vec![sale("good", 400_000.0, 100.0), sale("bad", 300_000.0, 0.0)],
        ..ComparableSet::default()
    };

    let result = estimate(&property(100.0), &comparables, &default_weights(), &neutral())
        .expect("valuation succeeds");

    assert_eq!(result.base_price, 400_000);
    assert_eq!(result.sources.sales.records, 2);
    assert!(result.coefficient_of_variation > 0.0);

    let unusable = ComparableSet {
        sales: vec![sale("bad", 300_000.0, 0.0)],
        ..ComparableSet::default()
    };
    assert_eq!(
        estimate(&property(100.0), &unusable, &default_weights(), &neutral()),
        Err(ValuationError::NoWeightedSource)
    );
}

#[test]
fn zero_priced_comparables_cannot_anchor_a_valuation() {
    let result = estimate(
        &property(100.0),
        &flat_market(0.0),
        &default_weights(),
        &neutral(),
    );

    assert!(matches!(
        result,
        Err(ValuationError::NonPositiveBasePrice { .. })
    ));
}

#[test]
fn interval_and_score_invariants_hold_across_inputs() {
    let scenarios: Vec<(ComparableSet, QualitativeAdjustments)> = vec![
        (lyon_comparables(), neutral()),
        (lyon_comparables(), with_features(11)),
        (flat_market(150_000.0), QualitativeAdjustments::default()),
        (
            flat_market(90_000.0),
            QualitativeAdjustments {
                condition: Condition::NeedsRenovation,
                energy_class: EnergyClass::G,
                exposure: Exposure::North,
                ..QualitativeAdjustments::default()
            },
        ),
    ];

    for (comparables, adjustments) in scenarios {
        let result = estimate(&property(100.0), &comparables, &default_weights(), &adjustments)
            .expect("valuation succeeds");

        assert!(result.final_price > 0);
        assert!(result.low < result.final_price);
        assert!(result.final_price < result.high);
        assert!(result.confidence_score <= 100);
        let base = result.base_price as f64;
        assert!(result.final_price as f64 <= base * 1.30 + 1.0);
        assert!(result.final_price as f64 >= base * 0.70 - 1.0);
    }
}

#[test]
fn market_position_bands_are_inclusive_in_the_middle() {
    assert_eq!(
        MarketPosition::from_ratio(0.89),
        MarketPosition::HighlyCompetitive
    );
    assert_eq!(MarketPosition::from_ratio(0.90), MarketPosition::Competitive);
    assert_eq!(
        MarketPosition::from_ratio(0.97),
        MarketPosition::AtMarketAverage
    );
    assert_eq!(
        MarketPosition::from_ratio(1.03),
        MarketPosition::AtMarketAverage
    );
    assert_eq!(MarketPosition::from_ratio(1.10), MarketPosition::AboveAverage);
    assert_eq!(MarketPosition::from_ratio(1.11), MarketPosition::High);
    assert_eq!(MarketPosition::Competitive.label(), "competitive");
}

#[test]
fn breakdown_is_reported_in_category_order() {
    let result = estimate(&property(65.0), &lyon_comparables(), &default_weights(), &neutral())
        .expect("valuation succeeds");

    let order: Vec<SourceCategory> = result.sources.iter().map(|detail| detail.category).collect();
    assert_eq!(order, SourceCategory::ordered().to_vec());
    assert_eq!(result.sources.get(SourceCategory::Listings).records, 2);
}

#[test]
fn sub_unit_base_prices_are_rejected() {
    let comparables = ComparableSet {
        estimates: vec![estimate_range("tiny", 0.4, 0.4)],
        ..ComparableSet::default()
    };

    match estimate(&property(10.0), &comparables, &default_weights(), &neutral()) {
        Err(ValuationError::NonPositiveBasePrice { base_price }) => {
            assert!(close(base_price, 0.4))
        }
        other => panic!("expected a rejected base price, got {other:?}"),
    }
}

#[test]
fn interval_stays_open_around_tiny_prices() {
    let comparables = ComparableSet {
        estimates: vec![estimate_range("small", 3.0, 3.0)],
        ..ComparableSet::default()
    };

    let result = estimate(&property(10.0), &comparables, &default_weights(), &neutral())
        .expect("valuation succeeds");

    assert_eq!(result.final_price, 3);
    assert_eq!(result.low, 2);
    assert_eq!(result.high, 4);

    let one_unit = ComparableSet {
        estimates: vec![estimate_range("unit", 1.0, 1.0)],
        ..ComparableSet::default()
    };
    let renovation = QualitativeAdjustments {
        condition: Condition::NeedsRenovation,
        energy_class: EnergyClass::G,
        exposure: Exposure::North,
        ..QualitativeAdjustments::default()
    };
    let floor = estimate(&property(10.0), &one_unit, &default_weights(), &renovation)
        .expect("valuation succeeds");

    assert_eq!(floor.final_price, 1);
    assert!(floor.low < floor.final_price && floor.final_price < floor.high);
}

#[test]
fn overflowing_weight_sum_is_invalid() {
    let weights = SourceWeights::new(f64::MAX, f64::MAX, f64::MAX);

    match estimate(&property(65.0), &lyon_comparables(), &weights, &neutral()) {
        Err(ValuationError::InvalidWeights { reason }) => assert!(reason.contains("overflow")),
        other => panic!("expected invalid weights, got {other:?}"),
    }
}
