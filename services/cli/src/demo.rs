use crate::infra::{hydrate_session, parse_date, parse_weights, CsvSources, EstimationRequest};
use crate::report::{print_json, render_valuation};
use chrono::NaiveDate;
use clap::Args;
use immo_valuation::config::AppConfig;
use immo_valuation::error::AppError;
use immo_valuation::session::{
    ComparableIdGenerator, EstimationSession, SequentialIdGenerator,
};
use immo_valuation::valuation::{
    AgencyEstimate, ComparableId, ComparableRecord, Condition, EnergyClass, Exposure, Feature,
    ListingRecord, PropertyAttributes, PropertyKind, QualitativeAdjustments, SaleRecord,
    SourceWeights, ValuationResult, ADJUSTMENT_CAP_PERCENT,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Valuation date recorded in the export (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Print the result as JSON instead of the text report.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EstimateArgs {
    /// JSON request with `property`, `comparables`, `weights` and `adjustments`.
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// CSV of registered sales (price, area, date, location, comment).
    #[arg(long)]
    pub(crate) sales_csv: Option<PathBuf>,
    /// CSV of listings (price, area, rooms, source, link, comment).
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
    /// CSV of agency estimates (min_price, max_price, source, date, comment).
    #[arg(long)]
    pub(crate) estimates_csv: Option<PathBuf>,
    /// Source weights as `sales,listings,estimates`, e.g. `50,30,20`.
    #[arg(long, value_parser = parse_weights)]
    pub(crate) weights: Option<SourceWeights>,
    /// Print the result as JSON instead of the text report.
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    let mut session = EstimationSession::with_id_generator(
        &config.valuation,
        Arc::new(SequentialIdGenerator::new()),
    );
    let request = lyon_sample(args.date);
    hydrate_session(&mut session, request, Vec::new());

    let result = session.recompute()?.clone();
    let export = session.export()?;

    if args.json {
        return print_json(session.property(), &result, &export);
    }

    println!("Property valuation demo");
    render_valuation(session.property(), &result);
    render_checks(&result);
    println!("\nExport id: {} ({})", export.id, export.date);
    Ok(())
}

pub(crate) fn run_estimate(config: &AppConfig, args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        input,
        sales_csv,
        listings_csv,
        estimates_csv,
        weights,
        json,
    } = args;

    let request = match input {
        Some(path) => EstimationRequest::from_path(&path)?,
        None => EstimationRequest::default(),
    };
    let extra = CsvSources {
        sales: sales_csv,
        listings: listings_csv,
        estimates: estimates_csv,
    }
    .load()?;

    let mut session = EstimationSession::new(&config.valuation);
    hydrate_session(&mut session, request, extra);
    if let Some(weights) = weights {
        session.set_weights(weights);
    }

    report_session(&mut session, json)
}

fn report_session<G>(session: &mut EstimationSession<G>, json: bool) -> Result<(), AppError>
where
    G: ComparableIdGenerator,
{
    let result = session.recompute()?.clone();
    let export = session.export()?;

    if json {
        print_json(session.property(), &result, &export)
    } else {
        render_valuation(session.property(), &result);
        Ok(())
    }
}

fn render_checks(result: &ValuationResult) {
    let base = result.base_price as f64;
    let cap = ADJUSTMENT_CAP_PERCENT / 100.0;
    let contributions: i64 = result.sources.iter().map(|detail| detail.contribution).sum();

    let checks = [
        (
            "final price within the adjustment cap",
            (result.final_price as f64) <= base * (1.0 + cap) + 1.0
                && (result.final_price as f64) >= base * (1.0 - cap) - 1.0,
        ),
        (
            "interval brackets the final price",
            result.low < result.final_price && result.final_price < result.high,
        ),
        (
            "source contributions add up to the base price",
            (contributions - result.base_price).abs() <= 2,
        ),
        ("confidence score within 0-100", result.confidence_score <= 100),
    ];

    println!("\nChecks");
    for (label, passed) in checks {
        println!("  [{}] {}", if passed { "ok" } else { "!!" }, label);
    }
}

/// T3 in Lyon 3e with two sales, two listings and one agency range.
fn lyon_sample(date: Option<NaiveDate>) -> EstimationRequest {
    let property = PropertyAttributes {
        estimation_name: "T3 Lyon 3e".to_string(),
        valuation_date: date,
        kind: PropertyKind::Apartment,
        address: "15 rue de la Part-Dieu".to_string(),
        city: "Lyon".to_string(),
        postal_code: "69003".to_string(),
        area: 65.0,
        rooms: 3,
        bedrooms: 2,
        floor: 3,
        elevator: true,
        construction_year: 1975,
    };

    let sale = |price: f64, area: f64, date: (i32, u32, u32), location: &str| {
        ComparableRecord::Sale(SaleRecord {
            id: ComparableId::default(),
            price,
            area,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
            location: location.to_string(),
            comment: String::new(),
        })
    };
    let listing = |price: f64, area: f64, source: &str| {
        ComparableRecord::Listing(ListingRecord {
            id: ComparableId::default(),
            price,
            area,
            rooms: Some(3),
            source: source.to_string(),
            link: String::new(),
            comment: String::new(),
        })
    };

    let comparables = vec![
        sale(260_000.0, 62.0, (2025, 6, 15), "10 rue Duquesne"),
        sale(275_000.0, 68.0, (2025, 9, 2), "22 rue Vendome"),
        listing(285_000.0, 64.0, "SeLoger"),
        listing(270_000.0, 66.0, "Leboncoin"),
        ComparableRecord::Estimate(AgencyEstimate {
            id: ComparableId::default(),
            min_price: 255_000.0,
            max_price: 290_000.0,
            source: "Agence locale".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15),
            comment: "Visit on site".to_string(),
        }),
    ];

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

    EstimationRequest {
        property,
        comparables,
        weights: None,
        adjustments: Some(adjustments),
    }
}
