use chrono::NaiveDate;
use immo_valuation::config::parse_weights as parse_config_weights;
use immo_valuation::error::AppError;
use immo_valuation::import::ComparableImporter;
use immo_valuation::session::{ComparableIdGenerator, EstimationSession};
use immo_valuation::valuation::{
    ComparableRecord, PropertyAttributes, QualitativeAdjustments, SourceWeights,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// JSON body accepted by `estimate --input`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EstimationRequest {
    #[serde(default)]
    pub(crate) property: PropertyAttributes,
    #[serde(default)]
    pub(crate) comparables: Vec<ComparableRecord>,
    #[serde(default)]
    pub(crate) weights: Option<SourceWeights>,
    #[serde(default)]
    pub(crate) adjustments: Option<QualitativeAdjustments>,
}

impl EstimationRequest {
    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub(crate) fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Optional CSV exports appended to the request comparables.
#[derive(Debug, Default)]
pub(crate) struct CsvSources {
    pub(crate) sales: Option<PathBuf>,
    pub(crate) listings: Option<PathBuf>,
    pub(crate) estimates: Option<PathBuf>,
}

impl CsvSources {
    pub(crate) fn load(&self) -> Result<Vec<ComparableRecord>, AppError> {
        let mut records = Vec::new();
        if let Some(path) = &self.sales {
            records.extend(
                ComparableImporter::sales_from_path(path)?
                    .into_iter()
                    .map(ComparableRecord::Sale),
            );
        }
        if let Some(path) = &self.listings {
            records.extend(
                ComparableImporter::listings_from_path(path)?
                    .into_iter()
                    .map(ComparableRecord::Listing),
            );
        }
        if let Some(path) = &self.estimates {
            records.extend(
                ComparableImporter::estimates_from_path(path)?
                    .into_iter()
                    .map(ComparableRecord::Estimate),
            );
        }
        Ok(records)
    }
}

/// Feeds a request into `session`; weights and adjustments left out of the
/// request keep the session defaults.
pub(crate) fn hydrate_session<G>(
    session: &mut EstimationSession<G>,
    request: EstimationRequest,
    extra: Vec<ComparableRecord>,
) where
    G: ComparableIdGenerator,
{
    let EstimationRequest {
        property,
        comparables,
        weights,
        adjustments,
    } = request;

    session.set_property(property);
    if let Some(weights) = weights {
        session.set_weights(weights);
    }
    if let Some(adjustments) = adjustments {
        session.set_adjustments(adjustments);
    }
    for record in comparables.into_iter().chain(extra) {
        session.add_comparable(record);
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_weights(raw: &str) -> Result<SourceWeights, String> {
    parse_config_weights(raw).map_err(|err| err.to_string())
}
