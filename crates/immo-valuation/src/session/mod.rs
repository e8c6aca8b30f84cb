//! Caller-owned state container around the pricing engine.
//!
//! A session accumulates the subject property, its comparables, the source
//! weights and the qualitative selection, and caches the latest valuation.
//! Every mutation invalidates that cache; `recompute` refreshes it.

mod export;
mod ids;

pub use export::{EstimationExport, ExportMetadata, REAL_ESTATE_VERTICAL};
pub use ids::{ComparableIdGenerator, SequentialIdGenerator, UuidIdGenerator};

use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ValuationConfig;
use crate::valuation::{
    self, ComparableId, ComparableRecord, ComparableSet, PropertyAttributes,
    QualitativeAdjustments, SourceCategory, SourceWeights, ValuationError, ValuationResult,
};

/// Error raised by session operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("comparable {0:?} not found")]
    NotFound(ComparableId),
    #[error("comparable {id:?} is a {expected:?} record and cannot become {actual:?}")]
    CategoryMismatch {
        id: ComparableId,
        expected: SourceCategory,
        actual: SourceCategory,
    },
    #[error("no valuation has been computed for the current inputs")]
    NotComputed,
    #[error(transparent)]
    Valuation(#[from] ValuationError),
}

pub struct EstimationSession<G = UuidIdGenerator> {
    property: PropertyAttributes,
    comparables: ComparableSet,
    weights: SourceWeights,
    adjustments: QualitativeAdjustments,
    result: Option<ValuationResult>,
    export_id: Option<String>,
    default_weights: SourceWeights,
    ids: Arc<G>,
}

impl EstimationSession<UuidIdGenerator> {
    pub fn new(config: &ValuationConfig) -> Self {
        Self::with_id_generator(config, Arc::new(UuidIdGenerator))
    }
}

impl<G> EstimationSession<G>
where
    G: ComparableIdGenerator,
{
    pub fn with_id_generator(config: &ValuationConfig, ids: Arc<G>) -> Self {
        Self {
            property: PropertyAttributes::default(),
            comparables: ComparableSet::default(),
            weights: config.default_weights,
            adjustments: QualitativeAdjustments::default(),
            result: None,
            export_id: None,
            default_weights: config.default_weights,
            ids,
        }
    }

    pub fn property(&self) -> &PropertyAttributes {
        &self.property
    }

    pub fn comparables(&self) -> &ComparableSet {
        &self.comparables
    }

    pub fn weights(&self) -> &SourceWeights {
        &self.weights
    }

    pub fn adjustments(&self) -> &QualitativeAdjustments {
        &self.adjustments
    }

    /// Latest valuation, if the inputs have not changed since it was computed.
    pub fn result(&self) -> Option<&ValuationResult> {
        self.result.as_ref()
    }

    pub fn set_property(&mut self, property: PropertyAttributes) {
        self.property = property;
        self.invalidate();
    }

    pub fn update_property(&mut self, update: impl FnOnce(&mut PropertyAttributes)) {
        update(&mut self.property);
        self.invalidate();
    }

    /// Stores `record` under a freshly generated id, ignoring any id it carries.
    pub fn add_comparable(&mut self, mut record: ComparableRecord) -> ComparableId {
        let id = self.ids.next_id();
        record.set_id(id.clone());
        self.comparables.push(record);
        self.invalidate();
        id
    }

    pub fn comparable(&self, id: &ComparableId) -> Option<ComparableRecord> {
        self.comparables.get(id)
    }

    /// Replaces the fields of an existing comparable, keeping its id and category.
    pub fn update_comparable(
        &mut self,
        id: &ComparableId,
        mut record: ComparableRecord,
    ) -> Result<(), SessionError> {
        let existing = self
            .comparables
            .get(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;

        if existing.category() != record.category() {
            return Err(SessionError::CategoryMismatch {
                id: id.clone(),
                expected: existing.category(),
                actual: record.category(),
            });
        }

        record.set_id(id.clone());
        if !self.comparables.replace(record) {
            return Err(SessionError::NotFound(id.clone()));
        }
        self.invalidate();
        Ok(())
    }

    pub fn remove_comparable(
        &mut self,
        id: &ComparableId,
    ) -> Result<ComparableRecord, SessionError> {
        let removed = self
            .comparables
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.clone()))?;
        self.invalidate();
        Ok(removed)
    }

    pub fn set_weights(&mut self, weights: SourceWeights) {
        self.weights = weights;
        self.invalidate();
    }

    pub fn update_weights(&mut self, update: impl FnOnce(&mut SourceWeights)) {
        update(&mut self.weights);
        self.invalidate();
    }

    pub fn set_adjustments(&mut self, adjustments: QualitativeAdjustments) {
        self.adjustments = adjustments;
        self.invalidate();
    }

    pub fn update_adjustments(&mut self, update: impl FnOnce(&mut QualitativeAdjustments)) {
        update(&mut self.adjustments);
        self.invalidate();
    }

    /// Runs the engine on the current inputs and caches the outcome.
    pub fn recompute(&mut self) -> Result<&ValuationResult, SessionError> {
        match valuation::estimate(
            &self.property,
            &self.comparables,
            &self.weights,
            &self.adjustments,
        ) {
            Ok(result) => {
                info!(
                    comparables = self.comparables.len(),
                    final_price = result.final_price,
                    confidence = result.confidence_score,
                    "estimation recomputed"
                );
                self.export_id = Some(Uuid::new_v4().to_string());
                Ok(&*self.result.insert(result))
            }
            Err(err) => {
                warn!(error = %err, "estimation could not be computed");
                self.invalidate();
                Err(err.into())
            }
        }
    }

    /// Restores the default inputs and drops the cached valuation.
    pub fn reset(&mut self) {
        self.property = PropertyAttributes::default();
        self.comparables = ComparableSet::default();
        self.weights = self.default_weights;
        self.adjustments = QualitativeAdjustments::default();
        self.invalidate();
    }

    /// Summary of the cached valuation. The id is fixed per computed result,
    /// so exporting twice yields the same history entry.
    pub fn export(&self) -> Result<EstimationExport, SessionError> {
        let (result, id) = self
            .result
            .as_ref()
            .zip(self.export_id.as_ref())
            .ok_or(SessionError::NotComputed)?;
        let date = self
            .property
            .valuation_date
            .unwrap_or_else(|| Local::now().date_naive());

        Ok(EstimationExport {
            id: id.clone(),
            vertical: REAL_ESTATE_VERTICAL.to_string(),
            name: self.property.estimation_name.clone(),
            date,
            final_price: result.final_price,
            metadata: ExportMetadata {
                property_kind: self.property.kind,
                city: self.property.city.clone(),
                area: self.property.area,
                rooms: self.property.rooms,
            },
        })
    }

    fn invalidate(&mut self) {
        self.result = None;
        self.export_id = None;
    }
}
