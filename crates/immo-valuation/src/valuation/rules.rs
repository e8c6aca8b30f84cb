use super::catalogue::{Feature, QualitativeAdjustments};
use super::result::{AdjustmentKind, AppliedAdjustment};

/// Bound on the total adjustment, in percent of the base price.
pub const ADJUSTMENT_CAP_PERCENT: f64 = 30.0;

pub(crate) struct AdjustmentOutcome {
    pub entries: Vec<AppliedAdjustment>,
    pub raw_percent: f64,
    pub damping: f64,
    pub applied_percent: f64,
}

/// Multiplier applied to the summed percentages once several factors stack.
pub fn damping_coefficient(adjustment_count: usize) -> f64 {
    let n = adjustment_count as f64;
    match adjustment_count {
        0..=3 => 1.0,
        4..=6 => 1.0 - (n - 3.0) * 0.05,
        7..=10 => 0.75 - (n - 6.0) * 0.05,
        _ => 0.45,
    }
}

pub(crate) fn apply_adjustments(
    base_price: f64,
    adjustments: &QualitativeAdjustments,
) -> AdjustmentOutcome {
    let mut entries = Vec::new();

    let condition = adjustments.condition;
    if condition.percent() != 0.0 {
        entries.push(AppliedAdjustment::new(
            AdjustmentKind::Condition,
            format!("Condition: {}", condition.label()),
            condition.percent(),
            base_price,
        ));
    }

    let energy = adjustments.energy_class;
    if energy.percent() != 0.0 {
        entries.push(AppliedAdjustment::new(
            AdjustmentKind::EnergyClass,
            format!("Energy class: {}", energy.label()),
            energy.percent(),
            base_price,
        ));
    }

    let exposure = adjustments.exposure;
    if exposure.percent() != 0.0 {
        entries.push(AppliedAdjustment::new(
            AdjustmentKind::Exposure,
            format!("Exposure: {}", exposure.label()),
            exposure.percent(),
            base_price,
        ));
    }

    for feature in Feature::ordered() {
        if adjustments.has(feature) {
            entries.push(AppliedAdjustment::new(
                AdjustmentKind::Feature(feature),
                feature.label().to_string(),
                feature.percent(),
                base_price,
            ));
        }
    }

    let count = entries.len();
    let raw_percent: f64 = entries.iter().map(|entry| entry.percent).sum();
    let damping = damping_coefficient(count);
    let damped = raw_percent * damping;

    if damping < 1.0 {
        let removed = raw_percent - damped;
        entries.push(AppliedAdjustment::new(
            AdjustmentKind::Damping,
            format!(
                "Damping ({count} adjustments, coeff. {:.0}%)",
                damping * 100.0
            ),
            -removed,
            base_price,
        ));
    }

    let applied_percent = damped.clamp(-ADJUSTMENT_CAP_PERCENT, ADJUSTMENT_CAP_PERCENT);
    if applied_percent != damped {
        entries.push(AppliedAdjustment::new(
            AdjustmentKind::Cap,
            format!("Cap ±{ADJUSTMENT_CAP_PERCENT:.0}% applied"),
            applied_percent - damped,
            base_price,
        ));
    }

    AdjustmentOutcome {
        entries,
        raw_percent,
        damping,
        applied_percent,
    }
}
