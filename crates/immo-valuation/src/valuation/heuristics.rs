//! Dispersion-driven heuristics: interval width and confidence score.

/// Population standard deviation; zero for an empty slice.
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / count;
    variance.sqrt()
}

/// Half-width of the interval as a fraction of the final price.
pub fn interval_half_width(record_count: usize, coefficient_of_variation: f64) -> f64 {
    if record_count < 3 {
        0.15
    } else if record_count < 5 || coefficient_of_variation > 0.15 {
        0.12
    } else {
        0.08
    }
}

pub fn confidence_score(
    record_count: usize,
    coefficient_of_variation: f64,
    adjustment_entries: usize,
) -> u8 {
    let mut score = 40.0;

    score += (record_count as f64 * 6.0).min(30.0);

    score += if coefficient_of_variation < 0.05 {
        15.0
    } else if coefficient_of_variation < 0.10 {
        10.0
    } else if coefficient_of_variation < 0.15 {
        5.0
    } else {
        0.0
    };

    score += (adjustment_entries as f64 * 2.0).min(10.0);

    score.round().clamp(0.0, 100.0) as u8
}
