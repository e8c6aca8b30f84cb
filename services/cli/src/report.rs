use immo_valuation::error::AppError;
use immo_valuation::session::EstimationExport;
use immo_valuation::valuation::{PropertyAttributes, ValuationResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    property: &'a PropertyAttributes,
    result: &'a ValuationResult,
    export: &'a EstimationExport,
}

pub(crate) fn print_json(
    property: &PropertyAttributes,
    result: &ValuationResult,
    export: &EstimationExport,
) -> Result<(), AppError> {
    let report = JsonReport {
        property,
        result,
        export,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn render_valuation(property: &PropertyAttributes, result: &ValuationResult) {
    let name = if property.estimation_name.is_empty() {
        "Unnamed estimation"
    } else {
        property.estimation_name.as_str()
    };
    println!(
        "{} ({}, {} m², {})",
        name,
        property.kind.label(),
        property.area,
        if property.city.is_empty() {
            "unknown city"
        } else {
            property.city.as_str()
        }
    );

    println!("\nValuation");
    println!("  Base price:       {}", euros(result.base_price));
    println!("  Final price:      {}", euros(result.final_price));
    println!("  Price per m²:     {}", euros(result.price_per_area));
    println!(
        "  Range:            {} to {} (±{:.0}%)",
        euros(result.low),
        euros(result.high),
        result.interval_half_width * 100.0
    );
    println!("  Confidence:       {}/100", result.confidence_score);
    println!("  Market position:  {}", result.market_position.label());

    println!("\nSources");
    for detail in result.sources.iter() {
        if detail.records == 0 {
            println!(
                "  {:<10} no records (weight {:.1}% unused)",
                detail.category.label(),
                detail.weight_percent
            );
            continue;
        }
        println!(
            "  {:<10} {} record(s), average {}, weight {:.1}%, contribution {}",
            detail.category.label(),
            detail.records,
            euros(detail.average),
            detail.weight_percent,
            euros(detail.contribution)
        );
    }

    if result.adjustments.is_empty() {
        println!("\nAdjustments: none");
    } else {
        println!(
            "\nAdjustments (applied {:+.1}%)",
            result.applied_percent
        );
        for entry in &result.adjustments {
            println!(
                "  {:<48} {:>+6.1}%  {}",
                entry.name,
                entry.percent,
                signed_euros(entry.impact.round() as i64)
            );
        }
    }
}

/// `334421` -> `334 421 €`.
pub(crate) fn euros(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{grouped} €")
    } else {
        format!("{grouped} €")
    }
}

fn signed_euros(amount: i64) -> String {
    if amount > 0 {
        format!("+{}", euros(amount))
    } else {
        euros(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euros_groups_thousands() {
        assert_eq!(euros(0), "0 €");
        assert_eq!(euros(950), "950 €");
        assert_eq!(euros(334_421), "334 421 €");
        assert_eq!(euros(1_250_000), "1 250 000 €");
        assert_eq!(euros(-8_000), "-8 000 €");
        assert_eq!(signed_euros(32_000), "+32 000 €");
    }
}
