use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::valuation::{AgencyEstimate, ComparableId, ListingRecord, SaleRecord};

use super::ImportError;

#[derive(Debug, Deserialize)]
struct SaleRow {
    #[serde(alias = "prix")]
    price: f64,
    #[serde(alias = "surface")]
    area: f64,
    #[serde(default, deserialize_with = "optional_date")]
    date: Option<NaiveDate>,
    #[serde(default, alias = "adresse", alias = "address")]
    location: String,
    #[serde(default, alias = "commentaire")]
    comment: String,
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(alias = "prix")]
    price: f64,
    #[serde(alias = "surface")]
    area: f64,
    #[serde(default, alias = "pieces")]
    rooms: Option<u32>,
    #[serde(default)]
    source: String,
    #[serde(default, alias = "lien")]
    link: String,
    #[serde(default, alias = "commentaire")]
    comment: String,
}

#[derive(Debug, Deserialize)]
struct EstimateRow {
    #[serde(alias = "prix_min")]
    min_price: f64,
    #[serde(alias = "prix_max")]
    max_price: f64,
    #[serde(default)]
    source: String,
    #[serde(default, deserialize_with = "optional_date")]
    date: Option<NaiveDate>,
    #[serde(default, alias = "commentaire")]
    comment: String,
}

pub(crate) fn parse_sales<R: Read>(reader: R) -> Result<Vec<SaleRecord>, ImportError> {
    parse_rows(reader, |line, row: SaleRow| {
        require_price(line, "price", row.price)?;
        Ok(SaleRecord {
            id: ComparableId::default(),
            price: row.price,
            area: row.area,
            date: row.date,
            location: row.location,
            comment: row.comment,
        })
    })
}

pub(crate) fn parse_listings<R: Read>(reader: R) -> Result<Vec<ListingRecord>, ImportError> {
    parse_rows(reader, |line, row: ListingRow| {
        require_price(line, "price", row.price)?;
        Ok(ListingRecord {
            id: ComparableId::default(),
            price: row.price,
            area: row.area,
            rooms: row.rooms,
            source: row.source,
            link: row.link,
            comment: row.comment,
        })
    })
}

pub(crate) fn parse_estimates<R: Read>(reader: R) -> Result<Vec<AgencyEstimate>, ImportError> {
    parse_rows(reader, |line, row: EstimateRow| {
        require_price(line, "min_price", row.min_price)?;
        require_price(line, "max_price", row.max_price)?;
        if row.min_price > row.max_price {
            return Err(ImportError::InvalidRow {
                line,
                reason: format!(
                    "min_price {} exceeds max_price {}",
                    row.min_price, row.max_price
                ),
            });
        }
        Ok(AgencyEstimate {
            id: ComparableId::default(),
            min_price: row.min_price,
            max_price: row.max_price,
            source: row.source,
            date: row.date,
            comment: row.comment,
        })
    })
}

fn parse_rows<R, Row, T, F>(reader: R, mut convert: F) -> Result<Vec<T>, ImportError>
where
    R: Read,
    Row: for<'de> Deserialize<'de>,
    F: FnMut(u64, Row) -> Result<T, ImportError>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut records = Vec::new();

    while csv_reader.read_record(&mut record)? {
        // Quoted fields may span lines; report where the record starts.
        let line = record.position().map_or(0, |position| position.line());
        let row: Row = record.deserialize(Some(&headers))?;
        records.push(convert(line, row)?);
    }

    Ok(records)
}

fn require_price(line: u64, field: &str, value: f64) -> Result<(), ImportError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ImportError::InvalidRow {
            line,
            reason: format!("{field} must be a positive amount, got {value}"),
        })
    }
}

fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date '{raw}'"))),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    // DVF exports use day-first dates.
    NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_common_layouts() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        assert_eq!(parse_date("2025-06-15"), Some(expected));
        assert_eq!(parse_date("2025-06-15T09:30:00Z"), Some(expected));
        assert_eq!(parse_date("15/06/2025"), Some(expected));
        assert_eq!(parse_date("June 15th"), None);
    }
}
