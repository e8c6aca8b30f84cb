//! Comparable import from local CSV exports (land registry extracts, saved
//! listing searches, agency quotes). Imported records carry no id; a session
//! assigns one when they are added.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::valuation::{AgencyEstimate, ListingRecord, SaleRecord};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read comparables file: {}", err),
            ImportError::Csv(err) => write!(f, "invalid comparables CSV data: {}", err),
            ImportError::InvalidRow { line, reason } => {
                write!(f, "rejected comparable on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ComparableImporter;

impl ComparableImporter {
    /// Columns: `price, area, date, location, comment`.
    pub fn sales_from_reader<R: Read>(reader: R) -> Result<Vec<SaleRecord>, ImportError> {
        parser::parse_sales(reader)
    }

    pub fn sales_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::sales_from_reader(file)
    }

    /// Columns: `price, area, rooms, source, link, comment`.
    pub fn listings_from_reader<R: Read>(reader: R) -> Result<Vec<ListingRecord>, ImportError> {
        parser::parse_listings(reader)
    }

    pub fn listings_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<ListingRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::listings_from_reader(file)
    }

    /// Columns: `min_price, max_price, source, date, comment`.
    pub fn estimates_from_reader<R: Read>(reader: R) -> Result<Vec<AgencyEstimate>, ImportError> {
        parser::parse_estimates(reader)
    }

    pub fn estimates_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<AgencyEstimate>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::estimates_from_reader(file)
    }
}
