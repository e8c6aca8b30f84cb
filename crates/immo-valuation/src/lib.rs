//! Hybrid real-estate valuation.
//!
//! [`valuation::estimate`] blends registered sales, live listings and agency
//! estimates into a base price, applies damped qualitative adjustments and
//! reports an interval, a confidence score and a market position.
//! [`session::EstimationSession`] keeps the inputs of one estimation between
//! edits; [`import::ComparableImporter`] loads comparables from CSV exports.

pub mod config;
pub mod error;
pub mod import;
pub mod session;
pub mod telemetry;
pub mod valuation;
