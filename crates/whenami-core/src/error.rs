//! Error types for availability computation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AvailabilityError {
    /// A literal date did not match any accepted pattern.
    #[error("Invalid date format '{0}' (expected DD/MM/YYYY, DD-MM-YYYY, DD/MM/YY, or DD-MM-YY)")]
    InvalidDateFormat(String),

    /// A date range whose end precedes its start.
    #[error("Invalid date range: '{end}' precedes '{start}'")]
    InvalidRange { start: String, end: String },

    /// A timezone name that is not a valid IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// An event the normalizer cannot turn into a busy interval.
    /// Recovered locally: the event is dropped and the run continues.
    #[error("Malformed event '{title}': {reason}")]
    MalformedEvent { title: String, reason: String },
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
