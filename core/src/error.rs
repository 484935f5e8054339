//! Error types for scansion.

/// Failures surfaced to callers of the analysis API.
///
/// Rule precondition failures never show up here; they only exclude a form
/// from the admissible set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArudError {
    #[error("Could not detect any valid meter.")]
    NoMeterDetected,

    #[error("Meter data not found: {0}")]
    UnknownMeter(String),
}

pub type Result<T> = std::result::Result<T, ArudError>;
