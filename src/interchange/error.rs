//! Error type for the `interchange` feature's literal wire form (spec §6).

use thiserror::Error;

/// Errors that can occur converting a [`crate::literal::Literal`] to or from
/// its on-wire JSON form.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A bool-set wire string other than `"true"`, `"false"`, `"any"`, `"none"`.
    #[error("invalid bool-set wire value: {0}")]
    InvalidBoolSet(String),

    /// Enum domain name missing on the receiving end (spec §6 needs a domain
    /// name to reconstruct an `EnumSet`; the wire form carries it alongside
    /// the member list).
    #[error("missing enum domain name")]
    MissingEnumDomain,

    /// A quantity wire form whose unit string can't be resolved to a known
    /// unit (the core only round-trips units it itself produced).
    #[error("unrecognized unit symbol: {0}")]
    UnrecognizedUnit(String),
}
