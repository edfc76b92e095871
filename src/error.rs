use thiserror::Error;

/// Failures while loading the canonical text for an alignment run.
///
/// Every stage after loading is total, so these are the only errors an
/// alignment can produce. Any of them aborts the whole run.
#[derive(Debug, Error)]
pub enum AlignError {
    /// The text source answered with a non-success status
    #[error("failed fetch for ref \"{reference}\": {status}")]
    Fetch {
        reference: String,
        status: reqwest::StatusCode,
    },
    /// The request never produced a usable response (network, body decode)
    #[error("request for ref \"{reference}\" failed: {source}")]
    Request {
        reference: String,
        #[source]
        source: reqwest::Error,
    },
    /// The configured endpoint cannot address the reference
    #[error("cannot build a text url for \"{reference}\" from {base_url}")]
    InvalidUrl { reference: String, base_url: String },
    /// The response did not carry the per-segment text array
    #[error("text response for \"{reference}\" is malformed: {reason}")]
    Shape { reference: String, reason: String },
}

impl AlignError {
    pub(crate) fn shape(reference: &str, reason: impl Into<String>) -> Self {
        Self::Shape {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }

    /// The reference whose fetch failed
    pub fn reference(&self) -> &str {
        match self {
            Self::Fetch { reference, .. }
            | Self::Request { reference, .. }
            | Self::InvalidUrl { reference, .. }
            | Self::Shape { reference, .. } => reference,
        }
    }
}
