pub mod sefaria;
pub mod sofer;

pub use sefaria::*;
pub use sofer::*;

use std::future::Future;

use crate::error::AlignError;

/// Raw text of one requested reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Canonical section ref the segments are numbered under
    pub base_ref: String,
    /// Per-segment raw text, in canonical order
    pub segments: Vec<String>,
}

/// Anything that can resolve a text reference into its segments
pub trait TextSource {
    fn fetch_text(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<SourceText, AlignError>> + Send;
}
