use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::text::tokenize;

/// One addressable unit of the canonical text (e.g. a verse)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Canonical reference, `{base_ref}.{n}` with `n` counted from 1
    pub segment_ref: String,
    /// Text exactly as returned by the text source
    pub raw_text: String,
    /// Normalized tokens of `raw_text`
    pub tokens: Vec<String>,
}

impl Segment {
    /// Build the segment at 0-based position `index` within `base_ref`
    pub fn new(base_ref: &str, index: usize, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        Self {
            segment_ref: format!("{}.{}", base_ref, index + 1),
            tokens: tokenize(&raw_text),
            raw_text,
        }
    }
}

/// The globally ordered segment list of one alignment run.
///
/// A segment's position in this list is its identity; positions are the
/// dense range `0..len()`.
#[derive(Debug, Clone, Default)]
pub struct SegmentCatalog {
    segments: Vec<Segment>,
    positions: HashMap<String, usize>,
}

impl SegmentCatalog {
    pub fn new(segments: Vec<Segment>) -> Self {
        let mut positions = HashMap::with_capacity(segments.len());
        // A ref loaded twice resolves to its last occurrence
        for (i, segment) in segments.iter().enumerate() {
            positions.insert(segment.segment_ref.clone(), i);
        }
        Self {
            segments,
            positions,
        }
    }

    /// Position of a segment ref, if it belongs to this run
    pub fn position_of(&self, segment_ref: &str) -> Option<usize> {
        self.positions.get(segment_ref).copied()
    }

    /// Segment ref at a position
    pub fn ref_at(&self, position: usize) -> Option<&str> {
        self.segments.get(position).map(|s| s.segment_ref.as_str())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}
