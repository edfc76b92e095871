use std::collections::BTreeMap;

use super::{SegmentCatalog, TranscriptEntry};

/// A transcript word that lexically matches one or more segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Index into the transcript
    pub transcript_index: usize,
    /// Segment positions containing the word; ascending, deduplicated, non-empty
    pub candidate_segments: Vec<usize>,
}

/// An entry whose current segment ref resolves to a loaded segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAnchor {
    pub transcript_index: usize,
    pub position: usize,
}

impl ResolvedAnchor {
    /// Entries carrying a ref known to `catalog`, in transcript order
    pub fn collect(transcript: &[TranscriptEntry], catalog: &SegmentCatalog) -> Vec<Self> {
        transcript
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let position = catalog.position_of(entry.segment_ref()?)?;
                Some(Self {
                    transcript_index: i,
                    position,
                })
            })
            .collect()
    }
}

/// Chosen segment position per transcript index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentMap {
    choices: BTreeMap<usize, usize>,
}

impl AlignmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, transcript_index: usize, position: usize) {
        self.choices.insert(transcript_index, position);
    }

    /// The chosen position, or `None` when the entry was not anchored
    pub fn get(&self, transcript_index: usize) -> Option<usize> {
        self.choices.get(&transcript_index).copied()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Choices in transcript order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.choices.iter().map(|(&i, &p)| (i, p))
    }
}
