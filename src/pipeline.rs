use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AlignError;
use crate::models::{Segment, SegmentCatalog, TranscriptEntry};
use crate::sources::TextSource;
use crate::stages::{
    assign_and_apply, build_word_index, clean_out_of_order, collect_anchors, load_segments,
    propagate, verify_monotone,
};

/// Tuning knobs threaded through every alignment stage
#[derive(Debug, Clone)]
pub struct AlignConfig {
    /// Minimum normalized word length (code points) for indexing and anchoring
    pub min_token_len: usize,
    /// How far around the expected next segment the assigner looks
    pub wiggle_range: usize,
    /// Largest forward segment jump the verifier accepts
    pub max_allowed_jump: usize,
    /// Language tag marking alignable transcript words
    pub target_language: String,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            min_token_len: 4,
            wiggle_range: 1,
            max_allowed_jump: 5,
            target_language: "he".to_string(),
        }
    }
}

/// Counters collected across one alignment run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub total_entries: usize,
    pub total_segments: usize,
    pub anchors: usize,
    pub assigned: usize,
    pub removed_out_of_order: usize,
    pub propagated: usize,
    pub rejected_non_monotone: usize,
    /// Entries carrying a segment ref at the end of the run
    pub aligned_entries: usize,
}

/// Outcome of aligning a transcript against a set of segments
#[derive(Debug, Clone)]
pub struct AlignmentResult {
    /// The transcript with `segment_ref` populated
    pub aligned: Vec<TranscriptEntry>,
    /// The segments the transcript was aligned against, in global order
    pub segments: Vec<Segment>,
    pub stats: AlignmentStats,
}

/// Align a transcript against already loaded segments
///
/// Runs index → anchors → assign/apply → clean → propagate → verify. Every
/// step is total; the input transcript is never modified.
pub fn align_transcript(
    segments: Vec<Segment>,
    transcript: &[TranscriptEntry],
    config: &AlignConfig,
) -> AlignmentResult {
    let catalog = SegmentCatalog::new(segments);

    let index = build_word_index(catalog.segments(), config.min_token_len);
    let anchors = collect_anchors(transcript, &index, config);
    let assigned = assign_and_apply(transcript, &anchors, &catalog, config.wiggle_range);
    let cleaned = clean_out_of_order(&assigned.transcript, &catalog);
    let propagated = propagate(&cleaned.transcript, &catalog);
    let verified = verify_monotone(&propagated.transcript, &catalog, config.max_allowed_jump);

    let stats = AlignmentStats {
        total_entries: transcript.len(),
        total_segments: catalog.len(),
        anchors: anchors.len(),
        assigned: assigned.alignment.len(),
        removed_out_of_order: cleaned.removed.len(),
        propagated: propagated.filled,
        rejected_non_monotone: verified.rejected.len(),
        aligned_entries: verified
            .transcript
            .iter()
            .filter(|t| t.has_segment_ref())
            .count(),
    };

    info!(
        "Aligned {} of {} entries against {} segments",
        stats.aligned_entries, stats.total_entries, stats.total_segments
    );

    AlignmentResult {
        aligned: verified.transcript,
        segments: catalog.into_segments(),
        stats,
    }
}

/// Load the segments for `references` and align the transcript against them
pub async fn align<S: TextSource>(
    source: &S,
    references: &[String],
    transcript: &[TranscriptEntry],
    config: &AlignConfig,
) -> Result<AlignmentResult, AlignError> {
    let segments = load_segments(source, references).await?;
    Ok(align_transcript(segments, transcript, config))
}
