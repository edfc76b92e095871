use tracing::info;

use crate::models::{ResolvedAnchor, SegmentCatalog, TranscriptEntry};

/// Result of Stage 5 propagation
#[derive(Debug)]
pub struct Stage5Result {
    pub transcript: Vec<TranscriptEntry>,
    /// Number of entries that received a ref
    pub filled: usize,
}

/// Execute Stage 5: fill gaps between anchors
///
/// Every unset entry after an anchor takes that anchor's ref, up to the next
/// anchor or the end of the transcript. Refs already set are never touched.
pub fn propagate(transcript: &[TranscriptEntry], catalog: &SegmentCatalog) -> Stage5Result {
    let anchors = ResolvedAnchor::collect(transcript, catalog);
    let mut out = transcript.to_vec();
    let mut filled = 0;

    for (k, anchor) in anchors.iter().enumerate() {
        let start = anchor.transcript_index;
        let end = anchors
            .get(k + 1)
            .map(|next| next.transcript_index)
            .unwrap_or(out.len());
        let fill = out[start].segment_ref.clone();

        for entry in &mut out[start + 1..end] {
            if !entry.has_segment_ref() {
                entry.segment_ref = fill.clone();
                filled += 1;
            }
        }
    }

    info!(
        "Stage 5: Propagated refs to {} entries from {} anchors",
        filled,
        anchors.len()
    );

    Stage5Result {
        transcript: out,
        filled,
    }
}
