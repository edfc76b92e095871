use tracing::info;

use crate::models::{SegmentCatalog, TranscriptEntry};

/// Result of Stage 6 verification
#[derive(Debug)]
pub struct Stage6Result {
    pub transcript: Vec<TranscriptEntry>,
    /// Transcript indices whose ref was rejected
    pub rejected: Vec<usize>,
}

/// Execute Stage 6: enforce monotone segment order with bounded jumps
///
/// Greedily keeps the earliest valid chain: an entry is rejected when its
/// segment is behind the last accepted one or more than `max_allowed_jump`
/// ahead of it. Rejected entries do not move the chain forward.
pub fn verify_monotone(
    transcript: &[TranscriptEntry],
    catalog: &SegmentCatalog,
    max_allowed_jump: usize,
) -> Stage6Result {
    let mut out = transcript.to_vec();
    let mut rejected = Vec::new();
    let mut prev: Option<usize> = None;

    for (i, entry) in out.iter_mut().enumerate() {
        let Some(position) = entry.segment_ref().and_then(|r| catalog.position_of(r)) else {
            continue;
        };

        if let Some(prev) = prev {
            if position < prev || position - prev > max_allowed_jump {
                entry.segment_ref = None;
                rejected.push(i);
                continue;
            }
        }

        prev = Some(position);
    }

    info!("Stage 6: Rejected {} non-monotone entries", rejected.len());

    Stage6Result {
        transcript: out,
        rejected,
    }
}
