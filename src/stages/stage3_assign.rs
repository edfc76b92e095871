use tracing::info;

use crate::models::{AlignmentMap, Anchor, SegmentCatalog, TranscriptEntry};

/// Result of Stage 3 assignment
#[derive(Debug)]
pub struct Stage3Result {
    /// Transcript with every anchored entry pointing at its chosen segment
    pub transcript: Vec<TranscriptEntry>,
    /// Chosen segment position per anchored entry
    pub alignment: AlignmentMap,
}

/// Choose one segment position from a sorted candidate list.
///
/// Policy, first match wins:
/// 1. No previous choice: the smallest candidate.
/// 2. Exact continuation `prev + 1`.
/// 3. Within `wiggle_range` of the continuation, forward first, never behind `prev`.
/// 4. The smallest candidate at or after `prev`.
/// 5. The smallest candidate overall (a regression left for later stages).
///
/// Returns `None` only for an empty candidate list.
pub fn choose_segment(
    prev: Option<usize>,
    candidates: &[usize],
    wiggle_range: usize,
) -> Option<usize> {
    let first = *candidates.first()?;
    let Some(prev) = prev else {
        return Some(first);
    };
    let has = |position: usize| candidates.binary_search(&position).is_ok();

    let expected = prev + 1;
    if has(expected) {
        return Some(expected);
    }

    for d in 1..=wiggle_range {
        if has(expected + d) {
            return Some(expected + d);
        }
        if let Some(behind) = expected.checked_sub(d) {
            if behind >= prev && has(behind) {
                return Some(behind);
            }
        }
    }

    candidates
        .iter()
        .copied()
        .find(|&c| c >= prev)
        .or(Some(first))
}

/// Walk the anchors forward, choosing a segment for each one
pub fn assign_segments(anchors: &[Anchor], wiggle_range: usize) -> AlignmentMap {
    let mut alignment = AlignmentMap::new();
    let mut prev = None;

    for anchor in anchors {
        if let Some(position) = choose_segment(prev, &anchor.candidate_segments, wiggle_range) {
            alignment.insert(anchor.transcript_index, position);
            prev = Some(position);
        }
    }

    alignment
}

/// Copy the transcript, setting the chosen segment ref on anchored entries.
///
/// Entries without a choice keep their existing ref; empty refs become unset.
pub fn apply_alignment(
    transcript: &[TranscriptEntry],
    alignment: &AlignmentMap,
    catalog: &SegmentCatalog,
) -> Vec<TranscriptEntry> {
    transcript
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut entry = entry.clone();
            match alignment.get(i).and_then(|p| catalog.ref_at(p)) {
                Some(segment_ref) => entry.segment_ref = Some(segment_ref.to_string()),
                None if !entry.has_segment_ref() => entry.segment_ref = None,
                None => {}
            }
            entry
        })
        .collect()
}

/// Execute Stage 3: assign a segment to every anchor and apply the choices
pub fn assign_and_apply(
    transcript: &[TranscriptEntry],
    anchors: &[Anchor],
    catalog: &SegmentCatalog,
    wiggle_range: usize,
) -> Stage3Result {
    let alignment = assign_segments(anchors, wiggle_range);
    let transcript = apply_alignment(transcript, &alignment, catalog);

    info!("Stage 3: Assigned segments to {} anchors", alignment.len());

    Stage3Result {
        transcript,
        alignment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    #[test]
    fn test_first_anchor_takes_smallest() {
        assert_eq!(choose_segment(None, &[3, 8, 12], 1), Some(3));
    }

    #[test]
    fn test_exact_continuation() {
        assert_eq!(choose_segment(Some(4), &[2, 5, 7], 1), Some(5));
    }

    #[test]
    fn test_wiggle_prefers_forward() {
        // expected 5 missing; 6 is within wiggle
        assert_eq!(choose_segment(Some(4), &[1, 4, 6], 1), Some(6));
        // expected 5 missing, 6 missing; 4 == prev is still allowed
        assert_eq!(choose_segment(Some(4), &[1, 4, 9], 1), Some(4));
    }

    #[test]
    fn test_wiggle_range_zero_disables_wiggle() {
        // a forward step inside the wiggle range beats staying put
        assert_eq!(choose_segment(Some(4), &[4, 6], 1), Some(6));
        assert_eq!(choose_segment(Some(4), &[4, 6], 0), Some(4));
        assert_eq!(choose_segment(Some(0), &[0, 3], 0), Some(0));
    }

    #[test]
    fn test_fallback_to_smallest_at_or_after_prev() {
        assert_eq!(choose_segment(Some(4), &[2, 7], 1), Some(7));
    }

    #[test]
    fn test_fallback_to_smallest_overall() {
        assert_eq!(choose_segment(Some(9), &[2, 5], 1), Some(2));
    }

    #[test]
    fn test_empty_candidates() {
        assert_eq!(choose_segment(Some(1), &[], 1), None);
    }

    #[test]
    fn test_choice_is_always_a_candidate() {
        let candidate_sets: [&[usize]; 5] = [&[0], &[1, 3], &[0, 2, 4, 6], &[5, 10], &[2, 3, 4]];
        for prev in [None, Some(0), Some(2), Some(5), Some(11)] {
            for candidates in candidate_sets {
                for wiggle in 0..3 {
                    let chosen = choose_segment(prev, candidates, wiggle).unwrap();
                    assert!(candidates.contains(&chosen));
                }
            }
        }
    }

    #[test]
    fn test_assign_segments_tracks_previous_choice() {
        let anchors = vec![
            Anchor {
                transcript_index: 0,
                candidate_segments: vec![1, 6],
            },
            Anchor {
                transcript_index: 3,
                candidate_segments: vec![2, 7],
            },
            Anchor {
                transcript_index: 5,
                candidate_segments: vec![0, 3, 8],
            },
        ];

        let alignment = assign_segments(&anchors, 1);

        assert_eq!(alignment.get(0), Some(1));
        assert_eq!(alignment.get(3), Some(2));
        assert_eq!(alignment.get(5), Some(3));
        assert_eq!(alignment.get(1), None);
    }

    #[test]
    fn test_apply_alignment_sets_and_keeps_refs() {
        let catalog = SegmentCatalog::new(vec![
            Segment::new("Genesis 1", 0, ""),
            Segment::new("Genesis 1", 1, ""),
        ]);
        let mut transcript = vec![
            TranscriptEntry::new("a", 0.0),
            TranscriptEntry::new("b", 0.1),
            TranscriptEntry::new("c", 0.2),
        ];
        transcript[1].segment_ref = Some("Exodus 1.1".to_string());
        transcript[2].segment_ref = Some(String::new());
        let mut alignment = AlignmentMap::new();
        alignment.insert(0, 1);

        let applied = apply_alignment(&transcript, &alignment, &catalog);

        assert_eq!(applied[0].segment_ref.as_deref(), Some("Genesis 1.2"));
        assert_eq!(applied[1].segment_ref.as_deref(), Some("Exodus 1.1"));
        assert_eq!(applied[2].segment_ref, None);
        // input untouched
        assert_eq!(transcript[0].segment_ref, None);
    }

    #[test]
    fn test_assign_and_apply() {
        let catalog = SegmentCatalog::new(vec![
            Segment::new("Psalms 23", 0, ""),
            Segment::new("Psalms 23", 1, ""),
            Segment::new("Psalms 23", 2, ""),
        ]);
        let transcript = vec![
            TranscriptEntry::tagged("a", 0.0, "he"),
            TranscriptEntry::tagged("b", 0.4, "he"),
            TranscriptEntry::tagged("c", 0.9, "he"),
        ];
        let anchors = vec![
            Anchor {
                transcript_index: 0,
                candidate_segments: vec![0, 2],
            },
            Anchor {
                transcript_index: 2,
                candidate_segments: vec![1],
            },
        ];

        let result = assign_and_apply(&transcript, &anchors, &catalog, 1);

        assert_eq!(result.alignment.len(), 2);
        assert_eq!(result.transcript[0].segment_ref(), Some("Psalms 23.1"));
        assert_eq!(result.transcript[1].segment_ref(), None);
        assert_eq!(result.transcript[2].segment_ref(), Some("Psalms 23.2"));
    }
}
