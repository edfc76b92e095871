use tracing::{debug, info};

use crate::models::{ResolvedAnchor, SegmentCatalog, TranscriptEntry};

/// Result of Stage 4 cleaning
#[derive(Debug)]
pub struct Stage4Result {
    /// Transcript with out-of-order anchors unset
    pub transcript: Vec<TranscriptEntry>,
    /// Transcript indices whose ref was removed, ascending
    pub removed: Vec<usize>,
}

/// Execute Stage 4: remove anchors that break segment ordering
///
/// At every inversion between adjacent resolved anchors, the non-decreasing
/// run ending at the earlier anchor is weighed against the run starting at
/// the later one, and the anchor on the shorter side is dropped. On equal
/// runs, the side whose forward continuation is shorter loses. The scan
/// resumes at the same position, so removals can cascade.
pub fn clean_out_of_order(
    transcript: &[TranscriptEntry],
    catalog: &SegmentCatalog,
) -> Stage4Result {
    let mut anchors = ResolvedAnchor::collect(transcript, catalog);
    let mut removed = Vec::new();

    let mut i = 0;
    while i + 1 < anchors.len() {
        if anchors[i + 1].position >= anchors[i].position {
            i += 1;
            continue;
        }

        let left_size = run_ending_at(&anchors, i);
        let right_size = run_starting_at(&anchors, i + 1);

        let remove_left = right_size > left_size
            || (right_size == left_size
                && forward_steps(&anchors, i + 1) > forward_steps(&anchors, i));

        let victim = anchors.remove(if remove_left { i } else { i + 1 });
        debug!(
            "Out-of-order anchor at entry {} (segment {}): left run {}, right run {}",
            victim.transcript_index, victim.position, left_size, right_size
        );
        removed.push(victim.transcript_index);
    }

    removed.sort_unstable();

    let transcript = transcript
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut entry = entry.clone();
            if removed.binary_search(&i).is_ok() {
                entry.segment_ref = None;
            }
            entry
        })
        .collect();

    info!("Stage 4: Removed {} out-of-order anchors", removed.len());

    Stage4Result {
        transcript,
        removed,
    }
}

/// Length of the non-decreasing run ending at `end`
fn run_ending_at(anchors: &[ResolvedAnchor], end: usize) -> usize {
    let mut start = end;
    while start > 0 && anchors[start - 1].position <= anchors[start].position {
        start -= 1;
    }
    end - start + 1
}

/// Length of the non-decreasing run starting at `start`
fn run_starting_at(anchors: &[ResolvedAnchor], start: usize) -> usize {
    1 + forward_steps(anchors, start)
}

/// Consecutive non-decreasing steps taken forward from `from`
fn forward_steps(anchors: &[ResolvedAnchor], from: usize) -> usize {
    anchors[from..]
        .windows(2)
        .take_while(|pair| pair[1].position >= pair[0].position)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::fixtures::{catalog, positions, transcript_at};

    #[test]
    fn test_shorter_left_run_is_removed() {
        let catalog = catalog(8);
        let transcript = transcript_at(
            &catalog,
            &[Some(0), Some(1), Some(5), Some(2), Some(3), Some(4), Some(6)],
        );

        let result = clean_out_of_order(&transcript, &catalog);

        assert_eq!(result.removed, vec![2]);
        assert_eq!(
            positions(&result.transcript, &catalog),
            vec![Some(0), Some(1), None, Some(2), Some(3), Some(4), Some(6)]
        );
    }

    #[test]
    fn test_shorter_right_run_is_removed() {
        let catalog = catalog(8);
        let transcript = transcript_at(
            &catalog,
            &[Some(0), Some(1), Some(2), Some(5), Some(1), Some(6)],
        );

        let result = clean_out_of_order(&transcript, &catalog);

        assert_eq!(result.removed, vec![4]);
    }

    #[test]
    fn test_unresolved_entries_are_skipped() {
        let catalog = catalog(8);
        let transcript = transcript_at(
            &catalog,
            &[Some(0), None, Some(1), None, None, Some(5), None, Some(2), Some(3), Some(4)],
        );

        let result = clean_out_of_order(&transcript, &catalog);

        assert_eq!(result.removed, vec![5]);
    }

    #[test]
    fn test_tie_removes_side_with_shorter_continuation() {
        let catalog = catalog(8);
        // left [0, 3] vs right [1, 2]: the right side keeps going
        let transcript = transcript_at(&catalog, &[Some(0), Some(3), Some(1), Some(2)]);
        assert_eq!(clean_out_of_order(&transcript, &catalog).removed, vec![1]);

        // single anchors on both sides: the later one goes
        let transcript = transcript_at(&catalog, &[Some(5), Some(1)]);
        assert_eq!(clean_out_of_order(&transcript, &catalog).removed, vec![1]);
    }

    #[test]
    fn test_removals_cascade() {
        let catalog = catalog(10);
        let transcript = transcript_at(
            &catalog,
            &[
                Some(0),
                Some(1),
                Some(2),
                Some(3),
                Some(9),
                Some(8),
                Some(4),
                Some(5),
                Some(6),
                Some(7),
                Some(8),
            ],
        );

        let result = clean_out_of_order(&transcript, &catalog);

        assert_eq!(result.removed, vec![4, 5]);
        let remaining: Vec<usize> = positions(&result.transcript, &catalog)
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(remaining, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_ordered_transcript_is_unchanged() {
        let catalog = catalog(4);
        let transcript = transcript_at(&catalog, &[Some(0), Some(0), None, Some(1), Some(3)]);

        let result = clean_out_of_order(&transcript, &catalog);

        assert!(result.removed.is_empty());
        assert_eq!(result.transcript, transcript);
    }

    #[test]
    fn test_run_lengths() {
        let anchors: Vec<ResolvedAnchor> = [0, 1, 5, 2, 3, 4, 6]
            .iter()
            .enumerate()
            .map(|(i, &position)| ResolvedAnchor {
                transcript_index: i,
                position,
            })
            .collect();

        assert_eq!(run_ending_at(&anchors, 2), 3);
        assert_eq!(run_starting_at(&anchors, 3), 4);
        assert_eq!(forward_steps(&anchors, 2), 0);
        assert_eq!(forward_steps(&anchors, 3), 3);
    }
}
