use tracing::info;

use crate::models::{Anchor, TranscriptEntry, WordIndex};
use crate::pipeline::AlignConfig;
use crate::text::{normalize, token_len};

/// Execute Stage 2: collect lexical anchors in transcript order
///
/// An entry becomes an anchor when it is tagged with the target language,
/// its normalized word is long enough, and the index knows the word.
pub fn collect_anchors(
    transcript: &[TranscriptEntry],
    index: &WordIndex,
    config: &AlignConfig,
) -> Vec<Anchor> {
    let anchors: Vec<Anchor> = transcript
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.is_language(&config.target_language))
        .filter_map(|(i, entry)| {
            let word = normalize(&entry.word);
            if word.is_empty() || token_len(&word) < config.min_token_len {
                return None;
            }
            index
                .get(&word)
                .filter(|candidates| !candidates.is_empty())
                .map(|candidates| Anchor {
                    transcript_index: i,
                    candidate_segments: candidates.to_vec(),
                })
        })
        .collect();

    info!(
        "Stage 2: Found {} anchors in {} transcript entries",
        anchors.len(),
        transcript.len()
    );

    anchors
}
