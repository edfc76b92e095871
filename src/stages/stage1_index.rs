use std::collections::BTreeMap;

use tracing::info;

use crate::models::{Segment, WordIndex};
use crate::text::{normalize, token_len};

/// Execute Stage 1: build the word → segment positions index
///
/// Only tokens at least `min_token_len` code points long are indexed;
/// shorter words match too many segments to be useful anchors.
pub fn build_word_index(segments: &[Segment], min_token_len: usize) -> WordIndex {
    let mut entries: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    for (position, segment) in segments.iter().enumerate() {
        for token in &segment.tokens {
            let word = normalize(token);
            if word.is_empty() || token_len(&word) < min_token_len {
                continue;
            }
            let positions = entries.entry(word).or_default();
            // Positions are visited in ascending order, so checking the tail dedups
            if positions.last() != Some(&position) {
                positions.push(position);
            }
        }
    }

    info!(
        "Stage 1: Indexed {} distinct words across {} segments",
        entries.len(),
        segments.len()
    );

    WordIndex::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(texts: &[&str]) -> Vec<Segment> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Segment::new("Psalms 23", i, *t))
            .collect()
    }

    #[test]
    fn test_positions_ascending_and_deduplicated() {
        let segments = segments(&[
            "מִזְמוֹר לְדָוִד יְהוָה רֹעִי",
            "בִּנְאוֹת דֶּשֶׁא יַרְבִּיצֵנִי",
            "נַפְשִׁי יְשׁוֹבֵב יַנְחֵנִי",
            "יְהוָה יְהוָה לְדָוִד",
        ]);

        let index = build_word_index(&segments, 4);

        assert_eq!(index.get("יהוה"), Some(&[0, 3][..]));
        assert_eq!(index.get("לדוד"), Some(&[0, 3][..]));
        assert_eq!(index.get("ינחני"), Some(&[2][..]));
        assert_eq!(index.get("מזמור"), Some(&[0][..]));
    }

    #[test]
    fn test_short_tokens_never_indexed() {
        let segments = segments(&["רֹעִי לֹא אֶחְסָר", "גַּם כִּי אֵלֵךְ"]);

        let index = build_word_index(&segments, 4);

        assert!(index.tokens().all(|t| token_len(t) >= 4));
        assert_eq!(index.get("לא"), None);
        assert_eq!(index.get("רעי"), None);
        assert_eq!(index.get("אחסר"), Some(&[0][..]));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let segments = segments(&["רֹעִי לֹא אֶחְסָר"]);

        let index = build_word_index(&segments, 3);

        assert_eq!(index.get("רעי"), Some(&[0][..]));
        assert_eq!(index.get("לא"), None);
    }

    #[test]
    fn test_empty_segments() {
        let index = build_word_index(&[], 4);
        assert!(index.is_empty());
    }
}
