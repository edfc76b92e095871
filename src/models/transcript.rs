use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Transcription as delivered by the speech-to-text service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcription {
    /// Word-level entries in temporal order
    #[serde(default)]
    pub timestamps: Vec<TranscriptEntry>,
    /// Recording metadata, when the service provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<TranscriptionInfo>,
    /// Fields this crate does not interpret, kept for round-tripping
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptionInfo {
    #[serde(default)]
    pub title: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub num_speakers: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single spoken word with its timestamp and (eventually) the segment
/// being read when it was spoken
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// The recognized word - never changed by the pipeline
    #[serde(default, deserialize_with = "lenient_string")]
    pub word: String,
    /// Language tags of the word; the target tag marks it alignable
    #[serde(default, deserialize_with = "lenient_tags")]
    pub hebrew_word_format: Vec<String>,
    /// Start timestamp in seconds
    #[serde(default, deserialize_with = "lenient_f64")]
    pub start: Option<f64>,
    /// Ref of the segment this word belongs to, `None` when unaligned
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub segment_ref: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Sparse or mistyped entry fields read as empty so one bad entry only drops
// out of anchoring instead of failing the whole transcription.

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

impl TranscriptEntry {
    pub fn new(word: impl Into<String>, start: f64) -> Self {
        Self {
            word: word.into(),
            start: Some(start),
            ..Default::default()
        }
    }

    /// Entry tagged with a language, e.g. `"he"`
    pub fn tagged(word: impl Into<String>, start: f64, language: &str) -> Self {
        Self {
            hebrew_word_format: vec![language.to_string()],
            ..Self::new(word, start)
        }
    }

    /// Whether the entry is flagged as a word in `language`
    pub fn is_language(&self, language: &str) -> bool {
        self.hebrew_word_format.iter().any(|tag| tag == language)
    }

    /// The segment ref, treating an empty string as unset
    pub fn segment_ref(&self) -> Option<&str> {
        self.segment_ref.as_deref().filter(|r| !r.is_empty())
    }

    pub fn has_segment_ref(&self) -> bool {
        self.segment_ref().is_some()
    }
}

impl Transcription {
    pub fn from_entries(timestamps: Vec<TranscriptEntry>) -> Self {
        Self {
            timestamps,
            ..Default::default()
        }
    }

    /// Number of entries flagged as `language`
    pub fn count_language(&self, language: &str) -> usize {
        self.timestamps
            .iter()
            .filter(|t| t.is_language(language))
            .count()
    }

    /// Start of the last timestamped entry, in seconds
    pub fn last_start(&self) -> Option<f64> {
        self.timestamps.iter().rev().find_map(|t| t.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        let json = r#"{
            "word": "בראשית",
            "hebrew_word_format": ["he"],
            "start": 1.25,
            "end": 1.8
        }"#;

        let entry: TranscriptEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.word, "בראשית");
        assert!(entry.is_language("he"));
        assert!(!entry.is_language("en"));
        assert_eq!(entry.start, Some(1.25));
        assert_eq!(entry.segment_ref, None);
        assert_eq!(entry.extra["end"], 1.8);
    }

    #[test]
    fn test_sparse_entry_defaults() {
        let entry: TranscriptEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry.word, "");
        assert!(entry.hebrew_word_format.is_empty());
        assert_eq!(entry.start, None);
    }

    #[test]
    fn test_null_and_mistyped_fields_read_as_empty() {
        let json = r#"{
            "word": null,
            "hebrew_word_format": "he",
            "start": "soon",
            "segment_ref": 7
        }"#;

        let entry: TranscriptEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.word, "");
        assert!(entry.hebrew_word_format.is_empty());
        assert_eq!(entry.start, None);
        assert_eq!(entry.segment_ref, None);
    }

    #[test]
    fn test_non_string_tags_are_skipped() {
        let json = r#"{"word": "שלום", "hebrew_word_format": [null, 3, "he"]}"#;
        let entry: TranscriptEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.hebrew_word_format, vec!["he"]);
    }

    #[test]
    fn test_empty_segment_ref_is_unset() {
        let mut entry = TranscriptEntry::new("word", 0.0);
        entry.segment_ref = Some(String::new());
        assert!(!entry.has_segment_ref());
        entry.segment_ref = Some("Genesis 1.1".to_string());
        assert_eq!(entry.segment_ref(), Some("Genesis 1.1"));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let json = r#"{
            "timestamps": [{"word": "שמע", "start": 0.5, "speaker": 2}],
            "info": {"title": "Shiur", "duration": 61.0, "language_probability": 0.9},
            "id": "abc"
        }"#;

        let transcription: Transcription = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&transcription).unwrap();

        assert_eq!(value["id"], "abc");
        assert_eq!(value["timestamps"][0]["speaker"], 2);
        assert_eq!(value["info"]["language_probability"], 0.9);
        assert_eq!(transcription.last_start(), Some(0.5));
    }
}
