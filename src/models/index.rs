use std::collections::BTreeMap;

/// Inverted index from normalized token to the segment positions containing it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordIndex {
    /// Positions per token, ascending and deduplicated
    entries: BTreeMap<String, Vec<usize>>,
}

impl WordIndex {
    pub(crate) fn from_entries(entries: BTreeMap<String, Vec<usize>>) -> Self {
        Self { entries }
    }

    /// Candidate positions for a normalized token
    pub fn get(&self, token: &str) -> Option<&[usize]> {
        self.entries.get(token).map(Vec::as_slice)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed tokens in lexical order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
