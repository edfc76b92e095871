use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Transcription;

/// Parse a transcription JSON file
pub fn parse_transcription_file(path: &Path) -> Result<Transcription> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_transcription_json(&content)
}

/// Parse a transcription JSON string
pub fn parse_transcription_json(json: &str) -> Result<Transcription> {
    serde_json::from_str(json).context("Failed to parse transcription JSON")
}

/// Split a reference list on newlines and commas, dropping blanks
pub fn parse_refs(input: &str) -> Vec<String> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}
