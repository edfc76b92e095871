use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timeline::{ref_timeline, render_timeline};
use crate::models::{Segment, TranscriptEntry};
use crate::pipeline::{AlignmentResult, AlignmentStats};

/// Machine-readable alignment output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentOutput {
    /// Unique identifier of this alignment run
    pub run_id: String,
    pub aligned_at: DateTime<Utc>,
    /// References the segments were loaded from, in request order
    pub references: Vec<String>,
    /// Transcript entries with their final segment refs
    pub aligned: Vec<TranscriptEntry>,
    pub segments: Vec<Segment>,
    /// Processing counters
    #[serde(default)]
    pub metadata: AlignmentStats,
}

impl AlignmentOutput {
    pub fn from_result(references: &[String], result: AlignmentResult) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            aligned_at: Utc::now(),
            references: references.to_vec(),
            aligned: result.aligned,
            segments: result.segments,
            metadata: result.stats,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }

    /// Read a previously written output file
    pub fn read_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;
        serde_json::from_str(&content).context("Failed to parse alignment output")
    }

    /// Write the human-readable ref timeline
    pub fn write_timeline(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", render_timeline(&ref_timeline(&self.aligned)))?;
        Ok(())
    }
}
