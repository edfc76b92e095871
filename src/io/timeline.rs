use serde::Serialize;

use crate::models::TranscriptEntry;

/// Point in the recording where the reading moves to a new segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub segment_ref: String,
    /// Start of the first word read from this segment, in seconds
    pub start: f64,
}

/// One row per change of segment ref, skipping unaligned entries
pub fn ref_timeline(aligned: &[TranscriptEntry]) -> Vec<TimelineRow> {
    let mut rows: Vec<TimelineRow> = Vec::new();

    for entry in aligned {
        let Some(segment_ref) = entry.segment_ref() else {
            continue;
        };
        if rows.last().is_some_and(|row| row.segment_ref == segment_ref) {
            continue;
        }
        rows.push(TimelineRow {
            segment_ref: segment_ref.to_string(),
            start: entry.start.unwrap_or(0.0),
        });
    }

    rows
}

/// The segment being read at `time` seconds into the recording
///
/// Scans forward while entries start at or before `time`, remembering the
/// last ref seen. Stops at the first entry that is later or has no start.
pub fn current_segment_ref(aligned: &[TranscriptEntry], time: f64) -> Option<&str> {
    let mut current = None;

    for entry in aligned {
        match entry.start {
            Some(start) if start <= time => {
                current = entry.segment_ref().or(current);
            }
            _ => break,
        }
    }

    current
}

/// Format seconds as m:ss
pub fn format_time(seconds: f64) -> String {
    if seconds.is_nan() {
        return "0:00".to_string();
    }
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Render the timeline as one `m:ss  ref` line per row
pub fn render_timeline(rows: &[TimelineRow]) -> String {
    rows.iter()
        .map(|row| format!("{:>6}  {}\n", format_time(row.start), row.segment_ref))
        .collect()
}
