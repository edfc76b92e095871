pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod stages;
pub mod text;

pub use error::AlignError;
pub use io::{
    current_segment_ref, parse_refs, parse_transcription_file, parse_transcription_json,
    ref_timeline, AlignmentOutput, TimelineRow,
};
pub use models::{
    AlignmentMap, Anchor, Segment, SegmentCatalog, TranscriptEntry, Transcription,
    TranscriptionInfo, WordIndex,
};
pub use pipeline::{align, align_transcript, AlignConfig, AlignmentResult, AlignmentStats};
pub use sources::{SefariaClient, SefariaConfig, SoferClient, SoferConfig, SourceText, TextSource};
pub use text::{normalize, tokenize};
