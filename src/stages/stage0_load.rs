use futures::future::try_join_all;
use tracing::{debug, info};

use crate::error::AlignError;
use crate::models::Segment;
use crate::sources::TextSource;

/// Execute Stage 0: load the canonical segments for every reference
///
/// All references are fetched concurrently. The flat segment list keeps
/// request order, then within-reference order, regardless of which fetch
/// finishes first. The first failed fetch aborts the load.
pub async fn load_segments<S: TextSource>(
    source: &S,
    references: &[String],
) -> Result<Vec<Segment>, AlignError> {
    let texts = try_join_all(references.iter().map(|r| source.fetch_text(r))).await?;

    let mut segments = Vec::with_capacity(texts.iter().map(|t| t.segments.len()).sum());
    for (reference, text) in references.iter().zip(texts) {
        debug!(
            "Loaded {} segments for {} (section {})",
            text.segments.len(),
            reference,
            text.base_ref
        );
        segments.extend(
            text.segments
                .into_iter()
                .enumerate()
                .map(|(i, raw)| Segment::new(&text.base_ref, i, raw)),
        );
    }

    info!(
        "Stage 0: Loaded {} segments from {} references",
        segments.len(),
        references.len()
    );

    Ok(segments)
}
