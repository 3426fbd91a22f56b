//! Host-side collaborators: sample submission and glyph generation.
//!
//! The surface never talks to a backend itself. This module packages an
//! export into the submission payload, hands it to a [`SampleSink`], and
//! clears the surface only once the sink confirms the sample was stored.

pub mod glyphs;
pub mod sink;
pub mod types;

pub use glyphs::{DirectoryGenerator, Glyph, GlyphCache, GlyphGenerator};
pub use sink::{DirectorySink, LeaderboardEntry, SampleSink};
pub use types::{
    ErrorDetail, GenerateRequest, GenerateResponse, ServiceError, SubmissionReceipt,
    TrainingSample,
};

use crate::draw::DrawingSurface;
use log::{info, warn};

/// Builds the submission payload for the current surface contents.
///
/// # Errors
/// Rejects an empty label or user, a surface with no ink, or a failed export.
pub fn prepare_sample(
    surface: &DrawingSurface,
    label: &str,
    user: &str,
) -> Result<TrainingSample, ServiceError> {
    if label.is_empty() {
        return Err(ServiceError::MissingField("label"));
    }
    if surface.is_empty() {
        return Err(ServiceError::EmptyDrawing);
    }

    let sample = TrainingSample {
        label: label.to_string(),
        image: surface.export_image()?.to_data_url(),
        user: user.to_string(),
    };
    sample.validate()?;
    Ok(sample)
}

/// Submits the drawing and clears the surface on confirmed success.
///
/// On any failure the surface is left exactly as it was so the user can retry.
pub fn submit_drawing(
    surface: &mut DrawingSurface,
    sink: &mut dyn SampleSink,
    label: &str,
    user: &str,
) -> Result<SubmissionReceipt, ServiceError> {
    let sample = prepare_sample(surface, label, user)?;

    match sink.submit(&sample) {
        Ok(receipt) => {
            info!("Submitted sample '{}' ({})", label, receipt.file_id);
            surface.clear();
            Ok(receipt)
        }
        Err(err) => {
            warn!("Submission of '{}' failed: {}", label, err);
            Err(err)
        }
    }
}

/// Decodes a generated line into sheet tiles, keeping gaps as `None`.
pub fn glyph_tiles(glyphs: &[Glyph]) -> Result<Vec<Option<Vec<u8>>>, ServiceError> {
    glyphs.iter().map(Glyph::png_bytes).collect()
}
