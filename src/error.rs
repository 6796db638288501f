use thiserror::Error;

/// Failures raised at pipeline stage boundaries.
///
/// An unreadable signal (too few beats, too few ink columns) is *not* an
/// error: it is reported as a [`crate::models::Severity::Unreadable`]
/// diagnosis so that a caller always gets a structured report back.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Raw sample buffer length is not a multiple of the sample width.
    #[error("waveform buffer of {0} bytes is not a multiple of the 2-byte sample width")]
    Decode(usize),

    /// The uploaded raster could not be parsed as an image.
    #[error("could not read image: {0}")]
    ImageRead(#[from] image::ImageError),

    /// Region geometry is too small to digitize meaningfully.
    #[error("layout does not fit: {0}")]
    Layout(String),
}
