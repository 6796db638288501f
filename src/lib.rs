//! cardiograph - ECG digitization and rhythm classification
//!
//! Converts a cardiac-rhythm recording - either a raw int16 stream from a
//! wearable monitor, or a photographed paper chart - into a digitized
//! waveform and a rule-based rhythm report (rate, regularity, coarse
//! arrhythmia label, severity color). A decision-support prototype, not a
//! certified diagnostic device: every threshold is heuristic and lives in
//! [`AnalysisConfig`].

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Rhythm analysis (beat detection, RR statistics, classification)
pub mod analysis;
/// Tunable thresholds for one analysis run
pub mod config;
mod debug;
/// Chart digitization (grid suppression, segmentation, trace extraction)
pub mod digitizer;
/// Stage-boundary error types
pub mod error;
/// Raw monitor-recording decode
pub mod holter;
/// Core data structures (frames, masks, waveforms, reports)
pub mod models;
/// Pipeline orchestration shared by both input kinds
mod pipeline;
/// Pixel-level helpers (grayscale, binarization)
pub mod utils;

pub use config::AnalysisConfig;
pub use digitizer::grid::GridStrategy;
pub use digitizer::layout::{LayoutMode, LeadLayout, LeadRegion};
pub use error::AnalysisError;
pub use models::{
    Diagnosis, DiagnosticReport, DigitizedLead, ImageFrame, InkMask, RawWaveform, RhythmMetrics,
    Severity, SourceKind,
};

/// Analyze a raw little-endian int16 recording with default settings.
///
/// # Arguments
/// * `bytes` - Raw sample buffer (2 bytes per sample)
/// * `sample_rate_hz` - Declared sample rate of the recording
///
/// # Returns
/// A structured report; an empty or flat recording yields severity grey
/// with BPM 0 rather than an error.
pub fn analyze_holter(bytes: &[u8], sample_rate_hz: u32) -> Result<DiagnosticReport, AnalysisError> {
    let cfg = AnalysisConfig {
        sample_rate_hz,
        ..AnalysisConfig::default()
    };
    Analyzer::with_config(cfg).analyze_bytes(bytes)
}

/// Analyze a raw RGB chart scan with default settings.
///
/// # Arguments
/// * `rgb` - Interleaved RGB bytes (3 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `mode` - Chart layout hint
pub fn analyze_scan(
    rgb: &[u8],
    width: usize,
    height: usize,
    mode: LayoutMode,
) -> Result<DiagnosticReport, AnalysisError> {
    Analyzer::new().analyze_rgb(rgb, width, height, mode)
}

/// Analyzer with configuration options.
///
/// Owns an [`AnalysisConfig`]; construct one per tuning profile and reuse
/// it across requests (it holds no per-request state).
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer with default settings.
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// Create an analyzer with explicit settings.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The active settings.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a raw little-endian int16 sample buffer.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<DiagnosticReport, AnalysisError> {
        let wave = holter::decode_i16_le(
            bytes,
            self.config.sample_rate_hz,
            self.config.max_analysis_samples,
        )?;
        Ok(pipeline::analyze_waveform(&wave, &self.config))
    }

    /// Analyze an already-decoded waveform.
    pub fn analyze_waveform(&self, wave: &RawWaveform) -> DiagnosticReport {
        pipeline::analyze_waveform(wave, &self.config)
    }

    /// Analyze an encoded raster image (JPEG, PNG, ...).
    pub fn analyze_image(
        &self,
        bytes: &[u8],
        mode: LayoutMode,
    ) -> Result<DiagnosticReport, AnalysisError> {
        let frame = ImageFrame::decode(bytes)?;
        pipeline::analyze_frame(&frame, mode, &self.config)
    }

    /// Analyze a raw interleaved RGB buffer.
    pub fn analyze_rgb(
        &self,
        rgb: &[u8],
        width: usize,
        height: usize,
        mode: LayoutMode,
    ) -> Result<DiagnosticReport, AnalysisError> {
        let frame = ImageFrame::from_rgb(rgb.to_vec(), width, height).ok_or_else(|| {
            AnalysisError::Layout(format!(
                "rgb buffer of {} bytes does not match {}x{}",
                rgb.len(),
                width,
                height
            ))
        })?;
        pipeline::analyze_frame(&frame, mode, &self.config)
    }

    /// Analyze a decoded frame.
    pub fn analyze_frame(
        &self,
        frame: &ImageFrame,
        mode: LayoutMode,
    ) -> Result<DiagnosticReport, AnalysisError> {
        pipeline::analyze_frame(frame, mode, &self.config)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_is_unreadable() {
        let report = analyze_holter(&[], 500).unwrap();
        assert_eq!(report.frecuencia_cardiaca, 0);
        assert_eq!(report.alerta_color, Severity::Unreadable);
        assert!(report.senal_grafica.is_empty());
    }

    #[test]
    fn test_odd_buffer_is_decode_error() {
        let result = analyze_holter(&[0u8; 3], 500);
        assert!(matches!(result, Err(AnalysisError::Decode(3))));
    }

    #[test]
    fn test_rgb_size_mismatch_is_error() {
        let result = analyze_scan(&[0u8; 10], 4, 4, LayoutMode::SingleStrip);
        assert!(matches!(result, Err(AnalysisError::Layout(_))));
    }
}
