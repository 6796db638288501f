//! Every heuristic threshold used by the pipeline, in one place.
//!
//! The defaults below are tuned for phone photos of standard ECG paper and
//! for Holter-style int16 recordings at 250/500 Hz. None of them carries a
//! clinical guarantee; they are starting points meant to be adjusted per
//! input source without touching pipeline code.

use crate::digitizer::grid::GridStrategy;

/// Tunable parameters for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Sample rate assumed for raw byte buffers when the caller gives no hint.
    pub sample_rate_hz: u32,
    /// Hard cap on analyzed samples (~10 s at 500 Hz). Bounds compute cost on
    /// long recordings; the remainder is ignored, never downsampled.
    pub max_analysis_samples: usize,
    /// Point budget for the display waveform; longer signals are decimated
    /// by a constant stride to fit.
    pub display_max_points: usize,
    /// Horizontal scale assumed when the beat source is a digitized image,
    /// in pixel columns per second of recording.
    pub columns_per_second: f32,

    /// Beat threshold as a fraction of the sequence's maximum amplitude.
    pub peak_height_fraction: f32,
    /// Minimum inter-beat distance as a fraction of one second. 0.3 caps the
    /// detectable rate near 200 bpm and keeps a tall T-wave from
    /// double-counting a beat.
    pub refractory_fraction: f32,

    /// RR coefficient-of-variation cutoff separating regular from irregular.
    pub irregularity_cv: f32,
    /// Upper regular-rhythm rate bound (bpm); above it, tachycardia.
    pub tachycardia_bpm: f32,
    /// Very-fast bound (bpm); above it without atrial activity, possible SVT.
    pub svt_bpm: f32,
    /// Lower regular-rhythm rate bound (bpm); below it, bradycardia.
    pub bradycardia_bpm: f32,

    /// P-wave search window before each beat, as a fraction of one second.
    pub p_window_fraction: f32,
    /// Buffer abutting the beat that the P-wave search skips, so the QRS
    /// upstroke is not mistaken for atrial activity.
    pub p_gap_fraction: f32,
    /// Minimum P-wave height as a fraction of the global peak amplitude.
    pub p_height_fraction: f32,

    /// Post-beat window examined for ST elevation, fraction of one second.
    pub st_window_fraction: f32,
    /// Buffer after the beat skipped before the ST window opens.
    pub st_gap_fraction: f32,
    /// Sustained post-beat amplitude above this fraction of the lead's peak
    /// flags the lead as elevated.
    pub st_elevation_fraction: f32,

    /// Grid removal strategy for scanned charts.
    pub grid_strategy: GridStrategy,
    /// Wrapped hue band (degrees) covering the red/pink chart grid. A pixel
    /// matches when hue >= low OR hue <= high.
    pub grid_hue_low: f32,
    /// Upper edge of the wrapped hue band, degrees.
    pub grid_hue_high: f32,
    /// Saturation floor for grid classification; near-gray pixels are trace.
    pub grid_saturation_min: f32,
    /// Value (brightness) floor for grid classification; true black is trace.
    pub grid_value_min: f32,
    /// Length of the directional structuring element used by the morphology
    /// strategy. Much longer than any QRS stroke so only grid lines survive.
    pub morph_line_len: usize,

    /// Vertical band holding the rhythm strip in single-strip layouts,
    /// as (top, bottom) fractions of image height.
    pub strip_band: (f32, f32),
    /// Margins trimmed from a 12-lead chart before cell partitioning,
    /// as (top, bottom, left, right) fractions.
    pub chart_margins: (f32, f32, f32, f32),
    /// Minimum cell side in pixels below which segmentation fails.
    pub min_cell_px: usize,
    /// Minimum ink-bearing columns for a region to count as readable.
    pub min_ink_columns: usize,
    /// Radius of the symmetric smoothing filter applied after digitization.
    pub smoothing_radius: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 500,
            max_analysis_samples: 5000,
            display_max_points: 1000,
            columns_per_second: 150.0,

            peak_height_fraction: 0.5,
            refractory_fraction: 0.3,

            irregularity_cv: 0.15,
            tachycardia_bpm: 100.0,
            svt_bpm: 150.0,
            bradycardia_bpm: 50.0,

            p_window_fraction: 0.20,
            p_gap_fraction: 0.05,
            p_height_fraction: 0.12,

            st_window_fraction: 0.16,
            st_gap_fraction: 0.06,
            st_elevation_fraction: 0.25,

            grid_strategy: GridStrategy::ColorKey,
            grid_hue_low: 330.0,
            grid_hue_high: 25.0,
            grid_saturation_min: 0.12,
            grid_value_min: 0.35,
            morph_line_len: 21,

            strip_band: (0.72, 0.95),
            chart_margins: (0.08, 0.08, 0.04, 0.04),
            min_cell_px: 24,
            min_ink_columns: 16,
            smoothing_radius: 2,
        }
    }
}

impl AnalysisConfig {
    /// Minimum inter-beat distance in samples for the given rate.
    pub(crate) fn refractory_samples(&self, sample_rate_hz: f32) -> usize {
        ((self.refractory_fraction * sample_rate_hz) as usize).max(1)
    }
}
