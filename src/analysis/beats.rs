//! R-peak detection.
//!
//! Candidates are local maxima above an adaptive threshold (a fixed
//! fraction of the sequence's peak amplitude). A refractory distance, a
//! fraction of one second, keeps a single QRS complex or a tall T-wave
//! from producing two beats; within that distance only the taller
//! candidate survives.

use crate::config::AnalysisConfig;

/// Find beat sample indices in an amplitude sequence.
///
/// The result is strictly increasing with no two entries closer than the
/// configured refractory distance. Fewer than 2 beats is not an error;
/// the classifier reports it as insufficient signal.
pub fn detect_beats(samples: &[f32], sample_rate_hz: f32, cfg: &AnalysisConfig) -> Vec<usize> {
    if samples.len() < 3 {
        return Vec::new();
    }

    let max = samples.iter().cloned().fold(f32::MIN, f32::max);
    if max <= 0.0 {
        return Vec::new();
    }

    let threshold = max * cfg.peak_height_fraction;
    let min_distance = cfg.refractory_samples(sample_rate_hz);

    let mut beats: Vec<usize> = Vec::new();
    for i in 1..samples.len() - 1 {
        let v = samples[i];
        if v <= threshold {
            continue;
        }
        // Plateaus count once, at their left edge
        if !(v > samples[i - 1] && v >= samples[i + 1]) {
            continue;
        }

        match beats.last() {
            Some(&last) if i - last < min_distance => {
                // Refractory conflict: keep the taller candidate
                if v > samples[last] {
                    *beats.last_mut().unwrap() = i;
                }
            }
            _ => beats.push(i),
        }
    }

    beats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse_train(len: usize, period: usize, first: usize, height: f32) -> Vec<f32> {
        let mut samples = vec![0.0f32; len];
        let mut i = first;
        while i < len {
            samples[i] = height;
            i += period;
        }
        samples
    }

    #[test]
    fn test_all_zero_yields_no_beats() {
        let cfg = AnalysisConfig::default();
        let samples = vec![0.0f32; 5000];
        assert!(detect_beats(&samples, 500.0, &cfg).is_empty());
    }

    #[test]
    fn test_impulse_train_recovered() {
        let cfg = AnalysisConfig::default();
        // 72 bpm at 500 Hz: one impulse every ~417 samples over 10 s
        let period = (500.0 * 60.0 / 72.0) as usize;
        let samples = impulse_train(5000, period, 200, 1000.0);
        let expected = samples.iter().filter(|&&v| v > 0.0).count();

        let beats = detect_beats(&samples, 500.0, &cfg);
        assert!(
            (beats.len() as isize - expected as isize).abs() <= 1,
            "expected about {} beats, got {}",
            expected,
            beats.len()
        );
    }

    #[test]
    fn test_beats_strictly_increasing_and_spaced() {
        let cfg = AnalysisConfig::default();
        let samples = impulse_train(5000, 500, 250, 800.0);
        let beats = detect_beats(&samples, 500.0, &cfg);
        let min_distance = cfg.refractory_samples(500.0);
        for pair in beats.windows(2) {
            assert!(pair[1] > pair[0]);
            assert!(pair[1] - pair[0] >= min_distance);
        }
    }

    #[test]
    fn test_refractory_keeps_taller_candidate() {
        let cfg = AnalysisConfig::default();
        let mut samples = vec![0.0f32; 2000];
        // Two candidates 50 samples apart, second taller; only it survives
        samples[500] = 700.0;
        samples[550] = 1000.0;
        samples[1500] = 1000.0;

        let beats = detect_beats(&samples, 500.0, &cfg);
        assert_eq!(beats, vec![550, 1500]);
    }

    #[test]
    fn test_sub_threshold_peaks_ignored() {
        let cfg = AnalysisConfig::default();
        let mut samples = vec![0.0f32; 2000];
        samples[400] = 1000.0;
        samples[1400] = 100.0; // below half of the global peak

        let beats = detect_beats(&samples, 500.0, &cfg);
        assert_eq!(beats, vec![400]);
    }
}
