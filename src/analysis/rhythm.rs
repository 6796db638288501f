//! Rule-based rhythm classification.
//!
//! From the beat list we derive RR intervals, their mean and standard
//! deviation, the heart rate, and a dimensionless regularity measure
//! (coefficient of variation, stddev/mean). Optionally the window before
//! each beat is probed for a small atrial deflection (P-wave) and, in
//! 12-lead mode, per-lead post-beat windows are checked for sustained
//! elevation. Classification is a pure function: identical inputs always
//! yield the identical diagnosis. An implausible rate is reported as
//! unreadable rather than replaced with a guessed value.

use crate::config::AnalysisConfig;
use crate::models::{Diagnosis, RhythmMetrics, Severity};

/// RR-interval statistics for a beat list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RrStats {
    /// Mean RR interval in samples.
    pub mean: f32,
    /// Population standard deviation of the RR intervals, samples.
    pub stddev: f32,
    /// Heart rate derived from the mean interval, beats per minute.
    pub bpm: f32,
    /// Coefficient of variation, stddev / mean.
    pub cv: f32,
}

/// Compute RR statistics; None with fewer than 2 beats.
pub fn rr_stats(beats: &[usize], sample_rate_hz: f32) -> Option<RrStats> {
    if beats.len() < 2 {
        return None;
    }

    let intervals: Vec<f32> = beats.windows(2).map(|w| (w[1] - w[0]) as f32).collect();
    let mean = intervals.iter().sum::<f32>() / intervals.len() as f32;
    if mean <= 0.0 {
        return None;
    }
    let variance =
        intervals.iter().map(|rr| (rr - mean).powi(2)).sum::<f32>() / intervals.len() as f32;
    let stddev = variance.sqrt();

    Some(RrStats {
        mean,
        stddev,
        bpm: 60.0 * sample_rate_hz / mean,
        cv: stddev / mean,
    })
}

/// Probe the window preceding each beat for an atrial deflection.
///
/// The window excludes a short buffer abutting the beat so the QRS
/// upstroke is not mistaken for a P-wave. Returns true when a deflection
/// above the configured fraction of the global peak precedes a majority
/// of beats.
pub fn p_waves_present(
    beats: &[usize],
    samples: &[f32],
    sample_rate_hz: f32,
    cfg: &AnalysisConfig,
) -> bool {
    if beats.len() < 2 || samples.is_empty() {
        return false;
    }

    let peak = samples.iter().cloned().fold(f32::MIN, f32::max);
    if peak <= 0.0 {
        return false;
    }
    let p_threshold = peak * cfg.p_height_fraction;
    let window = ((cfg.p_window_fraction * sample_rate_hz) as usize).max(2);
    let gap = (cfg.p_gap_fraction * sample_rate_hz) as usize;

    let mut preceded = 0usize;
    for &beat in beats {
        let end = beat.saturating_sub(gap);
        let start = end.saturating_sub(window);
        if end <= start + 1 {
            continue;
        }
        for i in start + 1..end.min(samples.len()).saturating_sub(1) {
            let v = samples[i];
            if v > p_threshold && v > samples[i - 1] && v >= samples[i + 1] {
                preceded += 1;
                break;
            }
        }
    }

    preceded * 2 > beats.len()
}

/// Check one lead for sustained post-beat elevation.
///
/// The mean amplitude of the window following each beat (after a short
/// buffer) is compared against the configured fraction of the lead's peak;
/// the lead is flagged when a majority of beats show elevation.
pub fn st_elevated(
    samples: &[f32],
    beats: &[usize],
    sample_rate_hz: f32,
    cfg: &AnalysisConfig,
) -> bool {
    if beats.len() < 2 || samples.is_empty() {
        return false;
    }

    let peak = samples.iter().cloned().fold(f32::MIN, f32::max);
    if peak <= 0.0 {
        return false;
    }
    let cutoff = peak * cfg.st_elevation_fraction;
    let gap = ((cfg.st_gap_fraction * sample_rate_hz) as usize).max(1);
    let window = ((cfg.st_window_fraction * sample_rate_hz) as usize).max(2);

    let mut elevated = 0usize;
    for &beat in beats {
        let start = (beat + gap).min(samples.len());
        let end = (beat + gap + window).min(samples.len());
        if end <= start {
            continue;
        }
        let mean = samples[start..end].iter().sum::<f32>() / (end - start) as f32;
        if mean > cutoff {
            elevated += 1;
        }
    }

    elevated * 2 > beats.len()
}

/// Anatomical neighborhood of the standard lead names. Elevation confined
/// to one contiguous territory is less specific than elevation across
/// unrelated territories, which is what the injury override looks for.
fn leads_adjacent(a: &str, b: &str) -> bool {
    const PRECORDIAL: [&str; 6] = ["V1", "V2", "V3", "V4", "V5", "V6"];
    const INFERIOR: [&str; 3] = ["II", "III", "aVF"];
    const LATERAL: [&str; 2] = ["I", "aVL"];

    if let (Some(ia), Some(ib)) = (
        PRECORDIAL.iter().position(|&n| n == a),
        PRECORDIAL.iter().position(|&n| n == b),
    ) {
        return ia.abs_diff(ib) <= 1;
    }
    if INFERIOR.contains(&a) && INFERIOR.contains(&b) {
        return true;
    }
    if LATERAL.contains(&a) && LATERAL.contains(&b) {
        return true;
    }
    false
}

/// Names of leads flagged for elevation, when at least two of them are
/// anatomically non-adjacent; empty otherwise.
fn injury_pattern(st_flags: &[(String, bool)]) -> Vec<String> {
    let elevated: Vec<&String> = st_flags.iter().filter(|(_, f)| *f).map(|(n, _)| n).collect();
    if elevated.len() < 2 {
        return Vec::new();
    }
    for (i, a) in elevated.iter().enumerate() {
        for b in elevated.iter().skip(i + 1) {
            if !leads_adjacent(a, b) {
                return elevated.iter().map(|n| n.to_string()).collect();
            }
        }
    }
    Vec::new()
}

/// Map beat statistics (and optional per-lead ST flags) to a diagnosis.
pub fn classify(
    beats: &[usize],
    samples: &[f32],
    sample_rate_hz: f32,
    st_flags: Option<&[(String, bool)]>,
    cfg: &AnalysisConfig,
) -> Diagnosis {
    let mut diagnosis = match rr_stats(beats, sample_rate_hz) {
        None => Diagnosis {
            label: "insufficient signal".to_string(),
            severity: Severity::Unreadable,
            metrics: RhythmMetrics::unreadable(),
        },
        Some(stats) => {
            let p_present = p_waves_present(beats, samples, sample_rate_hz, cfg);
            let (label, severity) = classify_rhythm(&stats, p_present, cfg);
            Diagnosis {
                label: label.to_string(),
                severity,
                metrics: RhythmMetrics {
                    bpm: stats.bpm,
                    rr_cv: stats.cv,
                    p_wave_present: Some(p_present),
                    st_elevated_leads: Vec::new(),
                },
            }
        }
    };

    if let Some(flags) = st_flags {
        let implicated = injury_pattern(flags);
        if !implicated.is_empty() {
            diagnosis.label = format!(
                "possible acute injury pattern (ST elevation: {})",
                implicated.join(", ")
            );
            diagnosis.severity = Severity::Critical;
            diagnosis.metrics.st_elevated_leads = implicated;
        }
    }

    diagnosis
}

fn classify_rhythm(
    stats: &RrStats,
    p_present: bool,
    cfg: &AnalysisConfig,
) -> (&'static str, Severity) {
    if stats.cv > cfg.irregularity_cv {
        if !p_present {
            return ("atrial fibrillation", Severity::Critical);
        }
        let severity = if stats.bpm >= cfg.bradycardia_bpm && stats.bpm <= cfg.tachycardia_bpm {
            Severity::Normal
        } else {
            Severity::Caution
        };
        return ("sinus arrhythmia", severity);
    }

    if stats.bpm > cfg.tachycardia_bpm {
        if stats.bpm > cfg.svt_bpm && !p_present {
            return (
                "possible supraventricular tachycardia",
                Severity::Critical,
            );
        }
        return ("tachycardia", Severity::Caution);
    }

    if stats.bpm < cfg.bradycardia_bpm {
        return ("bradycardia", Severity::Normal);
    }

    ("normal sinus rhythm", Severity::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beats_from_intervals(first: usize, intervals: &[usize]) -> Vec<usize> {
        let mut beats = vec![first];
        for &rr in intervals {
            beats.push(beats.last().unwrap() + rr);
        }
        beats
    }

    #[test]
    fn test_too_few_beats_is_unreadable() {
        let cfg = AnalysisConfig::default();
        let d = classify(&[400], &vec![0.0; 5000], 500.0, None, &cfg);
        assert_eq!(d.severity, Severity::Unreadable);
        assert_eq!(d.metrics.bpm, 0.0);
        assert_eq!(d.label, "insufficient signal");
    }

    #[test]
    fn test_regular_60_bpm_is_normal() {
        let cfg = AnalysisConfig::default();
        let beats = beats_from_intervals(250, &[500; 9]);
        let samples = vec![0.0f32; 5000];
        let d = classify(&beats, &samples, 500.0, None, &cfg);
        assert_eq!(d.label, "normal sinus rhythm");
        assert_eq!(d.severity, Severity::Normal);
        assert!((d.metrics.bpm - 60.0).abs() < 0.5);
        assert!(d.metrics.rr_cv < 0.01);
    }

    #[test]
    fn test_irregular_without_p_waves_is_afib() {
        let cfg = AnalysisConfig::default();
        // Alternating 400/600 intervals: mean 500, CV = 0.2
        let beats = beats_from_intervals(250, &[400, 600, 400, 600, 400, 600, 400, 600]);
        let samples = vec![0.0f32; 5000];
        let d = classify(&beats, &samples, 500.0, None, &cfg);
        assert_eq!(d.label, "atrial fibrillation");
        assert_eq!(d.severity, Severity::Critical);
        assert!(d.metrics.rr_cv > cfg.irregularity_cv);
    }

    #[test]
    fn test_irregular_with_p_waves_is_sinus_arrhythmia() {
        let cfg = AnalysisConfig::default();
        let beats = beats_from_intervals(300, &[400, 600, 400, 600, 400, 600, 400, 600]);
        // QRS peaks with a smaller deflection ~60 samples before each beat
        let mut samples = vec![0.0f32; 5000];
        for &b in &beats {
            samples[b] = 1000.0;
            samples[b - 60] = 200.0;
        }
        let d = classify(&beats, &samples, 500.0, None, &cfg);
        assert_eq!(d.label, "sinus arrhythmia");
        assert_eq!(d.severity, Severity::Normal);
        assert_eq!(d.metrics.p_wave_present, Some(true));
    }

    #[test]
    fn test_fast_regular_is_tachycardia() {
        let cfg = AnalysisConfig::default();
        // RR 230 samples at 500 Hz is ~130 bpm
        let beats = beats_from_intervals(200, &[230; 12]);
        let mut samples = vec![0.0f32; 5000];
        for &b in &beats {
            samples[b] = 1000.0;
            samples[b - 40] = 200.0; // atrial component present
        }
        let d = classify(&beats, &samples, 500.0, None, &cfg);
        assert_eq!(d.label, "tachycardia");
        assert_eq!(d.severity, Severity::Caution);
    }

    #[test]
    fn test_very_fast_without_p_waves_is_svt() {
        let cfg = AnalysisConfig::default();
        // RR 170 samples at 500 Hz is ~176 bpm
        let beats = beats_from_intervals(200, &[170; 15]);
        let samples = vec![0.0f32; 5000];
        let d = classify(&beats, &samples, 500.0, None, &cfg);
        assert_eq!(d.label, "possible supraventricular tachycardia");
        assert_eq!(d.severity, Severity::Critical);
    }

    #[test]
    fn test_slow_regular_is_bradycardia() {
        let cfg = AnalysisConfig::default();
        // RR 750 samples at 500 Hz is 40 bpm
        let beats = beats_from_intervals(200, &[750; 5]);
        let samples = vec![0.0f32; 5000];
        let d = classify(&beats, &samples, 500.0, None, &cfg);
        assert_eq!(d.label, "bradycardia");
        assert_eq!(d.severity, Severity::Normal);
    }

    #[test]
    fn test_st_override_requires_non_adjacent_leads() {
        let cfg = AnalysisConfig::default();
        let beats = beats_from_intervals(250, &[500; 9]);
        let samples = vec![0.0f32; 5000];

        // V2+V3 are neighbors: no override
        let adjacent = vec![("V2".to_string(), true), ("V3".to_string(), true)];
        let d = classify(&beats, &samples, 500.0, Some(&adjacent), &cfg);
        assert_eq!(d.label, "normal sinus rhythm");

        // V1 and V5 are not: override fires
        let apart = vec![
            ("V1".to_string(), true),
            ("V5".to_string(), true),
            ("II".to_string(), false),
        ];
        let d = classify(&beats, &samples, 500.0, Some(&apart), &cfg);
        assert_eq!(d.severity, Severity::Critical);
        assert!(d.label.contains("ST elevation"));
        assert_eq!(d.metrics.st_elevated_leads, vec!["V1", "V5"]);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let cfg = AnalysisConfig::default();
        let beats = beats_from_intervals(250, &[480, 530, 470, 540, 490]);
        let samples = vec![0.0f32; 5000];
        let a = classify(&beats, &samples, 500.0, None, &cfg);
        let b = classify(&beats, &samples, 500.0, None, &cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn test_adjacency_table() {
        assert!(leads_adjacent("V2", "V3"));
        assert!(!leads_adjacent("V1", "V4"));
        assert!(leads_adjacent("II", "aVF"));
        assert!(leads_adjacent("I", "aVL"));
        assert!(!leads_adjacent("aVR", "V6"));
        assert!(!leads_adjacent("I", "II"));
    }
}
