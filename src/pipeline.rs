//! End-to-end orchestration: one parameterized pipeline shared by both
//! input kinds. Byte buffers decode straight to a waveform; images go
//! through grid suppression, segmentation, and per-lead digitization
//! (leads are independent, so the 12-lead case fans out across the rayon
//! pool and joins before classification).

use rayon::prelude::*;

use crate::analysis::beats::detect_beats;
use crate::analysis::rhythm::{classify, st_elevated};
use crate::config::AnalysisConfig;
use crate::debug::debug_enabled;
use crate::digitizer::grid::suppress_grid;
use crate::digitizer::layout::{segment, LayoutMode};
use crate::digitizer::trace::digitize_region;
use crate::error::AnalysisError;
use crate::models::{
    Diagnosis, DiagnosticReport, DigitizedLead, ImageFrame, RawWaveform,
};

/// Analyze a decoded monitor recording.
pub(crate) fn analyze_waveform(wave: &RawWaveform, cfg: &AnalysisConfig) -> DiagnosticReport {
    let samples = wave.to_f32();
    let sample_rate = wave.sample_rate_hz() as f32;
    let beats = detect_beats(&samples, sample_rate, cfg);

    if debug_enabled() {
        eprintln!(
            "PIPELINE: holter input, {} samples at {} Hz, {} beats",
            samples.len(),
            sample_rate,
            beats.len()
        );
    }

    let diagnosis = classify(&beats, &samples, sample_rate, None, cfg);
    build_report(diagnosis, &samples, &[], cfg)
}

/// Analyze a decoded chart image.
pub(crate) fn analyze_frame(
    frame: &ImageFrame,
    mode: LayoutMode,
    cfg: &AnalysisConfig,
) -> Result<DiagnosticReport, AnalysisError> {
    let mask = suppress_grid(frame, cfg);
    let regions = segment(frame.width(), frame.height(), mode, cfg)?;

    // Each region's pipeline depends only on its own pixels
    let leads: Vec<DigitizedLead> = regions
        .par_iter()
        .map(|region| digitize_region(&mask, region, cfg))
        .collect();

    let unreadable: Vec<String> = leads
        .iter()
        .filter(|l| l.is_unreadable())
        .map(|l| l.name.clone())
        .collect();

    if debug_enabled() {
        eprintln!(
            "PIPELINE: {}x{} frame, {} ink px, {}/{} readable leads",
            frame.width(),
            frame.height(),
            mask.count_ink(),
            leads.len() - unreadable.len(),
            leads.len()
        );
    }

    // Lead II is the rhythm reference; fall back to the longest readable lead
    let reference = leads
        .iter()
        .find(|l| l.name == "II" && !l.is_unreadable())
        .or_else(|| {
            leads
                .iter()
                .filter(|l| !l.is_unreadable())
                .max_by_key(|l| l.samples.len())
        });

    let report = match reference {
        None => {
            let diagnosis = classify(&[], &[], cfg.columns_per_second, None, cfg);
            build_report(diagnosis, &[], &unreadable, cfg)
        }
        Some(lead) => {
            let sample_rate = cfg.columns_per_second;
            let beats = detect_beats(&lead.samples, sample_rate, cfg);

            // A lead that failed digitization is simply left out of the vote
            let st_flags: Option<Vec<(String, bool)>> = match mode {
                LayoutMode::TwelveLead => Some(
                    leads
                        .iter()
                        .filter(|l| !l.is_unreadable())
                        .map(|l| {
                            let lead_beats = detect_beats(&l.samples, sample_rate, cfg);
                            let flag = st_elevated(&l.samples, &lead_beats, sample_rate, cfg);
                            (l.name.clone(), flag)
                        })
                        .collect(),
                ),
                LayoutMode::SingleStrip => None,
            };

            let diagnosis = classify(
                &beats,
                &lead.samples,
                sample_rate,
                st_flags.as_deref(),
                cfg,
            );
            build_report(diagnosis, &lead.samples, &unreadable, cfg)
        }
    };

    Ok(report)
}

/// Assemble the wire report: rounded BPM, severity color, decimated
/// display waveform, and a detail line with the supporting metrics.
pub(crate) fn build_report(
    diagnosis: Diagnosis,
    display: &[f32],
    unreadable_leads: &[String],
    cfg: &AnalysisConfig,
) -> DiagnosticReport {
    let senal_grafica = decimate(display, cfg.display_max_points);

    let mut details: Vec<String> = Vec::new();
    if diagnosis.metrics.bpm > 0.0 {
        details.push(format!("rr_cv={:.3}", diagnosis.metrics.rr_cv));
    }
    if let Some(p) = diagnosis.metrics.p_wave_present {
        details.push(format!("p_wave={}", if p { "present" } else { "absent" }));
    }
    if !diagnosis.metrics.st_elevated_leads.is_empty() {
        details.push(format!(
            "st_elevation={}",
            diagnosis.metrics.st_elevated_leads.join("/")
        ));
    }
    if !unreadable_leads.is_empty() {
        details.push(format!("unreadable_leads={}", unreadable_leads.join("/")));
    }

    DiagnosticReport {
        frecuencia_cardiaca: diagnosis.metrics.bpm.round().max(0.0) as u32,
        diagnostico_texto: diagnosis.label,
        alerta_color: diagnosis.severity,
        senal_grafica,
        detalles: if details.is_empty() {
            None
        } else {
            Some(details.join("; "))
        },
    }
}

/// Constant-stride decimation down to the display point budget.
fn decimate(samples: &[f32], max_points: usize) -> Vec<f32> {
    if max_points == 0 || samples.len() <= max_points {
        return samples.to_vec();
    }
    let stride = samples.len().div_ceil(max_points);
    samples.iter().copied().step_by(stride).collect()
}
