//! Column-by-column trace extraction.
//!
//! For each pixel column of a region the median ink row becomes one
//! amplitude sample (inverted so an upward deflection is positive, per ECG
//! convention). Columns without ink carry the previous value forward and
//! are later replaced by linear interpolation between real ink columns, so
//! a broken trace does not produce synthetic flat shelves. A least-squares
//! detrend corrects photograph tilt and a short symmetric moving average
//! removes single-pixel digitization jitter.

use crate::config::AnalysisConfig;
use crate::models::{DigitizedLead, InkMask};

use super::layout::LeadRegion;

/// Digitize one region of the ink mask into an amplitude sequence.
///
/// Returns a lead with empty samples when fewer than
/// `cfg.min_ink_columns` columns contain ink; the caller reports that
/// region as unreadable instead of analyzing a meaningless waveform.
pub fn digitize_region(mask: &InkMask, region: &LeadRegion, cfg: &AnalysisConfig) -> DigitizedLead {
    let width = region.width();
    let height = region.height();

    let unreadable = DigitizedLead {
        name: region.name.clone(),
        samples: Vec::new(),
    };
    if width == 0 || height == 0 {
        return unreadable;
    }

    // Control points: (column, amplitude) where real ink was seen
    let mut control: Vec<(usize, f32)> = Vec::new();
    let mut raw = Vec::with_capacity(width);
    let mut last = height as f32 / 2.0;

    let mut rows = Vec::with_capacity(height);
    for cx in 0..width {
        rows.clear();
        for cy in 0..height {
            if mask.get(region.x1 + cx, region.y1 + cy) {
                rows.push(cy);
            }
        }
        if !rows.is_empty() {
            // Median row is robust to isolated noise pixels
            let mid = rows.len() / 2;
            let median = if rows.len() % 2 == 1 {
                rows[mid] as f32
            } else {
                (rows[mid - 1] + rows[mid]) as f32 / 2.0
            };
            last = height as f32 - median;
            control.push((cx, last));
        }
        raw.push(last);
    }

    if control.len() < cfg.min_ink_columns {
        return unreadable;
    }

    interpolate_gaps(&mut raw, &control);
    detrend(&mut raw);
    let samples = smooth(&raw, cfg.smoothing_radius);

    DigitizedLead {
        name: region.name.clone(),
        samples,
    }
}

/// Replace carried-forward shelves with linear segments between real
/// measurements. Before the first and after the last ink column the nearest
/// measured value is held.
fn interpolate_gaps(raw: &mut [f32], control: &[(usize, f32)]) {
    let (first_col, first_amp) = control[0];
    for value in raw.iter_mut().take(first_col) {
        *value = first_amp;
    }

    for pair in control.windows(2) {
        let (c0, a0) = pair[0];
        let (c1, a1) = pair[1];
        let span = (c1 - c0) as f32;
        for col in c0 + 1..c1 {
            let t = (col - c0) as f32 / span;
            raw[col] = a0 + (a1 - a0) * t;
        }
    }

    let (last_col, last_amp) = control[control.len() - 1];
    for value in raw.iter_mut().skip(last_col + 1) {
        *value = last_amp;
    }
}

/// Subtract the least-squares linear trend in place.
fn detrend(samples: &mut [f32]) {
    let n = samples.len() as f64;
    if samples.len() < 2 {
        return;
    }

    let mut sx = 0.0f64;
    let mut sy = 0.0f64;
    let mut sxx = 0.0f64;
    let mut sxy = 0.0f64;
    for (i, &v) in samples.iter().enumerate() {
        let x = i as f64;
        let y = v as f64;
        sx += x;
        sy += y;
        sxx += x * x;
        sxy += x * y;
    }

    let denom = n * sxx - sx * sx;
    if denom.abs() < f64::EPSILON {
        return;
    }
    let slope = (n * sxy - sx * sy) / denom;
    let intercept = (sy - slope * sx) / n;

    for (i, v) in samples.iter_mut().enumerate() {
        *v -= (intercept + slope * i as f64) as f32;
    }
}

/// Symmetric moving average with windows truncated at the edges.
fn smooth(samples: &[f32], radius: usize) -> Vec<f32> {
    if radius == 0 || samples.len() < 2 {
        return samples.to_vec();
    }

    let n = samples.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let lo = i.saturating_sub(radius);
        let hi = (i + radius).min(n - 1);
        let sum: f32 = samples[lo..=hi].iter().sum();
        out.push(sum / (hi - lo + 1) as f32);
    }
    out
}
