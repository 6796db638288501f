//! Printed-grid suppression.
//!
//! Chart paper carries a red/pink millimeter grid that would otherwise
//! dominate the ink mask. Two interchangeable strategies remove it:
//!
//! - `ColorKey`: classify grid pixels by hue in HSV space and repaint them
//!   as background before binarizing. Cheap, but blind on grayscale photos.
//! - `Morphology`: isolate long horizontal and vertical runs with
//!   directional openings and subtract them from the dark mask. Works
//!   without color, at the cost of occasionally nicking trace segments that
//!   run parallel to the grid; a small close-then-open pass reconnects them.

use crate::config::AnalysisConfig;
use crate::models::{ImageFrame, InkMask};
use crate::utils::binarization::otsu_ink_mask;
use crate::utils::grayscale::{rgb_to_grayscale, rgb_to_grayscale_parallel};

/// Which grid-removal strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStrategy {
    /// Hue-band classification of the red/pink grid (needs color input).
    ColorKey,
    /// Directional-opening line extraction (works on grayscale).
    Morphology,
}

/// Remove the printed grid from a frame, returning the signal-ink mask.
pub fn suppress_grid(frame: &ImageFrame, cfg: &AnalysisConfig) -> InkMask {
    match cfg.grid_strategy {
        GridStrategy::ColorKey => suppress_by_color(frame, cfg),
        GridStrategy::Morphology => suppress_by_morphology(frame, cfg),
    }
}

/// Parallel grayscale pays off on full-page scans only.
fn to_gray(frame: &ImageFrame) -> Vec<u8> {
    if frame.width() * frame.height() >= 640 * 480 {
        rgb_to_grayscale_parallel(frame.as_rgb(), frame.width(), frame.height())
    } else {
        rgb_to_grayscale(frame.as_rgb(), frame.width(), frame.height())
    }
}

fn suppress_by_color(frame: &ImageFrame, cfg: &AnalysisConfig) -> InkMask {
    let (width, height) = (frame.width(), frame.height());
    let mut gray = to_gray(frame);

    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = frame.pixel(x, y);
            let (h, s, v) = rgb_to_hsv(r, g, b);
            if is_grid_color(h, s, v, cfg) {
                // Repaint as paper background
                gray[y * width + x] = 255;
            }
        }
    }

    otsu_ink_mask(&gray, width, height)
}

fn suppress_by_morphology(frame: &ImageFrame, cfg: &AnalysisConfig) -> InkMask {
    let (width, height) = (frame.width(), frame.height());
    let gray = to_gray(frame);
    let dark = otsu_ink_mask(&gray, width, height);

    // Directional openings keep only runs at least as long as the element
    let len = cfg.morph_line_len.max(3);
    let horizontal = dilate_line(&erode_line(&dark, len, true), len, true);
    let vertical = dilate_line(&erode_line(&dark, len, false), len, false);

    let mut ink = InkMask::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let is_grid = horizontal.get(x, y) || vertical.get(x, y);
            if dark.get(x, y) && !is_grid {
                ink.set(x, y, true);
            }
        }
    }

    // Close, then open: reconnect ink broken by the subtraction without
    // re-admitting single-pixel grid remnants
    let closed = erode3(&dilate3(&ink));
    dilate3(&erode3(&closed))
}

/// True when the HSV triple falls inside the configured wrapped red band.
fn is_grid_color(h: f32, s: f32, v: f32, cfg: &AnalysisConfig) -> bool {
    let in_band = h >= cfg.grid_hue_low || h <= cfg.grid_hue_high;
    in_band && s >= cfg.grid_saturation_min && v >= cfg.grid_value_min
}

/// RGB (0-255) to HSV with hue in degrees [0, 360) and s, v in [0, 1].
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

/// Erosion with a 1×len (horizontal) or len×1 (vertical) structuring element.
fn erode_line(mask: &InkMask, len: usize, horizontal: bool) -> InkMask {
    let (width, height) = (mask.width(), mask.height());
    let half = len / 2;
    let mut out = InkMask::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut keep = true;
            for d in 0..len {
                let off = d as isize - half as isize;
                let (nx, ny) = if horizontal {
                    (x as isize + off, y as isize)
                } else {
                    (x as isize, y as isize + off)
                };
                if nx < 0 || ny < 0 || !mask.get(nx as usize, ny as usize) {
                    keep = false;
                    break;
                }
            }
            if keep {
                out.set(x, y, true);
            }
        }
    }

    out
}

/// Dilation with a 1×len or len×1 structuring element.
fn dilate_line(mask: &InkMask, len: usize, horizontal: bool) -> InkMask {
    let (width, height) = (mask.width(), mask.height());
    let half = len / 2;
    let mut out = InkMask::new(width, height);

    for y in 0..height {
        for x in 0..width {
            for d in 0..len {
                let off = d as isize - half as isize;
                let (nx, ny) = if horizontal {
                    (x as isize + off, y as isize)
                } else {
                    (x as isize, y as isize + off)
                };
                if nx >= 0 && ny >= 0 && mask.get(nx as usize, ny as usize) {
                    out.set(x, y, true);
                    break;
                }
            }
        }
    }

    out
}

fn erode3(mask: &InkMask) -> InkMask {
    let (width, height) = (mask.width(), mask.height());
    let mut out = InkMask::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut keep = true;
            'probe: for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx < 0 || ny < 0 || !mask.get(nx as usize, ny as usize) {
                        keep = false;
                        break 'probe;
                    }
                }
            }
            if keep {
                out.set(x, y, true);
            }
        }
    }
    out
}

fn dilate3(mask: &InkMask) -> InkMask {
    let (width, height) = (mask.width(), mask.height());
    let mut out = InkMask::new(width, height);
    for y in 0..height {
        for x in 0..width {
            'probe: for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx >= 0 && ny >= 0 && mask.get(nx as usize, ny as usize) {
                        out.set(x, y, true);
                        break 'probe;
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageFrame;

    fn frame_filled(width: usize, height: usize, rgb: (u8, u8, u8)) -> ImageFrame {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&[rgb.0, rgb.1, rgb.2]);
        }
        ImageFrame::from_rgb(data, width, height).unwrap()
    }

    fn paint(frame: &mut Vec<u8>, width: usize, x: usize, y: usize, rgb: (u8, u8, u8)) {
        let idx = (y * width + x) * 3;
        frame[idx] = rgb.0;
        frame[idx + 1] = rgb.1;
        frame[idx + 2] = rgb.2;
    }

    #[test]
    fn test_hsv_conversion() {
        let (h, s, v) = rgb_to_hsv(255, 0, 0);
        assert!(h < 1.0 || h > 359.0);
        assert!((s - 1.0).abs() < 1e-6);
        assert!((v - 1.0).abs() < 1e-6);

        let (_, s, v) = rgb_to_hsv(0, 0, 0);
        assert_eq!(s, 0.0);
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_color_key_removes_red_keeps_black() {
        let width = 40;
        let height = 20;
        let mut data = vec![255u8; width * height * 3];
        // Red grid line down column 5
        for y in 0..height {
            paint(&mut data, width, 5, y, (255, 110, 110));
        }
        // Black trace along row 10
        for x in 0..width {
            paint(&mut data, width, x, 10, (10, 10, 10));
        }
        let frame = ImageFrame::from_rgb(data, width, height).unwrap();
        let cfg = AnalysisConfig::default();

        let ink = suppress_by_color(&frame, &cfg);
        assert!(ink.get(20, 10), "trace ink must survive");
        assert!(!ink.get(5, 3), "grid ink must be erased");
    }

    #[test]
    fn test_morphology_removes_long_lines() {
        let width = 64;
        let height = 64;
        let mut data = vec![255u8; width * height * 3];
        // Dark full-width horizontal grid line
        for x in 0..width {
            paint(&mut data, width, x, 8, (40, 40, 40));
        }
        // Short thick blob of trace ink
        for y in 30..36 {
            for x in 30..36 {
                paint(&mut data, width, x, y, (0, 0, 0));
            }
        }
        let frame = ImageFrame::from_rgb(data, width, height).unwrap();
        let cfg = AnalysisConfig::default();

        let ink = suppress_by_morphology(&frame, &cfg);
        assert!(!ink.get(32, 8), "long horizontal run must be treated as grid");
        assert!(ink.get(32, 32), "compact trace ink must survive");
    }

    #[test]
    fn test_blank_frame_yields_sparse_mask() {
        let frame = frame_filled(32, 32, (255, 255, 255));
        let cfg = AnalysisConfig::default();
        let ink = suppress_grid(&frame, &cfg);
        assert_eq!(ink.count_ink(), 0);
    }
}
