//! RGB to luminance conversion.
//!
//! Y = 0.299*R + 0.587*G + 0.114*B, computed with fast integer arithmetic:
//! Y = (76*R + 150*G + 29*B) >> 8

use rayon::prelude::*;

const COEF_R: i32 = 76;
const COEF_G: i32 = 150;
const COEF_B: i32 = 29;

/// Convert an interleaved RGB buffer to one luminance byte per pixel.
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];

    let mut i = 0;
    // Process 8 pixels at a time with manual unrolling
    while i + 8 <= pixel_count {
        for j in 0..8 {
            let idx = (i + j) * 3;
            let r = rgb[idx] as i32;
            let g = rgb[idx + 1] as i32;
            let b = rgb[idx + 2] as i32;
            let lum = (COEF_R * r + COEF_G * g + COEF_B * b) >> 8;
            gray[i + j] = lum.min(255) as u8;
        }
        i += 8;
    }

    // Process remaining pixels
    for i in i..pixel_count {
        let idx = i * 3;
        let r = rgb[idx] as i32;
        let g = rgb[idx + 1] as i32;
        let b = rgb[idx + 2] as i32;
        let lum = (COEF_R * r + COEF_G * g + COEF_B * b) >> 8;
        gray[i] = lum.min(255) as u8;
    }

    gray
}

/// Convert RGB to grayscale processing rows in parallel.
/// Worthwhile for full-page chart scans; `rgb_to_grayscale` wins on strips.
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    let mut gray = vec![0u8; pixel_count];

    gray.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        let row_start = y * width * 3;
        for x in 0..width {
            let idx = row_start + x * 3;
            let r = rgb[idx] as i32;
            let g = rgb[idx + 1] as i32;
            let b = rgb[idx + 2] as i32;
            let lum = (COEF_R * r + COEF_G * g + COEF_B * b) >> 8;
            row[x] = lum.min(255) as u8;
        }
    });

    gray
}
