//! Grayscale binarization into ink masks.

use crate::models::InkMask;

/// Binarize a grayscale image with Otsu's method.
/// Returns an InkMask where true = dark (candidate ink).
pub fn otsu_ink_mask(gray: &[u8], width: usize, height: usize) -> InkMask {
    let threshold = calculate_otsu_threshold(gray);
    threshold_ink_mask(gray, width, height, threshold)
}

/// Calculate Otsu's optimal threshold over a grayscale buffer.
fn calculate_otsu_threshold(gray: &[u8]) -> u8 {
    // Build histogram
    let mut histogram = [0u32; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total_pixels = gray.len() as f64;
    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;

    for threshold in 0..=255u8 {
        let mut class1_pixels = 0u32;
        let mut class1_sum = 0u64;
        let mut class2_pixels = 0u32;
        let mut class2_sum = 0u64;

        for intensity in 0..=255u8 {
            let count = histogram[intensity as usize];
            if intensity < threshold {
                class1_pixels += count;
                class1_sum += count as u64 * intensity as u64;
            } else {
                class2_pixels += count;
                class2_sum += count as u64 * intensity as u64;
            }
        }

        if class1_pixels == 0 || class2_pixels == 0 {
            continue;
        }

        let class1_mean = class1_sum as f64 / class1_pixels as f64;
        let class2_mean = class2_sum as f64 / class2_pixels as f64;

        let weight1 = class1_pixels as f64 / total_pixels;
        let weight2 = class2_pixels as f64 / total_pixels;

        let variance = weight1 * weight2 * (class1_mean - class2_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold;
        }
    }

    optimal_threshold
}

/// Binarize against a fixed global threshold (true = pixel darker than it).
pub fn threshold_ink_mask(gray: &[u8], width: usize, height: usize, threshold: u8) -> InkMask {
    let mut mask = InkMask::new(width, height);

    for y in 0..height {
        for x in 0..width {
            if gray[y * width + x] < threshold {
                mask.set(x, y, true);
            }
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_ink_mask() {
        let gray = vec![100, 150, 200, 50]; // 2x2 image
        let mask = threshold_ink_mask(&gray, 2, 2, 128);

        assert!(mask.get(0, 0)); // 100 < 128
        assert!(!mask.get(1, 0)); // 150 >= 128
        assert!(!mask.get(0, 1)); // 200 >= 128
        assert!(mask.get(1, 1)); // 50 < 128
    }

    #[test]
    fn test_otsu_separates_two_classes() {
        // Dark half over light half
        let mut gray = vec![50u8; 50];
        gray.extend(vec![200u8; 50]);

        let mask = otsu_ink_mask(&gray, 10, 10);
        assert!(mask.get(0, 0)); // dark class is ink
        assert!(!mask.get(0, 7)); // light class is background
    }
}
