//! Pixel-level helpers shared by the digitization stages:
//! - Grayscale conversion (RGB to luminance)
//! - Binarization (Otsu's method and fixed-threshold ink masks)

pub mod binarization;
pub mod grayscale;
