//! Rhythm analysis over a digitized amplitude sequence:
//! - R-peak detection with an adaptive threshold and refractory distance
//! - RR-interval statistics and rule-based rhythm classification

pub mod beats;
pub mod rhythm;
