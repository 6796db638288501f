//! Chart digitization stages:
//! - Grid suppression (erasing the printed background grid)
//! - Lead segmentation (cropping named trace regions)
//! - Trace extraction (pixel columns to an amplitude sequence)

/// Printed-grid removal strategies.
pub mod grid;
/// Chart layout descriptors and region segmentation.
pub mod layout;
/// Column-by-column trace digitization.
pub mod trace;
