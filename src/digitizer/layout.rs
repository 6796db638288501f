//! Lead segmentation.
//!
//! Charts come in two layouts: a single rhythm strip along the bottom of
//! the page, or the standard 12-lead arrangement of 3 rows by 4 columns.
//! The 12-lead geometry is a data-driven [`LeadLayout`] so that alternate
//! chart formats only need a different descriptor, not new code.

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// Caller hint describing how the chart is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// One continuous rhythm strip (assumed lead II). The default when the
    /// caller supplies no hint.
    #[default]
    SingleStrip,
    /// Standard 12-lead chart, 3 rows by 4 columns.
    TwelveLead,
}

/// A named rectangular crop over a cleaned frame. Half-open on the
/// bottom/right edge: pixels with `x1 <= x < x2`, `y1 <= y < y2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRegion {
    /// Canonical lead name.
    pub name: String,
    /// Left edge, inclusive.
    pub x1: usize,
    /// Top edge, inclusive.
    pub y1: usize,
    /// Right edge, exclusive.
    pub x2: usize,
    /// Bottom edge, exclusive.
    pub y2: usize,
}

impl LeadRegion {
    /// Region width in pixels.
    pub fn width(&self) -> usize {
        self.x2 - self.x1
    }

    /// Region height in pixels.
    pub fn height(&self) -> usize {
        self.y2 - self.y1
    }
}

/// Grid geometry of a multi-lead chart: cell counts, the name matrix in
/// row-major order, and the page margins reserved for printed labels.
#[derive(Debug, Clone)]
pub struct LeadLayout {
    /// Number of cell rows.
    pub rows: usize,
    /// Number of cell columns.
    pub cols: usize,
    /// Lead names, row-major, `rows * cols` entries.
    pub names: Vec<&'static str>,
    /// (top, bottom, left, right) margin fractions trimmed before cells.
    pub margins: (f32, f32, f32, f32),
}

impl LeadLayout {
    /// The standard 12-lead chart arrangement.
    pub fn twelve_lead(margins: (f32, f32, f32, f32)) -> Self {
        Self {
            rows: 3,
            cols: 4,
            names: vec![
                "I", "aVR", "V1", "V4", //
                "II", "aVL", "V2", "V5", //
                "III", "aVF", "V3", "V6",
            ],
            margins,
        }
    }

    /// Partition the active area of a `width`×`height` frame into equal
    /// cells, one region per lead name.
    pub fn segment(
        &self,
        width: usize,
        height: usize,
        min_cell_px: usize,
    ) -> Result<Vec<LeadRegion>, AnalysisError> {
        let (top, bottom, left, right) = self.margins;
        let x0 = (width as f32 * left) as usize;
        let x1 = width - (width as f32 * right) as usize;
        let y0 = (height as f32 * top) as usize;
        let y1 = height - (height as f32 * bottom) as usize;

        if x1 <= x0 || y1 <= y0 {
            return Err(AnalysisError::Layout(format!(
                "active area is empty for a {}x{} image",
                width, height
            )));
        }

        let cell_w = (x1 - x0) / self.cols;
        let cell_h = (y1 - y0) / self.rows;
        if cell_w < min_cell_px || cell_h < min_cell_px {
            return Err(AnalysisError::Layout(format!(
                "{}x{} cells are below the {} px minimum",
                cell_w, cell_h, min_cell_px
            )));
        }

        let mut regions = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let name = self.names[row * self.cols + col];
                regions.push(LeadRegion {
                    name: name.to_string(),
                    x1: x0 + col * cell_w,
                    y1: y0 + row * cell_h,
                    x2: x0 + (col + 1) * cell_w,
                    y2: y0 + (row + 1) * cell_h,
                });
            }
        }
        Ok(regions)
    }
}

/// Crop the regions for the given layout mode.
pub fn segment(
    width: usize,
    height: usize,
    mode: LayoutMode,
    cfg: &AnalysisConfig,
) -> Result<Vec<LeadRegion>, AnalysisError> {
    match mode {
        LayoutMode::SingleStrip => {
            let (top, bottom) = cfg.strip_band;
            let y1 = (height as f32 * top) as usize;
            let y2 = ((height as f32 * bottom) as usize).min(height);
            if y2 <= y1 || y2 - y1 < cfg.min_cell_px || width < cfg.min_cell_px {
                return Err(AnalysisError::Layout(format!(
                    "rhythm strip band is unusable for a {}x{} image",
                    width, height
                )));
            }
            Ok(vec![LeadRegion {
                name: "II".to_string(),
                x1: 0,
                y1,
                x2: width,
                y2,
            }])
        }
        LayoutMode::TwelveLead => {
            LeadLayout::twelve_lead(cfg.chart_margins).segment(width, height, cfg.min_cell_px)
        }
    }
}
