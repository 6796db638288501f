use crate::error::AnalysisError;

/// An RGB raster, origin top-left, 3 bytes per pixel.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ImageFrame {
    /// Wrap a raw RGB buffer. `data.len()` must equal `width * height * 3`.
    pub fn from_rgb(data: Vec<u8>, width: usize, height: usize) -> Option<Self> {
        if data.len() != width * height * 3 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Decode an encoded raster (JPEG, PNG, ...) into a frame.
    pub fn decode(bytes: &[u8]) -> Result<Self, AnalysisError> {
        let img = image::load_from_memory(bytes)?;
        let rgb = img.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        Ok(Self {
            width,
            height,
            data: rgb.into_raw(),
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// RGB triple at (x, y). Out-of-bounds reads return black.
    pub fn pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0);
        }
        let idx = (y * self.width + x) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Raw interleaved RGB bytes.
    pub fn as_rgb(&self) -> &[u8] {
        &self.data
    }
}

/// Compact bit matrix marking signal-ink pixels (true = ink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl InkMask {
    /// Create an all-background mask with given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height + 7) / 8;
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Mask width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bit at (x, y); out-of-bounds reads are background.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        if value {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Number of ink pixels in the mask.
    pub fn count_ink(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for InkMask {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
