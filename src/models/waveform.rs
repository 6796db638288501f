/// Where an amplitude sequence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Decoded from a raw binary monitor recording.
    Holter,
    /// Extracted from a scanned or photographed chart.
    DigitizedImage,
}

/// An immutable amplitude sequence at a known sample rate.
#[derive(Debug, Clone)]
pub struct RawWaveform {
    samples: Vec<i16>,
    sample_rate_hz: u32,
    source_kind: SourceKind,
}

impl RawWaveform {
    /// Build a waveform from decoded samples.
    pub fn new(samples: Vec<i16>, sample_rate_hz: u32, source_kind: SourceKind) -> Self {
        Self {
            samples,
            sample_rate_hz,
            source_kind,
        }
    }

    /// The sample values, in recording order.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Declared sample rate in Hz.
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// Origin of this recording.
    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the recording holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples widened to f32 for the analysis stages.
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples.iter().map(|&s| s as f32).collect()
    }
}

/// One lead's amplitude-per-column sequence extracted from a chart region.
///
/// `samples` is empty when the source region held too few ink columns to
/// digitize; callers treat that as an unreadable region, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitizedLead {
    /// Canonical lead name ("II", "V1", ...).
    pub name: String,
    /// One amplitude per pixel column of the source region.
    pub samples: Vec<f32>,
}

impl DigitizedLead {
    /// True when the region could not be digitized.
    pub fn is_unreadable(&self) -> bool {
        self.samples.is_empty()
    }
}
