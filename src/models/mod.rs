pub mod frame;
pub mod report;
pub mod waveform;

pub use frame::{ImageFrame, InkMask};
pub use report::{Diagnosis, DiagnosticReport, RhythmMetrics, Severity};
pub use waveform::{DigitizedLead, RawWaveform, SourceKind};
