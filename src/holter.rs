//! Raw monitor-recording decode.
//!
//! Holter-style exports are a bare stream of little-endian signed 16-bit
//! samples at a declared rate. Decoding truncates to the configured
//! analysis window so a multi-hour recording does not blow up compute; it
//! never resamples.

use crate::error::AnalysisError;
use crate::models::{RawWaveform, SourceKind};

/// Decode little-endian int16 bytes into a waveform.
///
/// Fails when the buffer length is not a multiple of the 2-byte sample
/// width. An empty buffer decodes to a zero-length waveform; downstream
/// stages report it as insufficient signal.
pub fn decode_i16_le(
    bytes: &[u8],
    sample_rate_hz: u32,
    max_samples: usize,
) -> Result<RawWaveform, AnalysisError> {
    if bytes.len() % 2 != 0 {
        return Err(AnalysisError::Decode(bytes.len()));
    }

    let samples: Vec<i16> = bytes
        .chunks_exact(2)
        .take(max_samples)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(RawWaveform::new(samples, sample_rate_hz, SourceKind::Holter))
}

/// Exact inverse of [`decode_i16_le`]; useful for producing fixtures.
pub fn encode_i16_le(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    bytes
}
