//! Error types for the pipeline crate.
//!
//! Boundary input is rejected, never silently defaulted or clamped: a
//! malformed trial count, a zero entropy window, or a detector value outside
//! `[0.0, 1.0]` each surface as their own variant. Empty or too-short
//! bitstreams are not errors — the affected operations return empty output.

pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Trial count was non-numeric or negative.
    #[error("invalid trial count: {0:?}")]
    InvalidCount(String),

    /// Entropy window must be a positive number of bits.
    #[error("entropy window must be positive, got {0}")]
    InvalidWindow(usize),

    /// A detector value fell outside `[0.0, 1.0]`.
    #[error("detector value {value} at reading {index} is outside [0.0, 1.0]")]
    InvalidChannelReading { index: usize, value: f64 },

    /// A persisted bitstream contained something other than `0`/`1`.
    #[error("invalid bitstream byte {byte:#04x} at position {position}")]
    InvalidBitstream { position: usize, byte: u8 },

    /// I/O error while saving or loading a bitstream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
