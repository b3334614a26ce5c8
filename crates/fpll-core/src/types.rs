//! Core types for carrier recovery processing
//!
//! Complex I/Q sample aliases and the crate-wide error type. Signals are
//! represented as `Complex64` values where the real part is the in-phase
//! (I) component and the imaginary part the quadrature (Q) component.

use num_complex::Complex64;

/// A single I/Q sample point.
pub type IQSample = Complex64;

/// A buffer of I/Q samples.
pub type IQBuffer = Vec<IQSample>;

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;

/// Errors that can occur when setting up a DSP block.
///
/// The per-sample processing path itself has no error conditions; a
/// failure is always a configuration problem caught at construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DspError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
