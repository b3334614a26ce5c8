//! # FPLL Carrier Recovery Library
//!
//! Carrier frequency/phase recovery for complex baseband streams: given
//! samples carrying an unknown residual carrier offset, the loop derotates
//! the signal to baseband and continuously re-estimates and corrects the
//! residual error with a second-order feedback loop around a numerically
//! controlled oscillator.
//!
//! ## Signal Flow
//!
//! ```text
//! in ──► [NCO step + derotate] ──► out
//!              │                      (corrected sample stream)
//!              ▼
//!     [single-pole IIR filter]
//!              │
//!              ▼
//!     [atan2 phase detector, saturated at ±π/2]
//!              │ scalar error
//!              ▼
//!     [NCO phase += α·err, freq += β·err]   (feedback, next sample)
//! ```
//!
//! The building blocks are exposed individually ([`nco::Nco`],
//! [`single_pole_iir::SinglePoleIir`], [`phase_detector::PhaseDetector`])
//! and composed by [`Fpll`], which runs the fixed per-sample pipeline.
//!
//! ## Example
//!
//! ```rust
//! use fpll_core::{Fpll, FpllConfig};
//! use num_complex::Complex64;
//! use std::f64::consts::PI;
//!
//! // Recover a 250 kHz residual carrier at 10 Msps
//! let mut fpll = Fpll::new(FpllConfig::new(10e6, 250e3)).unwrap();
//!
//! let samples: Vec<Complex64> = (0..1000)
//!     .map(|i| Complex64::from_polar(1.0, 2.0 * PI * 250e3 * i as f64 / 10e6))
//!     .collect();
//!
//! let baseband = fpll.process(&samples);
//! assert_eq!(baseband.len(), samples.len());
//! ```

pub mod fpll;
pub mod nco;
pub mod phase_detector;
pub mod single_pole_iir;
pub mod types;

pub use fpll::{Fpll, FpllConfig};
pub use types::{DspError, DspResult, IQBuffer, IQSample};
