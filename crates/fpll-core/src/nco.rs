//! Numerically Controlled Oscillator (NCO)
//!
//! Phase accumulator with an independently adjustable frequency, built for
//! use inside feedback loops: `step` advances the phase, `sincos` reads the
//! current sine/cosine pair, and `adjust_phase`/`adjust_freq` apply the loop
//! corrections. Unlike a tone-generator NCO, stepping and reading are
//! separate operations so a controller can interleave its own updates
//! between them.
//!
//! ## Example
//!
//! ```rust
//! use fpll_core::nco::Nco;
//!
//! // 0.1 rad/sample oscillator
//! let mut nco = Nco::new(0.1, 0.0);
//! nco.step();
//! let (sin, cos) = nco.sincos();
//! assert!((sin - 0.1_f64.sin()).abs() < 1e-12);
//! assert!((cos - 0.1_f64.cos()).abs() < 1e-12);
//! ```

use std::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;

/// Numerically controlled oscillator.
///
/// Owns a phase accumulator (radians) and a frequency (radians/sample).
/// The oscillator never clamps its own state; any bounding of corrections
/// is the responsibility of the loop driving it.
#[derive(Debug, Clone)]
pub struct Nco {
    /// Phase accumulator (radians).
    phase: f64,
    /// Phase increment per sample (radians/sample).
    freq: f64,
}

impl Nco {
    /// Create an oscillator at the given frequency (radians/sample) and
    /// initial phase (radians).
    pub fn new(freq: f64, phase: f64) -> Self {
        Self { phase, freq }
    }

    /// Set the frequency (radians/sample).
    pub fn set_frequency(&mut self, freq: f64) {
        self.freq = freq;
    }

    /// Set the phase (radians).
    pub fn set_phase(&mut self, phase: f64) {
        self.phase = phase;
    }

    /// Advance the phase by one sample period: `phase += freq`.
    ///
    /// Folds the accumulator back into `[-2π, 2π]` once it winds past a
    /// full turn, so sine/cosine accuracy stays bounded over arbitrarily
    /// long runs. The fold is a multiple of 2π and does not change the
    /// generated waveform.
    #[inline]
    pub fn step(&mut self) {
        self.phase += self.freq;
        if self.phase > TWO_PI {
            self.phase -= TWO_PI;
        } else if self.phase < -TWO_PI {
            self.phase += TWO_PI;
        }
    }

    /// Sine and cosine of the current phase.
    #[inline]
    pub fn sincos(&self) -> (f64, f64) {
        self.phase.sin_cos()
    }

    /// Add a correction to the phase (radians). Pure accumulation.
    #[inline]
    pub fn adjust_phase(&mut self, delta: f64) {
        self.phase += delta;
    }

    /// Add a correction to the frequency (radians/sample). Pure accumulation.
    #[inline]
    pub fn adjust_freq(&mut self, delta: f64) {
        self.freq += delta;
    }

    /// Current phase (radians).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Current frequency (radians/sample).
    pub fn frequency(&self) -> f64 {
        self.freq
    }

    /// Reset the phase accumulator to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
