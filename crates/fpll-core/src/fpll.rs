//! FPLL — Frequency/Phase Locked Loop carrier recovery
//!
//! Derotates a complex baseband stream carrying an unknown residual carrier
//! frequency/phase offset and continuously re-estimates the residual error
//! with a second-order feedback loop driven by an NCO.
//!
//! Per sample, in this order:
//! 1. Advance the NCO phase
//! 2. Derotate the input by the NCO sine/cosine pair — this is the output
//! 3. Smooth the derotated sample with a single-pole IIR loop filter
//! 4. Detect the phase error via saturating `atan2`
//! 5. Feed back: `phase += alpha * error` (proportional),
//!    `freq += beta * error` (integral)
//!
//! The recurrence is sequentially dependent sample to sample, so samples of
//! one stream must be processed strictly in order; output values do not
//! depend on how the stream is chunked into batches. Independent streams
//! each get their own [`Fpll`] instance and may run on separate threads
//! with no coordination.
//!
//! ## Example
//!
//! ```rust
//! use fpll_core::fpll::{Fpll, FpllConfig};
//! use num_complex::Complex64;
//! use std::f64::consts::PI;
//!
//! // Track a 100 Hz residual carrier at 48 kHz
//! let mut fpll = Fpll::new(FpllConfig::new(48_000.0, 0.0)).unwrap();
//! let pilot: Vec<Complex64> = (0..256)
//!     .map(|i| Complex64::from_polar(1.0, 2.0 * PI * 100.0 * i as f64 / 48_000.0))
//!     .collect();
//! let baseband = fpll.process(&pilot);
//! assert_eq!(baseband.len(), pilot.len());
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::nco::Nco;
use crate::phase_detector::PhaseDetector;
use crate::single_pole_iir::SinglePoleIir;
use crate::types::{DspError, DspResult, IQSample};

/// Default proportional (phase-tracking) loop gain.
pub const DEFAULT_LOOP_ALPHA: f64 = 2e-4;

/// Default loop-filter time constant in seconds.
pub const DEFAULT_FILTER_TIME_CONSTANT: f64 = 5e-6;

/// Carrier-offset guess used by the ATSC receiver chain this loop was
/// lifted from: the pilot sits 309 kHz above the lower band edge of a
/// channel tuned 3 MHz high.
pub const ATSC_FREQ_OFFSET_HZ: f64 = -3e6 + 0.309e6;

/// FPLL configuration.
///
/// All tuning constants are named, overridable fields fixed at
/// construction; the loop reads them and never writes them, so instances
/// are fully self-contained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FpllConfig {
    /// Sample rate in Hz. Must be positive.
    pub sample_rate: f64,
    /// Expected carrier offset in Hz (signed). The NCO starts at this
    /// frequency, converted to radians/sample.
    pub initial_freq_offset: f64,
    /// Initial NCO phase in radians.
    pub initial_phase: f64,
    /// Proportional gain applied to the phase correction.
    pub loop_alpha: f64,
    /// Integral gain applied to the frequency correction. The default is
    /// `loop_alpha^2 / 4`, the critically damped second-order relation.
    pub loop_beta: f64,
    /// Time constant of the single-pole loop filter, in seconds.
    pub filter_time_constant: f64,
}

impl FpllConfig {
    /// Create a configuration with the default loop gains and filter
    /// time constant.
    pub fn new(sample_rate: f64, initial_freq_offset: f64) -> Self {
        Self {
            sample_rate,
            initial_freq_offset,
            initial_phase: 0.0,
            loop_alpha: DEFAULT_LOOP_ALPHA,
            loop_beta: DEFAULT_LOOP_ALPHA * DEFAULT_LOOP_ALPHA / 4.0,
            filter_time_constant: DEFAULT_FILTER_TIME_CONSTANT,
        }
    }

    /// Configuration for the ATSC pilot-tracking application, using the
    /// conventional [`ATSC_FREQ_OFFSET_HZ`] carrier-offset guess.
    pub fn atsc(sample_rate: f64) -> Self {
        Self::new(sample_rate, ATSC_FREQ_OFFSET_HZ)
    }

    /// Initial NCO frequency in radians/sample.
    fn nco_freq(&self) -> f64 {
        self.initial_freq_offset / self.sample_rate * 2.0 * PI
    }

    /// Validate the configuration.
    pub fn validate(&self) -> DspResult<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(DspError::InvalidConfiguration(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if !self.filter_time_constant.is_finite() || self.filter_time_constant <= 0.0 {
            return Err(DspError::InvalidConfiguration(format!(
                "filter_time_constant must be positive, got {}",
                self.filter_time_constant
            )));
        }
        if !self.loop_alpha.is_finite() || self.loop_alpha <= 0.0 {
            return Err(DspError::InvalidConfiguration(format!(
                "loop_alpha must be positive, got {}",
                self.loop_alpha
            )));
        }
        // beta = 0 is allowed: that is a legitimate first-order
        // (phase-only) loop. A negative beta inverts the integral branch.
        if !self.loop_beta.is_finite() || self.loop_beta < 0.0 {
            return Err(DspError::InvalidConfiguration(format!(
                "loop_beta must be non-negative, got {}",
                self.loop_beta
            )));
        }
        if !self.initial_freq_offset.is_finite() || !self.initial_phase.is_finite() {
            return Err(DspError::InvalidConfiguration(
                "initial frequency offset and phase must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Frequency/phase locked loop carrier recovery block.
///
/// Owns all loop state; no globals, no interior mutability. `Clone` gives
/// an independent loop with identical state.
#[derive(Debug, Clone)]
pub struct Fpll {
    config: FpllConfig,
    nco: Nco,
    afc: SinglePoleIir,
    detector: PhaseDetector,
}

impl Fpll {
    /// Create a carrier recovery loop from a validated configuration.
    pub fn new(config: FpllConfig) -> DspResult<Self> {
        config.validate()?;
        let freq = config.nco_freq();
        let nco = Nco::new(freq, config.initial_phase);
        let afc =
            SinglePoleIir::from_time_constant(config.filter_time_constant, config.sample_rate);
        tracing::debug!(
            initial_freq_offset_hz = config.initial_freq_offset,
            nco_freq_rad = freq,
            filter_alpha = afc.alpha(),
            "fpll initialized"
        );
        Ok(Self {
            config,
            nco,
            afc,
            detector: PhaseDetector,
        })
    }

    /// Run one sample through the loop and return the derotated sample.
    ///
    /// The step order is load-bearing: the NCO advances before its
    /// sine/cosine is read, the derotated sample is emitted before the
    /// feedback runs, and the corrections land after detection so they
    /// take effect on the next sample.
    #[inline]
    fn process_sample(&mut self, input: IQSample) -> IQSample {
        self.nco.step();
        let (sin, cos) = self.nco.sincos();
        // Sine rides in the real slot of the rotation operator. This
        // pairs with the sign of `initial_freq_offset`; changing either
        // alone breaks the lock direction, so change both together.
        let rotated = input * Complex64::new(sin, cos);

        let filtered = self.afc.filter(rotated);
        let x = self.detector.detect(filtered);

        self.nco.adjust_phase(self.config.loop_alpha * x);
        self.nco.adjust_freq(self.config.loop_beta * x);

        rotated
    }

    /// Process a batch of samples, returning the derotated batch.
    ///
    /// Batch size is caller-chosen and has no effect on output values:
    /// all loop state persists across calls.
    pub fn process(&mut self, input: &[IQSample]) -> Vec<IQSample> {
        input.iter().map(|&s| self.process_sample(s)).collect()
    }

    /// Process a batch into a caller-provided output buffer of equal
    /// length. Panics if the lengths differ.
    pub fn process_into(&mut self, input: &[IQSample], output: &mut [IQSample]) {
        assert_eq!(
            input.len(),
            output.len(),
            "input and output buffers must be the same length"
        );
        for (out, &s) in output.iter_mut().zip(input) {
            *out = self.process_sample(s);
        }
    }

    /// Current NCO frequency estimate (radians/sample).
    pub fn frequency(&self) -> f64 {
        self.nco.frequency()
    }

    /// Current NCO frequency estimate in Hz.
    pub fn frequency_hz(&self) -> f64 {
        self.nco.frequency() / (2.0 * PI) * self.config.sample_rate
    }

    /// Current NCO phase (radians).
    pub fn phase(&self) -> f64 {
        self.nco.phase()
    }

    /// The configuration this loop was built with.
    pub fn config(&self) -> &FpllConfig {
        &self.config
    }

    /// Restore construction-time state: NCO back to the initial frequency
    /// and phase, loop-filter accumulator cleared.
    pub fn reset(&mut self) {
        self.nco.set_frequency(self.config.nco_freq());
        self.nco.set_phase(self.config.initial_phase);
        self.afc.reset();
    }
}
