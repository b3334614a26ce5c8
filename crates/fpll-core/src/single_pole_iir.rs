//! Single-Pole IIR Filter — Complex exponential moving average
//!
//! First-order low-pass smoother used as the loop filter in carrier
//! recovery: it isolates the slow-varying residual carrier error from the
//! fast-varying modulated content. Transfer function
//! `H(z) = α / (1 - (1-α)z⁻¹)`, state starts at zero.
//!
//! ## Example
//!
//! ```rust
//! use fpll_core::single_pole_iir::SinglePoleIir;
//! use num_complex::Complex64;
//!
//! let mut iir = SinglePoleIir::new(0.1);
//! let y = iir.filter(Complex64::new(1.0, 0.0));
//! // First output is alpha * x with a zero-initialized accumulator
//! assert!((y.re - 0.1).abs() < 1e-12);
//! ```

use num_complex::Complex64;

/// Complex-valued single-pole IIR filter.
///
/// `y[n] = α·x[n] + (1-α)·y[n-1]`, `y[-1] = 0`.
#[derive(Debug, Clone)]
pub struct SinglePoleIir {
    /// Smoothing coefficient (0 < α ≤ 1).
    alpha: f64,
    /// One minus alpha (cached).
    one_minus_alpha: f64,
    /// Filter state.
    state: Complex64,
}

impl SinglePoleIir {
    /// Create with smoothing factor α.
    ///
    /// α = 1.0: no smoothing (output = input).
    /// α → 0: maximum smoothing (very slow response).
    pub fn new(alpha: f64) -> Self {
        let alpha = alpha.clamp(1e-10, 1.0);
        Self {
            alpha,
            one_minus_alpha: 1.0 - alpha,
            state: Complex64::new(0.0, 0.0),
        }
    }

    /// Create from an analog time constant in seconds.
    ///
    /// `α = 1 - exp(-1 / (sample_rate · tau))`, which lies in (0, 1) for
    /// any positive sample rate and time constant, so the smoother is
    /// unconditionally stable.
    pub fn from_time_constant(tau_secs: f64, sample_rate: f64) -> Self {
        let alpha = 1.0 - (-1.0 / (sample_rate * tau_secs)).exp();
        Self::new(alpha)
    }

    /// Filter a single sample.
    #[inline]
    pub fn filter(&mut self, x: Complex64) -> Complex64 {
        self.state = x * self.alpha + self.state * self.one_minus_alpha;
        self.state
    }

    /// Filter a block of samples.
    pub fn process(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        input.iter().map(|&x| self.filter(x)).collect()
    }

    /// Get the smoothing coefficient.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the current accumulator value.
    pub fn state(&self) -> Complex64 {
        self.state
    }

    /// Reset the accumulator to zero.
    pub fn reset(&mut self) {
        self.state = Complex64::new(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Closed-form step response: y[n-1 steps] = x·(1 - (1-α)^n).
    fn step_response(x: Complex64, alpha: f64, n: u32) -> Complex64 {
        x * (1.0 - (1.0 - alpha).powi(n as i32))
    }

    #[test]
    fn test_step_response_closed_form() {
        let x = Complex64::new(2.0, -1.0);
        let alpha = 0.3;
        for &n in &[1u32, 10, 1000] {
            let mut iir = SinglePoleIir::new(alpha);
            let mut y = Complex64::new(0.0, 0.0);
            for _ in 0..n {
                y = iir.filter(x);
            }
            let expected = step_response(x, alpha, n);
            assert!(
                (y - expected).norm() < 1e-12,
                "step response after {n} samples: got {y}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_starts_from_zero_state() {
        let mut iir = SinglePoleIir::new(0.25);
        let y = iir.filter(Complex64::new(4.0, 8.0));
        // y[0] = alpha * x, not x
        assert!((y.re - 1.0).abs() < 1e-12);
        assert!((y.im - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_one_passthrough() {
        let mut iir = SinglePoleIir::new(1.0);
        let input: Vec<Complex64> = (0..5)
            .map(|i| Complex64::new(i as f64, -(i as f64)))
            .collect();
        let output = iir.process(&input);
        assert_eq!(output, input);
    }

    #[test]
    fn test_from_time_constant_range() {
        // Any positive sample rate gives 0 < alpha < 1
        for &fs in &[1.0, 48_000.0, 10e6, 1e9] {
            let iir = SinglePoleIir::from_time_constant(5e-6, fs);
            assert!(iir.alpha() > 0.0, "alpha must be positive at fs={fs}");
            assert!(iir.alpha() <= 1.0, "alpha must not exceed 1 at fs={fs}");
        }
        // Reference value: fs = 10 MHz, tau = 5 us -> 1 - exp(-1/50)
        let iir = SinglePoleIir::from_time_constant(5e-6, 10e6);
        let expected = 1.0 - (-1.0 / 50.0_f64).exp();
        assert!((iir.alpha() - expected).abs() < 1e-15);
    }

    #[test]
    fn test_smoothing_attenuates_impulse() {
        let mut iir = SinglePoleIir::new(0.01);
        let mut input = vec![Complex64::new(0.0, 0.0); 7];
        input[3] = Complex64::new(100.0, 0.0);
        let output = iir.process(&input);
        assert!(output[3].norm() < 10.0, "impulse should be heavily smoothed");
    }

    #[test]
    fn test_reset() {
        let mut iir = SinglePoleIir::new(0.5);
        iir.filter(Complex64::new(1.0, 2.0));
        iir.reset();
        assert_eq!(iir.state(), Complex64::new(0.0, 0.0));
    }
}
