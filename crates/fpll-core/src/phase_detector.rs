//! Phase Detector — Saturating arctangent phase error estimator
//!
//! Maps a complex error signal to a scalar phase error via `atan2(im, re)`,
//! saturated at ±π/2 so large transients (loop startup, burst noise) cannot
//! slam the feedback loop with oversized corrections. Stateless.
//!
//! ## Example
//!
//! ```rust
//! use fpll_core::phase_detector::PhaseDetector;
//! use num_complex::Complex64;
//!
//! let pd = PhaseDetector;
//! // Small angles pass through unchanged
//! let x = pd.detect(Complex64::from_polar(1.0, 0.3));
//! assert!((x - 0.3).abs() < 1e-12);
//! // Large angles saturate at the limit
//! let x = pd.detect(Complex64::new(-1.0, 0.0));
//! assert_eq!(x, PhaseDetector::LIMIT);
//! ```

use num_complex::Complex64;
use std::f64::consts::FRAC_PI_2;

/// Stateless arctangent phase detector with output saturation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseDetector;

impl PhaseDetector {
    /// Saturation bound on the detected phase error (radians).
    pub const LIMIT: f64 = FRAC_PI_2;

    /// Phase error of `z`, clamped to `[-LIMIT, LIMIT]`.
    #[inline]
    pub fn detect(&self, z: Complex64) -> f64 {
        z.im.atan2(z.re).clamp(-Self::LIMIT, Self::LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_small_angles_pass_through() {
        let pd = PhaseDetector;
        for &angle in &[-1.5, -0.7, -0.01, 0.0, 0.2, 1.0, 1.5] {
            let z = Complex64::from_polar(2.0, angle);
            let x = pd.detect(z);
            assert!(
                (x - angle).abs() < 1e-12,
                "angle {angle} should pass through, got {x}"
            );
        }
    }

    #[test]
    fn test_positive_saturation() {
        let pd = PhaseDetector;
        // arg(-1 + 0j) = pi, beyond the limit
        let x = pd.detect(Complex64::new(-1.0, 0.0));
        assert_eq!(x, PhaseDetector::LIMIT, "pi must clamp to exactly +pi/2");

        let x = pd.detect(Complex64::from_polar(1.0, 2.0));
        assert_eq!(x, PhaseDetector::LIMIT);
    }

    #[test]
    fn test_negative_saturation() {
        let pd = PhaseDetector;
        let x = pd.detect(Complex64::from_polar(1.0, -2.5));
        assert_eq!(x, -PhaseDetector::LIMIT);
    }

    #[test]
    fn test_limit_is_half_pi() {
        assert!((PhaseDetector::LIMIT - PI / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_magnitude_independent() {
        let pd = PhaseDetector;
        let a = pd.detect(Complex64::from_polar(0.001, 0.4));
        let b = pd.detect(Complex64::from_polar(1000.0, 0.4));
        assert!((a - b).abs() < 1e-12, "detector should ignore magnitude");
    }
}
