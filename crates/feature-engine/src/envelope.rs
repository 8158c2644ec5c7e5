//! Envelope Demodulation
//!
//! The envelope is the magnitude of the analytic signal, built in the frequency
//! domain by zeroing negative frequencies and doubling positive ones.

use rustfft::{num_complex::Complex, Fft};

/// Envelope of a real signal given its full two-sided spectrum
pub fn analytic_envelope(spectrum: &[Complex<f64>], inverse: &dyn Fft<f64>) -> Vec<f64> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer = spectrum.to_vec();
    for (k, c) in buffer.iter_mut().enumerate() {
        *c *= hilbert_weight(k, n);
    }
    inverse.process(&mut buffer);

    // rustfft leaves the inverse unnormalised
    let scale = 1.0 / n as f64;
    buffer.iter().map(|c| c.norm() * scale).collect()
}

/// Spectral weight turning a real spectrum into an analytic one
fn hilbert_weight(k: usize, n: usize) -> f64 {
    if k == 0 || (n % 2 == 0 && k == n / 2) {
        1.0
    } else if k < (n + 1) / 2 {
        2.0
    } else {
        0.0
    }
}

/// Number of magnitudes strictly above `threshold`
pub fn count_over_threshold(magnitude: &[f64], threshold: f64) -> usize {
    magnitude.iter().filter(|&&m| m > threshold).count()
}
