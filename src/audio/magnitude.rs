//! Peak-magnitude normalization shared by every graph.

use super::buffer::SampleBuffer;
use super::overview::Overview;
use super::spectral::SpectralFrames;

/// Largest absolute value in `values`, `0.0` for an empty sequence.
pub fn peak_magnitude<'a, I>(values: I) -> f32
where
    I: IntoIterator<Item = &'a f32>,
{
    values.into_iter().map(|v| v.abs()).fold(0.0f32, f32::max)
}

/// Map a signed value onto a `[0, 1]` display ratio where `0.5` is the midline
/// and `peak` lands on the top edge. A zero peak maps everything to the midline.
pub fn normalize(value: f32, peak: f32) -> f32 {
    if peak <= 0.0 {
        return 0.5;
    }
    (0.5 * (1.0 - value / peak)).clamp(0.0, 1.0)
}

/// Fraction of `peak` reached by a non-negative magnitude, `0.0` when the peak is zero.
pub fn spectral_ratio(magnitude: f32, peak: f32) -> f32 {
    if peak <= 0.0 {
        return 0.0;
    }
    (magnitude / peak).clamp(0.0, 1.0)
}

pub trait PeakMagnitude {
    fn peak_magnitude(&self) -> f32;
}

impl PeakMagnitude for [f32] {
    fn peak_magnitude(&self) -> f32 {
        peak_magnitude(self)
    }
}

impl PeakMagnitude for SampleBuffer {
    fn peak_magnitude(&self) -> f32 {
        peak_magnitude(self.samples())
    }
}

impl PeakMagnitude for Overview {
    fn peak_magnitude(&self) -> f32 {
        peak_magnitude(self.as_slice())
    }
}

impl PeakMagnitude for SpectralFrames {
    fn peak_magnitude(&self) -> f32 {
        self.peak()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_is_largest_absolute_value() {
        let values = [0.1, -0.9, 0.5, 0.0];
        let peak = peak_magnitude(&values);
        assert_eq!(peak, 0.9);
        assert!(values.iter().all(|v| v.abs() <= peak));
        assert_eq!(values[..].peak_magnitude(), 0.9);
    }

    #[test]
    fn peak_of_nothing_is_zero() {
        assert_eq!(peak_magnitude(&[]), 0.0);
        assert_eq!(peak_magnitude(&[0.0, -0.0]), 0.0);
    }

    #[test]
    fn buffer_peak_spans_channels() {
        let buffer = SampleBuffer::new(vec![vec![0.2, 0.3], vec![-0.7, 0.1]], 2).unwrap();
        assert_eq!(buffer.peak_magnitude(), 0.7);
    }

    #[test]
    fn zero_maps_to_midline() {
        for peak in [0.01, 0.5, 1.0, 3.0] {
            assert_eq!(normalize(0.0, peak), 0.5);
        }
    }

    #[test]
    fn zero_peak_maps_to_midline() {
        assert_eq!(normalize(0.7, 0.0), 0.5);
        assert_eq!(normalize(-1.0, 0.0), 0.5);
        assert_eq!(spectral_ratio(4.0, 0.0), 0.0);
    }

    #[test]
    fn normalize_decreases_with_value() {
        let peak = 0.8;
        let mut prev = normalize(-peak, peak);
        assert_eq!(prev, 1.0);
        for step in 1..=16 {
            let v = -peak + step as f32 * 0.1;
            let ratio = normalize(v, peak);
            assert!(ratio < prev, "{} !< {} at {}", ratio, prev, v);
            prev = ratio;
        }
        assert!(normalize(peak, peak).abs() < 1e-6);
    }
}
