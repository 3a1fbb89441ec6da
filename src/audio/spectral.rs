use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};
use serde::Deserialize;

use super::buffer::SampleBuffer;
use crate::error::{invalid, Result, VisualError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    /// Plain DFT of the raw window.
    #[default]
    Rectangular,
    Hann,
}

#[derive(Clone, Copy, Debug)]
pub struct SpectralOptions {
    pub fft_size: usize,
    pub channel: usize,
    pub window: WindowKind,
}

impl Default for SpectralOptions {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            channel: 0,
            window: WindowKind::Rectangular,
        }
    }
}

/// Magnitude spectra of consecutive `fft_size` windows, stored back to back.
///
/// Frame `i` covers time-domain frames `[i * fft_size, (i + 1) * fft_size)`.
#[derive(Clone, Debug)]
pub struct SpectralFrames {
    fft_size: usize,
    bins: Vec<f32>,
    peak: f32,
}

impl SpectralFrames {
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn len(&self) -> usize {
        self.bins.len() / self.fft_size
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Largest bin magnitude over every frame.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.fft_size)?;
        self.bins.get(start..start.checked_add(self.fft_size)?)
    }

    /// Spectral frame index containing time-domain frame `frame`.
    pub fn index_for(&self, frame: usize) -> Result<usize> {
        let index = frame / self.fft_size;
        if index >= self.len() {
            return Err(VisualError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.bins.chunks_exact(self.fft_size)
    }
}

/// Transform one channel of `buffer` into non-overlapping magnitude spectra.
///
/// The last window is zero-padded, so there are `ceil(frame_count / fft_size)`
/// frames of exactly `fft_size` bins each.
pub fn build_spectral_frames(buffer: &SampleBuffer, options: &SpectralOptions) -> Result<SpectralFrames> {
    let fft_size = options.fft_size;
    if !fft_size.is_power_of_two() {
        return Err(invalid(format!("fft size {} is not a power of two", fft_size)));
    }
    let samples = buffer.channel(options.channel).ok_or_else(|| {
        invalid(format!(
            "channel {} requested, buffer has {}",
            options.channel,
            buffer.channel_count()
        ))
    })?;

    let window = window_coefficients(options.window, fft_size);
    let fft = FftPlanner::<f32>::new().plan_fft_forward(fft_size);

    let frame_count = samples.len().div_ceil(fft_size);
    let mut bins = vec![0.0f32; frame_count * fft_size];

    let peak = bins
        .par_chunks_mut(fft_size)
        .zip(samples.par_chunks(fft_size))
        .map(|(out, chunk)| {
            let mut spectrum: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); fft_size];
            for (i, &s) in chunk.iter().enumerate() {
                spectrum[i] = Complex::new(s * window[i], 0.0);
            }
            fft.process(&mut spectrum);

            let mut frame_peak = 0.0f32;
            for (bin, c) in out.iter_mut().zip(spectrum.iter()) {
                *bin = c.norm();
                frame_peak = frame_peak.max(*bin);
            }
            frame_peak
        })
        .reduce(|| 0.0f32, f32::max);

    log::info!(
        "Spectral: {} frames of {} bins (channel {}, {:?} window), peak={:.4}",
        frame_count,
        fft_size,
        options.channel,
        options.window,
        peak
    );

    Ok(SpectralFrames { fft_size, bins, peak })
}

fn window_coefficients(kind: WindowKind, size: usize) -> Vec<f32> {
    match kind {
        WindowKind::Rectangular => vec![1.0; size],
        WindowKind::Hann if size < 2 => vec![1.0; size],
        WindowKind::Hann => (0..size)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos()))
            .collect(),
    }
}
