//! Point generation for the three graph regions.
//!
//! Everything here is a pure function of precomputed data, cheap enough to run
//! on every display tick. None of these functions touch the full raw buffer.

use super::geometry::{Point, Rect};
use crate::audio::magnitude::{normalize, spectral_ratio};
use crate::audio::overview::Overview;
use crate::audio::spectral::SpectralFrames;
use crate::error::{invalid, Result};

/// Fraction of the bounds the whole spectral history recedes by.
const HISTORY_DEPTH: f32 = 0.5;

/// Frames shown per tick when the display refreshes `rate` times per second.
pub fn frames_per_tick(sample_rate: u32, rate: u32) -> Result<usize> {
    if rate == 0 || rate > sample_rate {
        return Err(invalid(format!(
            "display rate {} must be in 1..={}",
            rate, sample_rate
        )));
    }
    Ok((sample_rate / rate) as usize)
}

/// Time-domain slice `[frame, frame + sample_rate / rate)` of one channel.
///
/// Always yields exactly `sample_rate / rate` points; positions past the end
/// of `channel` read as silence.
pub fn instant_graph(
    channel: &[f32],
    frame: usize,
    bounds: Rect,
    sample_rate: u32,
    rate: u32,
    peak: f32,
) -> Result<Vec<Point>> {
    let count = frames_per_tick(sample_rate, rate)?;
    let x_scale = bounds.width() / count as f32;
    let height = bounds.height();

    Ok((0..count)
        .map(|i| {
            let sample = frame
                .checked_add(i)
                .and_then(|idx| channel.get(idx))
                .copied()
                .unwrap_or(0.0);
            Point::new(
                bounds.x1 + i as f32 * x_scale,
                bounds.y1 + normalize(sample, peak) * height,
            )
        })
        .collect())
}

/// Overview entries revealed up to the one containing `frame`.
pub fn general_graph(overview: &Overview, frame: usize, bounds: Rect, peak: f32) -> Vec<Point> {
    if overview.is_empty() {
        return Vec::new();
    }
    let revealed = (frame / overview.range_size()).saturating_add(1).min(overview.len());
    let x_scale = bounds.width() / overview.len() as f32;
    let height = bounds.height();

    overview.as_slice()[..revealed]
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            Point::new(
                bounds.x1 + i as f32 * x_scale,
                bounds.y1 + normalize(value, peak) * height,
            )
        })
        .collect()
}

/// Bins of the spectral frame containing `frame`, rising from the bottom edge.
pub fn spectral_graph(frames: &SpectralFrames, frame: usize, bounds: Rect, peak: f32) -> Result<Vec<Point>> {
    let index = frames.index_for(frame)?;
    Ok(frame_points(frames, index, bounds, peak))
}

/// The current spectral frame plus up to `window_count - 1` earlier ones,
/// newest first, each drawn further back and to the right.
///
/// Returns nothing once `frame` is past the last spectral frame.
pub fn spectral_history(
    frames: &SpectralFrames,
    frame: usize,
    bounds: Rect,
    peak: f32,
    window_count: usize,
) -> Vec<Vec<Point>> {
    let Ok(current) = frames.index_for(frame) else {
        return Vec::new();
    };
    let layers = window_count.min(current + 1);
    let step = HISTORY_DEPTH / window_count.max(1) as f32;

    (0..layers)
        .map(|depth| {
            let offset = step * depth as f32;
            let layer = Rect::new(
                bounds.x1 + bounds.width() * offset,
                bounds.y1,
                bounds.x2,
                bounds.y2 - bounds.height() * offset,
            );
            frame_points(frames, current - depth, layer, peak)
        })
        .collect()
}

fn frame_points(frames: &SpectralFrames, index: usize, bounds: Rect, peak: f32) -> Vec<Point> {
    let Some(bins) = frames.frame(index) else {
        return Vec::new();
    };
    let x_scale = bounds.width() / bins.len() as f32;
    let height = bounds.height();

    bins.iter()
        .enumerate()
        .map(|(i, &magnitude)| {
            Point::new(
                bounds.x1 + i as f32 * x_scale,
                bounds.y2 - spectral_ratio(magnitude, peak) * height,
            )
        })
        .collect()
}
