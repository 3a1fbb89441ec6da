use rayon::prelude::*;

use super::buffer::SampleBuffer;
use crate::error::{invalid, Result};

/// One signed average amplitude per fixed-size range of frames.
#[derive(Clone, Debug, Default)]
pub struct Overview {
    range_size: usize,
    frame_count: usize,
    values: Vec<f32>,
}

impl Overview {
    pub fn range_size(&self) -> usize {
        self.range_size
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Number of frames averaged into entry `index`. The last range may be short.
    pub fn range_len(&self, index: usize) -> usize {
        if index >= self.values.len() {
            return 0;
        }
        let start = index * self.range_size;
        (self.frame_count - start).min(self.range_size)
    }
}

/// Reduce the buffer to `overview_rate` entries per second of audio.
///
/// Each entry is the directional mean of every sample of every channel in its
/// range, so the overview keeps the gross shape of the waveform. A trailing
/// partial range is averaged over its own length.
pub fn build_overview(buffer: &SampleBuffer, overview_rate: u32) -> Result<Overview> {
    let sample_rate = buffer.sample_rate();
    if overview_rate == 0 {
        return Err(invalid("overview rate must be non-zero"));
    }
    if overview_rate > sample_rate {
        return Err(invalid(format!(
            "overview rate {} exceeds sample rate {}",
            overview_rate, sample_rate
        )));
    }

    let range_size = (sample_rate / overview_rate) as usize;
    let frame_count = buffer.frame_count();
    let channel_count = buffer.channel_count();
    let range_count = frame_count.div_ceil(range_size);

    let channels: Vec<&[f32]> = (0..channel_count).filter_map(|c| buffer.channel(c)).collect();

    let values: Vec<f32> = (0..range_count)
        .into_par_iter()
        .map(|range| {
            let start = range * range_size;
            let end = (start + range_size).min(frame_count);
            let sum: f32 = channels
                .iter()
                .map(|data| data[start..end].iter().sum::<f32>())
                .sum();
            sum / ((end - start) * channel_count) as f32
        })
        .collect();

    log::info!(
        "Overview: {} frames -> {} entries ({} frames each)",
        frame_count,
        values.len(),
        range_size
    );

    Ok(Overview {
        range_size,
        frame_count,
        values,
    })
}
