use crate::error::{invalid, Result};

/// Deinterleaved multichannel audio, every channel the same length.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if channels.is_empty() {
            return Err(invalid("sample buffer needs at least one channel"));
        }
        if sample_rate == 0 {
            return Err(invalid("sample rate must be non-zero"));
        }
        let frame_count = channels[0].len();
        if let Some(bad) = channels.iter().position(|c| c.len() != frame_count) {
            return Err(invalid(format!(
                "channel {} has {} frames, expected {}",
                bad,
                channels[bad].len(),
                frame_count
            )));
        }
        Ok(Self { channels, sample_rate })
    }

    /// Split interleaved PCM into one vector per channel.
    pub fn from_interleaved(samples: &[f32], channel_count: usize, sample_rate: u32) -> Result<Self> {
        if channel_count == 0 {
            return Err(invalid("channel count must be non-zero"));
        }
        if samples.len() % channel_count != 0 {
            return Err(invalid(format!(
                "{} interleaved samples do not divide into {} channels",
                samples.len(),
                channel_count
            )));
        }
        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in samples.chunks(channel_count) {
            for (c, &s) in frame.iter().enumerate() {
                channels[c].push(s);
            }
        }
        Self::new(channels, sample_rate)
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Every sample of every channel, channel by channel.
    pub fn samples(&self) -> impl Iterator<Item = &f32> + '_ {
        self.channels.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VisualError;

    #[test]
    fn rejects_ragged_channels() {
        let err = SampleBuffer::new(vec![vec![0.0; 4], vec![0.0; 3]], 44100).unwrap_err();
        assert!(matches!(err, VisualError::InvalidParameter(_)));
    }

    #[test]
    fn rejects_missing_channels_and_zero_rate() {
        assert!(SampleBuffer::new(Vec::new(), 44100).is_err());
        assert!(SampleBuffer::new(vec![vec![0.0]], 0).is_err());
    }

    #[test]
    fn deinterleaves() {
        let buffer = SampleBuffer::from_interleaved(&[0.1, -0.1, 0.2, -0.2, 0.3, -0.3], 2, 3).unwrap();
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frame_count(), 3);
        assert_eq!(buffer.channel(0).unwrap(), &[0.1, 0.2, 0.3]);
        assert_eq!(buffer.channel(1).unwrap(), &[-0.1, -0.2, -0.3]);
        assert!(buffer.channel(2).is_none());
        assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn interleaved_length_must_divide() {
        assert!(SampleBuffer::from_interleaved(&[0.0; 5], 2, 44100).is_err());
    }

    #[test]
    fn empty_buffer_is_valid() {
        let buffer = SampleBuffer::new(vec![Vec::new(), Vec::new()], 48000).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.samples().count(), 0);
    }
}
