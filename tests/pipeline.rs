use std::sync::Arc;

use wavescope::audio::magnitude::{normalize, peak_magnitude, PeakMagnitude};
use wavescope::audio::overview::build_overview;
use wavescope::audio::spectral::{build_spectral_frames, SpectralOptions};
use wavescope::config::{AnalysisConfig, LayoutConfig};
use wavescope::graph::builder::{general_graph, instant_graph, spectral_graph};
use wavescope::{Rect, SampleBuffer, VisualError, Visualizer};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn noise(frames: usize, seed: u32) -> Vec<f32> {
    let mut state = seed.max(1);
    (0..frames)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

#[test]
fn two_frame_instant_graph() {
    let buffer = SampleBuffer::new(vec![vec![0.1, 0.5], vec![0.0, 0.0]], 2).unwrap();
    let bounds = Rect::from_size(10.0, 10.0);
    let peak = buffer.peak_magnitude();
    let channel = buffer.channel(0).unwrap();

    let points = instant_graph(channel, 0, bounds, buffer.sample_rate(), 1, peak).unwrap();
    assert_eq!(points.len(), 2);
    assert!(close(points[0].x, 0.0));
    assert!(close(points[1].x, 5.0));
    assert!(close(points[0].y, 10.0 * normalize(0.1, peak)));
    assert!(close(points[1].y, 10.0 * normalize(0.5, peak)));
}

#[test]
fn fft_size_must_be_power_of_two() {
    let buffer = SampleBuffer::new(vec![vec![0.0; 32]], 8).unwrap();
    let options = SpectralOptions {
        fft_size: 10,
        ..Default::default()
    };
    assert!(matches!(
        build_spectral_frames(&buffer, &options),
        Err(VisualError::InvalidParameter(_))
    ));
}

#[test]
fn peak_bounds_every_sample() {
    let samples = noise(5000, 7);
    let buffer = SampleBuffer::new(vec![samples.clone(), noise(5000, 11)], 1000).unwrap();
    let peak = buffer.peak_magnitude();
    assert!(peak >= 0.0);
    assert!(buffer.samples().all(|s| s.abs() <= peak));
    assert!(buffer.samples().any(|s| s.abs() == peak));
    assert!(peak_magnitude(&samples) <= peak);
}

#[test]
fn overview_and_spectral_sizes() {
    for frames in [1usize, 511, 512, 513, 4099] {
        let buffer = SampleBuffer::new(vec![noise(frames, frames as u32)], 1000).unwrap();

        let overview = build_overview(&buffer, 100).unwrap();
        assert_eq!(overview.len(), frames.div_ceil(10));
        let covered: usize = (0..overview.len()).map(|i| overview.range_len(i)).sum();
        assert_eq!(covered, frames);

        let options = SpectralOptions {
            fft_size: 256,
            ..Default::default()
        };
        let spectral = build_spectral_frames(&buffer, &options).unwrap();
        assert_eq!(spectral.len(), frames.div_ceil(256));
        assert!(spectral.iter().all(|bins| bins.len() == 256));
    }
}

#[test]
fn instant_graph_length_is_fixed() {
    let buffer = SampleBuffer::new(vec![noise(1000, 3)], 1000).unwrap();
    let channel = buffer.channel(0).unwrap();
    let bounds = Rect::from_size(640.0, 480.0);
    for frame in [0, 500, 990, 1000, 5000] {
        let points = instant_graph(channel, frame, bounds, 1000, 20, 1.0).unwrap();
        assert_eq!(points.len(), 50);
    }
}

#[test]
fn silent_buffer_graphs_sit_on_midline() {
    let buffer = SampleBuffer::new(vec![vec![0.0; 4000]; 2], 1000).unwrap();
    let peak = buffer.peak_magnitude();
    assert_eq!(peak, 0.0);

    let bounds = Rect::new(0.0, 100.0, 400.0, 300.0);
    let overview = build_overview(&buffer, 100).unwrap();
    let general = general_graph(&overview, 3999, bounds, overview.peak_magnitude());
    assert_eq!(general.len(), overview.len());
    assert!(general.iter().all(|p| close(p.y, 200.0)));

    let instant = instant_graph(buffer.channel(0).unwrap(), 1000, bounds, 1000, 20, peak).unwrap();
    assert!(instant.iter().all(|p| close(p.y, 200.0)));
}

#[test]
fn repeated_queries_are_identical() {
    let buffer = SampleBuffer::new(vec![noise(8192, 5)], 4096).unwrap();
    let bounds = Rect::from_size(800.0, 200.0);
    let overview = build_overview(&buffer, 100).unwrap();
    let spectral = build_spectral_frames(&buffer, &SpectralOptions::default()).unwrap();
    let channel = buffer.channel(0).unwrap();

    for frame in [0, 3000, 8191] {
        assert_eq!(
            general_graph(&overview, frame, bounds, 1.0),
            general_graph(&overview, frame, bounds, 1.0)
        );
        assert_eq!(
            instant_graph(channel, frame, bounds, 4096, 20, 1.0).unwrap(),
            instant_graph(channel, frame, bounds, 4096, 20, 1.0).unwrap()
        );
        assert_eq!(
            spectral_graph(&spectral, frame, bounds, spectral.peak()).unwrap(),
            spectral_graph(&spectral, frame, bounds, spectral.peak()).unwrap()
        );
    }
}

#[test]
fn visualizer_end_to_end() {
    let visualizer = Visualizer::new(
        AnalysisConfig::default(),
        &LayoutConfig::default(),
        Rect::from_size(1280.0, 720.0),
    )
    .unwrap();
    assert!(matches!(visualizer.tick(0), Err(VisualError::NotInitialized(_))));

    let buffer = Arc::new(SampleBuffer::new(vec![noise(44100, 9), noise(44100, 10)], 44100).unwrap());
    visualizer.load(buffer).unwrap();

    let set = visualizer.tick(22050).unwrap();
    assert_eq!(set.instant.len(), 44100 / 20);
    assert_eq!(set.general.len(), 22050 / 441 + 1);
    assert_eq!(set.spectral.len(), 1024);
    assert_eq!(set.spectral_history.len(), 10);

    // past the end: instant pads, spectral degrades to nothing
    let tail = visualizer.tick(44 * 1024).unwrap();
    assert_eq!(tail.instant.len(), 44100 / 20);
    assert!(tail.spectral.is_empty());
    assert!(tail.spectral_history.is_empty());
    assert_eq!(tail.general.len(), 100);
}
