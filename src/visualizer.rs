//! Load-time analysis and the per-tick query surface.
//!
//! [`Analysis`] is the complete set of derived data for one buffer. A
//! [`Visualizer`] holds the current set behind an `Arc` and replaces it whole
//! on reload, so queries running on other threads only ever see a finished set.

use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};

use crate::audio::buffer::SampleBuffer;
use crate::audio::magnitude::PeakMagnitude;
use crate::audio::overview::{build_overview, Overview};
use crate::audio::spectral::{build_spectral_frames, SpectralFrames};
use crate::config::{AnalysisConfig, LayoutConfig};
use crate::error::{invalid, Result, VisualError};
use crate::graph::builder::{self, frames_per_tick};
use crate::graph::position::{play_position, PlaybackInfo};
use crate::graph::{Layout, Point, Rect};

#[derive(Debug)]
pub struct Analysis {
    buffer: Arc<SampleBuffer>,
    config: AnalysisConfig,
    overview: Overview,
    raw_peak: f32,
    overview_peak: f32,
    spectral: Option<SpectralFrames>,
}

impl Analysis {
    /// Run every load-time pass over `buffer`. Blocking; may take a while on long tracks.
    pub fn build(buffer: Arc<SampleBuffer>, config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        frames_per_tick(buffer.sample_rate(), config.instant_display_rate)?;
        if buffer.channel(config.channel).is_none() {
            return Err(invalid(format!(
                "channel {} requested, buffer has {}",
                config.channel,
                buffer.channel_count()
            )));
        }

        log::info!("Pass 1: Overview (rate={})...", config.overview_rate);
        let overview = build_overview(&buffer, config.overview_rate)?;

        let spectral = if config.spectral_enabled() {
            log::info!("Pass 2: Spectral frames (fft_size={})...", config.fft_size);
            Some(build_spectral_frames(&buffer, &config.spectral_options())?)
        } else {
            log::info!("Pass 2: Spectral view disabled");
            None
        };

        log::info!("Pass 3: Peak magnitudes...");
        let raw_peak = buffer.peak_magnitude();
        let overview_peak = overview.peak_magnitude();
        log::info!(
            "Peaks: raw={:.4}, overview={:.4}, spectral={:.4}",
            raw_peak,
            overview_peak,
            spectral.as_ref().map_or(0.0, |s| s.peak())
        );

        Ok(Self {
            buffer,
            config: config.clone(),
            overview,
            raw_peak,
            overview_peak,
            spectral,
        })
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn overview(&self) -> &Overview {
        &self.overview
    }

    pub fn raw_peak(&self) -> f32 {
        self.raw_peak
    }

    pub fn overview_peak(&self) -> f32 {
        self.overview_peak
    }

    pub fn spectral(&self) -> Option<&SpectralFrames> {
        self.spectral.as_ref()
    }

    pub fn instant_graph(&self, frame: usize, bounds: Rect) -> Result<Vec<Point>> {
        let channel = self
            .buffer
            .channel(self.config.channel)
            .ok_or(VisualError::NotInitialized("analysis channel"))?;
        builder::instant_graph(
            channel,
            frame,
            bounds,
            self.buffer.sample_rate(),
            self.config.instant_display_rate,
            self.raw_peak,
        )
    }

    pub fn general_graph(&self, frame: usize, bounds: Rect) -> Vec<Point> {
        builder::general_graph(&self.overview, frame, bounds, self.overview_peak)
    }

    /// Empty once playback runs past the last spectral frame.
    pub fn spectral_graph(&self, frame: usize, bounds: Rect) -> Result<Vec<Point>> {
        let frames = self.spectral_frames()?;
        match builder::spectral_graph(frames, frame, bounds, frames.peak()) {
            Err(VisualError::IndexOutOfRange { index, len }) => {
                log::debug!("Spectral frame {} past end ({} frames), drawing nothing", index, len);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    pub fn spectral_history(&self, frame: usize, bounds: Rect) -> Result<Vec<Vec<Point>>> {
        let frames = self.spectral_frames()?;
        Ok(builder::spectral_history(
            frames,
            frame,
            bounds,
            frames.peak(),
            self.config.spectral_window_count,
        ))
    }

    pub fn play_position(&self, frame: usize, bounds: Rect) -> Point {
        play_position(frame, self.buffer.frame_count(), bounds)
    }

    pub fn info(&self, frame: usize, playing: bool) -> PlaybackInfo {
        PlaybackInfo {
            frame,
            frame_count: self.buffer.frame_count(),
            sample_rate: self.buffer.sample_rate(),
            playing,
        }
    }

    fn spectral_frames(&self) -> Result<&SpectralFrames> {
        self.spectral
            .as_ref()
            .ok_or(VisualError::NotInitialized("spectral frames"))
    }
}

/// Everything the renderer needs for one display tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphSet {
    pub frame: usize,
    pub layout: Layout,
    pub instant: Vec<Point>,
    pub general: Vec<Point>,
    pub position: Point,
    pub spectral: Vec<Point>,
    pub spectral_history: Vec<Vec<Point>>,
}

pub struct Visualizer {
    config: AnalysisConfig,
    margin: f32,
    analysis: RwLock<Option<Arc<Analysis>>>,
    layout: RwLock<Layout>,
}

impl Visualizer {
    pub fn new(config: AnalysisConfig, layout: &LayoutConfig, window: Rect) -> Result<Self> {
        config.validate()?;
        let split = Layout::split(window, layout.margin, config.spectral_enabled());
        Ok(Self {
            config,
            margin: layout.margin,
            analysis: RwLock::new(None),
            layout: RwLock::new(split),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze `buffer` and make it current. On failure the previous analysis stays live.
    pub fn load(&self, buffer: Arc<SampleBuffer>) -> Result<Arc<Analysis>> {
        let analysis = Arc::new(Analysis::build(buffer, &self.config)?);
        self.install(Arc::clone(&analysis));
        Ok(analysis)
    }

    /// Swap in an analysis built elsewhere, e.g. on a worker thread.
    pub fn install(&self, analysis: Arc<Analysis>) {
        *self.analysis.write().unwrap_or_else(PoisonError::into_inner) = Some(analysis);
    }

    /// Recompute graph regions for a new window. Derived audio data is untouched.
    pub fn resize(&self, window: Rect) {
        let split = Layout::split(window, self.margin, self.config.spectral_enabled());
        *self.layout.write().unwrap_or_else(PoisonError::into_inner) = split;
    }

    pub fn layout(&self) -> Layout {
        *self.layout.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn analysis(&self) -> Result<Arc<Analysis>> {
        self.analysis
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(VisualError::NotInitialized("audio analysis"))
    }

    pub fn instant_graph(&self, frame: usize) -> Result<Vec<Point>> {
        self.analysis()?.instant_graph(frame, self.layout().instant)
    }

    pub fn general_graph(&self, frame: usize) -> Result<Vec<Point>> {
        Ok(self.analysis()?.general_graph(frame, self.layout().general))
    }

    pub fn spectral_graph(&self, frame: usize) -> Result<Vec<Point>> {
        let bounds = self.spectral_bounds()?;
        self.analysis()?.spectral_graph(frame, bounds)
    }

    pub fn spectral_history(&self, frame: usize) -> Result<Vec<Vec<Point>>> {
        let bounds = self.spectral_bounds()?;
        self.analysis()?.spectral_history(frame, bounds)
    }

    pub fn play_position(&self, frame: usize) -> Result<Point> {
        Ok(self.analysis()?.play_position(frame, self.layout().general))
    }

    pub fn info(&self, frame: usize, playing: bool) -> Result<PlaybackInfo> {
        Ok(self.analysis()?.info(frame, playing))
    }

    /// All graphs for one tick, taken from a single analysis and layout snapshot.
    pub fn tick(&self, frame: usize) -> Result<GraphSet> {
        let analysis = self.analysis()?;
        let layout = self.layout();

        let (spectral, spectral_history) = match layout.spectral {
            Some(bounds) if analysis.spectral().is_some() => (
                analysis.spectral_graph(frame, bounds)?,
                analysis.spectral_history(frame, bounds)?,
            ),
            _ => (Vec::new(), Vec::new()),
        };

        Ok(GraphSet {
            frame,
            layout,
            instant: analysis.instant_graph(frame, layout.instant)?,
            general: analysis.general_graph(frame, layout.general),
            position: analysis.play_position(frame, layout.general),
            spectral,
            spectral_history,
        })
    }

    fn spectral_bounds(&self) -> Result<Rect> {
        self.layout()
            .spectral
            .ok_or(VisualError::NotInitialized("spectral view"))
    }
}
