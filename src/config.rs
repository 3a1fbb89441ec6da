use serde::Deserialize;
use std::path::Path;

use crate::audio::spectral::{SpectralOptions, WindowKind};
use crate::error::{invalid, Result};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Options fixed for the lifetime of a loaded buffer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_overview_rate")]
    pub overview_rate: u32,
    #[serde(default = "default_instant_display_rate")]
    pub instant_display_rate: u32,
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    /// Frames kept in the scrolling spectral view; zero turns the view off.
    #[serde(default = "default_spectral_window_count")]
    pub spectral_window_count: usize,
    /// Channel drawn by the instant and spectral graphs.
    #[serde(default)]
    pub channel: usize,
    #[serde(default)]
    pub window: WindowKind,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_margin")]
    pub margin: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            overview_rate: default_overview_rate(),
            instant_display_rate: default_instant_display_rate(),
            fft_size: default_fft_size(),
            spectral_window_count: default_spectral_window_count(),
            channel: 0,
            window: WindowKind::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
        }
    }
}

impl AnalysisConfig {
    pub fn spectral_enabled(&self) -> bool {
        self.spectral_window_count > 0
    }

    pub fn spectral_options(&self) -> SpectralOptions {
        SpectralOptions {
            fft_size: self.fft_size,
            channel: self.channel,
            window: self.window,
        }
    }

    /// Checks that don't depend on the buffer. Rates are checked against the
    /// sample rate when a buffer is loaded.
    pub fn validate(&self) -> Result<()> {
        if self.overview_rate == 0 {
            return Err(invalid("overview_rate must be non-zero"));
        }
        if self.instant_display_rate == 0 {
            return Err(invalid("instant_display_rate must be non-zero"));
        }
        if self.spectral_enabled() && !self.fft_size.is_power_of_two() {
            return Err(invalid(format!("fft_size {} is not a power of two", self.fft_size)));
        }
        Ok(())
    }
}

fn default_overview_rate() -> u32 { 100 }
fn default_instant_display_rate() -> u32 { 20 }
fn default_fft_size() -> usize { 1024 }
fn default_spectral_window_count() -> usize { 10 }
fn default_margin() -> f32 { 50.0 }

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Ignoring malformed config {}: {}", path.display(), err);
            None
        }
    }
}
