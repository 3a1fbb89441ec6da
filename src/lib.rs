//! Turns a decoded sample buffer into drawable geometry: a downsampled
//! overview of the whole track, a high-resolution slice around the playhead,
//! and magnitude spectra for a scrolling frequency view.
//!
//! Heavy work happens once in [`Analysis::build`]; the per-tick queries on
//! [`Visualizer`] only generate points from the cached results.

pub mod audio;
pub mod config;
pub mod error;
pub mod graph;
pub mod visualizer;

pub use audio::buffer::SampleBuffer;
pub use error::{Result, VisualError};
pub use graph::{Layout, Point, Rect};
pub use visualizer::{Analysis, GraphSet, Visualizer};
