use serde::Serialize;
use std::fmt;

use super::geometry::{Point, Rect};

/// Playback marker on the midline of `bounds`, proportional to progress through the track.
pub fn play_position(frame: usize, frame_count: usize, bounds: Rect) -> Point {
    let progress = if frame_count == 0 {
        0.0
    } else {
        (frame.min(frame_count) as f64 / frame_count as f64) as f32
    };
    Point::new(bounds.x1 + bounds.width() * progress, bounds.center_y())
}

/// Text shown beside the graphs: position, length and rate of the loaded track.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaybackInfo {
    pub frame: usize,
    pub frame_count: usize,
    pub sample_rate: u32,
    pub playing: bool,
}

impl PlaybackInfo {
    pub fn play_time(&self) -> f64 {
        self.frame as f64 / self.sample_rate.max(1) as f64
    }

    pub fn duration(&self) -> f64 {
        self.frame_count as f64 / self.sample_rate.max(1) as f64
    }
}

impl fmt::Display for PlaybackInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", if self.playing { "playing" } else { "paused" })?;
        writeln!(
            f,
            "play_time: {}/{}",
            format_time(self.play_time()),
            format_time(self.duration())
        )?;
        writeln!(f, "sample_rate: {} fps", self.sample_rate)?;
        write!(f, "frame: {}/{}", self.frame, self.frame_count)
    }
}

fn format_time(secs: f64) -> String {
    let total_secs = secs as u64;
    let centis = ((secs - total_secs as f64) * 100.0) as u64;
    if total_secs >= 3600 {
        format!(
            "{:02}:{:02}:{:02}.{:02}",
            total_secs / 3600,
            (total_secs % 3600) / 60,
            total_secs % 60,
            centis
        )
    } else {
        format!("{:02}:{:02}.{:02}", total_secs / 60, total_secs % 60, centis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_tracks_progress() {
        let bounds = Rect::new(0.0, 0.0, 200.0, 40.0);
        assert_eq!(play_position(0, 100, bounds), Point::new(0.0, 20.0));
        assert_eq!(play_position(50, 100, bounds), Point::new(100.0, 20.0));
        assert_eq!(play_position(500, 100, bounds).x, 200.0);
        assert_eq!(play_position(3, 0, bounds).x, 0.0);
    }

    #[test]
    fn info_board_lines() {
        let info = PlaybackInfo {
            frame: 66150,
            frame_count: 44100 * 3725,
            sample_rate: 44100,
            playing: false,
        };
        let text = info.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "paused");
        assert_eq!(lines[1], "play_time: 00:01.50/01:02:05.00");
        assert_eq!(lines[2], "sample_rate: 44100 fps");
    }
}
