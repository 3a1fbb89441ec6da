use serde::Serialize;

use super::geometry::Rect;

/// Screen regions for each graph, derived from the window rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Layout {
    pub window: Rect,
    pub instant: Rect,
    pub general: Rect,
    pub spectral: Option<Rect>,
}

impl Layout {
    /// Stack the graphs top to bottom inside `window` less `margin`:
    /// instant slice, general overview, then the spectral view when enabled.
    pub fn split(window: Rect, margin: f32, with_spectral: bool) -> Self {
        let rows = if with_spectral { 3 } else { 2 };
        let gap = margin * 0.25;
        let bands: Vec<Rect> = window
            .inset(margin)
            .split_rows(rows)
            .iter()
            .map(|band| Rect::new(band.x1, band.y1 + gap, band.x2, band.y2 - gap))
            .map(|band| if band.height() < 0.0 { band.inset(0.0) } else { band })
            .collect();

        Self {
            window,
            instant: bands[0],
            general: bands[1],
            spectral: bands.get(2).copied(),
        }
    }
}
