use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle, `(x1, y1)` top-left and `(x2, y2)` bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn center_y(&self) -> f32 {
        self.y1 + self.height() * 0.5
    }

    /// Shrink by `margin` on every side, collapsing to a zero-size rect rather than inverting.
    pub fn inset(&self, margin: f32) -> Self {
        let cx = (self.x1 + self.x2) * 0.5;
        let cy = (self.y1 + self.y2) * 0.5;
        Self {
            x1: (self.x1 + margin).min(cx),
            y1: (self.y1 + margin).min(cy),
            x2: (self.x2 - margin).max(cx),
            y2: (self.y2 - margin).max(cy),
        }
    }

    /// Cut into `rows` equal horizontal bands, top to bottom.
    pub fn split_rows(&self, rows: usize) -> Vec<Rect> {
        if rows == 0 {
            return Vec::new();
        }
        let band = self.height() / rows as f32;
        (0..rows)
            .map(|i| {
                let top = self.y1 + band * i as f32;
                Self::new(self.x1, top, self.x2, top + band)
            })
            .collect()
    }
}
