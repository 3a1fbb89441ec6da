pub mod builder;
pub mod geometry;
pub mod layout;
pub mod position;

pub use geometry::{Point, Rect};
pub use layout::Layout;
