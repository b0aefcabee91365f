//! The geometry kernel (§4.B): the small set of planar-geometry primitives
//! the rest of the engine is built on. Point/segment/bounding-box math is
//! hand-rolled in this crate's WhiteboxTools idiom; polygon Boolean algebra
//! is delegated to `geo` (see `polygon` and `DESIGN.md`).

mod bounding_box;
mod line_segment;
mod point;
pub mod polygon;
pub mod polyline;

pub use bounding_box::BoundingBox;
pub use line_segment::LineSegment;
pub use point::Point2D;
pub use polygon::Region;
pub use polygon::difference as polyline_difference;
pub use polyline::{
    densify, intersection, interpolate, length, locate_point, substring, MultiPolyline, Polyline,
};
