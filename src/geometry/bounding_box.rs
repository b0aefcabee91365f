//! Axis-aligned bounding box, adapted from WhiteboxTools'
//! `structures::BoundingBox`.

use super::Point2D;

#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> BoundingBox {
        let (x1, x2) = if min_x < max_x { (min_x, max_x) } else { (max_x, min_x) };
        let (y1, y2) = if min_y < max_y { (min_y, max_y) } else { (max_y, min_y) };
        BoundingBox { min_x: x1, min_y: y1, max_x: x2, max_y: y2 }
    }

    pub fn from_two_points(p1: Point2D, p2: Point2D) -> BoundingBox {
        BoundingBox::new(p1.x, p2.x, p1.y, p2.y)
    }

    pub fn overlaps(&self, other: BoundingBox) -> bool {
        !(self.max_y < other.min_y
            || self.max_x < other.min_x
            || self.min_y > other.max_y
            || self.min_x > other.max_x)
    }
}
