//! Segment-segment intersection, adapted from WhiteboxTools'
//! `structures::LineSegment::get_intersection`. Used by the geometry
//! kernel's `intersection` and `difference` operations (§4.B).

use super::{BoundingBox, Point2D};

const EPSILON: f64 = f64::EPSILON;

#[derive(Default, Copy, Clone, Debug)]
pub struct LineSegment {
    pub p1: Point2D,
    pub p2: Point2D,
}

impl LineSegment {
    pub fn new(p1: Point2D, p2: Point2D) -> LineSegment {
        LineSegment { p1, p2 }
    }

    pub fn get_bounding_box(&self) -> BoundingBox {
        BoundingBox::from_two_points(self.p1, self.p2)
    }

    fn is_point_on_line(&self, p: Point2D) -> bool {
        let r = (self.p2 - self.p1).cross(p - self.p1);
        r.abs() < EPSILON
    }

    /// Returns the single point at which this segment crosses `other`, or
    /// `None` if they don't cross at a single point (disjoint, parallel, or
    /// overlapping-collinear segments are all reported as `None` here,
    /// since the engine only ever needs a proper transversal crossing).
    pub fn get_intersection_point(&self, other: &Self) -> Option<Point2D> {
        if self.p1 == self.p2 || other.p1 == other.p2 {
            return None;
        }
        if !self.get_bounding_box().overlaps(other.get_bounding_box()) {
            return None;
        }
        let denom = (self.p1.x - self.p2.x) * (other.p1.y - other.p2.y)
            - (self.p1.y - self.p2.y) * (other.p1.x - other.p2.x);
        if denom == 0.0 {
            // parallel, or collinear-overlapping; the engine treats both as
            // "no transversal crossing" (a hachure running along a contour
            // is a degenerate case the source does not handle specially).
            return None;
        }
        let t = ((self.p1.x - other.p1.x) * (other.p1.y - other.p2.y)
            - (self.p1.y - other.p1.y) * (other.p1.x - other.p2.x))
            / denom;
        let u = -((self.p1.x - self.p2.x) * (self.p1.y - other.p1.y)
            - (self.p1.y - self.p2.y) * (self.p1.x - other.p1.x))
            / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(Point2D::new(
                self.p1.x + t * (self.p2.x - self.p1.x),
                self.p1.y + t * (self.p2.y - self.p1.y),
            ))
        } else {
            None
        }
    }

    pub fn is_point_on_segment(&self, p: Point2D) -> bool {
        if !self.is_point_on_line(p) {
            return false;
        }
        p.x >= self.p1.x.min(self.p2.x)
            && p.x <= self.p1.x.max(self.p2.x)
            && p.y >= self.p1.y.min(self.p2.y)
            && p.y <= self.p1.y.max(self.p2.y)
    }

    /// Squared distance from `p` to the closest point on the segment, and
    /// the arclength fraction `t` (clamped to `[0, 1]`) of that closest
    /// point. Used by `locate_point` to project onto a multi-vertex line.
    pub fn closest_point_fraction(&self, p: Point2D) -> (f64, f64) {
        let l2 = self.p1.distance_squared(&self.p2);
        if l2 == 0.0 {
            return (p.distance_squared(&self.p1), 0.0);
        }
        let mut t = ((p.x - self.p1.x) * (self.p2.x - self.p1.x)
            + (p.y - self.p1.y) * (self.p2.y - self.p1.y))
            / l2;
        t = t.clamp(0.0, 1.0);
        let closest = Point2D::new(
            self.p1.x + t * (self.p2.x - self.p1.x),
            self.p1.y + t * (self.p2.y - self.p1.y),
        );
        (p.distance_squared(&closest), t)
    }
}
