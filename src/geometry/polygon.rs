//! The polygon half of the geometry kernel (§4.B): the bounding rectangle
//! constructor, and `difference(polyline, region)`. Polygon-vs-polygon
//! differencing (used by the contour model, §4.C, to carve nested
//! "higher-than-E" regions out of the raster extent) is true planar
//! Boolean algebra and is delegated to `geo`'s `BooleanOps`, which none of
//! this crate's WhiteboxTools ancestor implements on its own vector types
//! (see `DESIGN.md`).

use geo::BooleanOps;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};

use super::{MultiPolyline, Point2D, Polyline};
use crate::raster::Extent;

/// The "higher-than-E" clipping mask stored on a `Contour` (§3, §4.C).
/// Wraps `geo::MultiPolygon` so that its own Boolean-op machinery can be
/// used for region construction and point-in-region tests.
#[derive(Clone, Debug, Default)]
pub struct Region(pub MultiPolygon<f64>);

impl Region {
    pub fn from_rect(extent: &Extent) -> Region {
        Region(MultiPolygon::new(vec![from_rect(extent)]))
    }

    /// `W ∖ P` (§4.C step 3).
    pub fn difference_polygon(&self, other: &Polygon<f64>) -> Region {
        Region(self.0.difference(&MultiPolygon::new(vec![other.clone()])))
    }

    pub fn contains_point(&self, p: Point2D) -> bool {
        use geo::Contains;
        self.0.contains(&geo_types::Point::new(p.x, p.y))
    }

    /// True self-containment: every polygon of `other` lies within `self`.
    /// Used by the monotone-region property test (§8).
    pub fn contains_region(&self, other: &Region) -> bool {
        use geo::Relate;
        self.0.relate(&other.0).is_contains() || self.0.relate(&other.0).is_equal_topo()
    }
}

/// `from_rect(extent)` (§4.B): the raster's bounding rectangle as a
/// closed-ring polygon.
pub fn from_rect(extent: &Extent) -> Polygon<f64> {
    let ring = LineString::new(vec![
        Coord { x: extent.west, y: extent.south },
        Coord { x: extent.east, y: extent.south },
        Coord { x: extent.east, y: extent.north },
        Coord { x: extent.west, y: extent.north },
        Coord { x: extent.west, y: extent.south },
    ]);
    Polygon::new(ring, vec![])
}

pub fn polyline_to_linestring(line: &Polyline) -> LineString<f64> {
    LineString::new(line.vertices.iter().map(|p| Coord { x: p.x, y: p.y }).collect())
}

/// All rings (exterior + interior) of every polygon making up a region, as
/// our own `Polyline` type, so the hand-rolled clip routine below can run
/// segment/segment intersection against them with the same primitives used
/// elsewhere in the geometry kernel.
fn region_rings(region: &Region) -> Vec<Polyline> {
    let mut rings = Vec::new();
    for poly in &region.0 {
        rings.push(linestring_to_polyline(poly.exterior()));
        for interior in poly.interiors() {
            rings.push(linestring_to_polyline(interior));
        }
    }
    rings
}

fn linestring_to_polyline(ls: &LineString<f64>) -> Polyline {
    Polyline::new(ls.coords().map(|c| Point2D::new(c.x, c.y)).collect())
}

/// `difference(L, Poly)` (§4.B) — the portion of polyline `L` outside
/// `region`. `L` is split at every point where it crosses a ring of
/// `region`'s boundary, then sub-arcs whose midpoint falls inside `region`
/// are discarded. The result may be zero, one, or several disjoint pieces.
pub fn difference(line: &Polyline, region: &Region) -> Vec<Polyline> {
    use super::polyline::{cut_points_against_rings, length, substring};

    if line.is_empty() {
        return Vec::new();
    }

    let rings = region_rings(region);
    let mut cuts = cut_points_against_rings(line, &rings);
    cuts.sort_by(|a, b| a.partial_cmp(b).unwrap());
    cuts.dedup_by(|a, b| (*a - *b).abs() < 1.0e-9);

    let total = length(line);
    let mut bounds = vec![0.0];
    bounds.extend(cuts.into_iter().filter(|s| *s > 1.0e-9 && *s < total - 1.0e-9));
    bounds.push(total);

    let mut kept = Vec::new();
    for w in bounds.windows(2) {
        let (s0, s1) = (w[0], w[1]);
        if s1 - s0 < 1.0e-9 {
            continue;
        }
        let piece = substring(line, s0, s1);
        let mid = super::polyline::interpolate(&piece, length(&piece) / 2.0);
        if !region.contains_point(mid) {
            kept.push(piece);
        }
    }
    kept
}

/// Runs `difference` over every part of a multi-part line, flattening the
/// kept pieces of every ring into one list.
pub fn difference_multi(line: &MultiPolyline, region: &Region) -> Vec<Polyline> {
    line.parts.iter().flat_map(|part| difference(part, region)).collect()
}
