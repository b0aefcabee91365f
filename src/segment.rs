//! Segment/cut primitives (§4.D): splitting a contour ring at fixed
//! arclength intervals, or at the points where hachures cross it, while
//! preserving which hachures bound each resulting piece.

use crate::engine::HachureId;
use crate::geometry::{length, substring, Polyline};

/// The classification a `Segment` is assigned during §4.E's classification
/// step. Numeric values match the spec's enumeration (§3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentStatus {
    ClipAll = 0,
    TooShort = 1,
    TooLong = 2,
    Ok = 3,
}

/// A sub-arc of a contour ring (§3). `bounding_hachures` carries the up to
/// two hachures adjacent to this segment; interior segments from
/// `cutpoint_split` inherit both, `even_split` pieces and the first/last
/// pieces of a cut ring inherit none.
#[derive(Clone, Debug)]
pub struct Segment {
    pub geometry: Polyline,
    pub arc_length: f64,
    pub bounding_hachures: Vec<HachureId>,
    pub status: Option<SegmentStatus>,
    /// Mean slope sampled along this segment (§4.E "Classification"),
    /// filled in by `spacing::classify`; `0.0` until then.
    pub mean_slope: f64,
}

impl Segment {
    pub fn new(geometry: Polyline, bounding_hachures: Vec<HachureId>) -> Segment {
        let arc_length = length(&geometry);
        Segment { geometry, arc_length, bounding_hachures, status: None, mean_slope: 0.0 }
    }
}

/// An intersection between a hachure and a contour ring (§3).
#[derive(Clone, Copy, Debug)]
pub struct CutPoint {
    pub hachure: HachureId,
    pub arc_length: f64,
}

/// `even_split(L, spacing)` (§4.D): split a ring at arclengths
/// `spacing, 2*spacing, ...`; the remainder becomes the final segment.
/// Produces segments of length <= spacing except possibly the last.
pub fn even_split(line: &Polyline, spacing: f64) -> Vec<Segment> {
    let total = length(line);
    if total <= 0.0 || spacing <= 0.0 {
        return vec![Segment::new(line.clone(), Vec::new())];
    }
    let mut segments = Vec::new();
    let mut s0 = 0.0;
    while s0 < total - 1e-9 {
        let s1 = (s0 + spacing).min(total);
        segments.push(Segment::new(substring(line, s0, s1), Vec::new()));
        s0 = s1;
    }
    segments
}

/// `cutpoint_split(ring, cuts)` (§4.D): sort cut points ascending by
/// arclength and emit the segments they partition the ring into. Interior
/// segments inherit the pair of hachures bracketing them; the first and
/// last segment inherit none, since they lie past only a single cut.
pub fn cutpoint_split(ring: &Polyline, mut cuts: Vec<CutPoint>) -> Vec<Segment> {
    let total = length(ring);
    if cuts.is_empty() {
        return vec![Segment::new(ring.clone(), Vec::new())];
    }
    cuts.sort_by(|a, b| a.arc_length.partial_cmp(&b.arc_length).unwrap());

    let mut bounds = vec![0.0];
    bounds.extend(cuts.iter().map(|c| c.arc_length));
    bounds.push(total);

    let mut segments = Vec::with_capacity(bounds.len() - 1);
    for (i, w) in bounds.windows(2).enumerate() {
        let (s0, s1) = (w[0], w[1]);
        if s1 - s0 < 1e-9 {
            continue;
        }
        let bounding = if i == 0 || i == bounds.len() - 2 {
            Vec::new()
        } else {
            vec![cuts[i - 1].hachure, cuts[i].hachure]
        };
        segments.push(Segment::new(substring(ring, s0, s1), bounding));
    }
    segments
}
