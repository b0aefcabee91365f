//! The spacing controller (§4.E): classifies every contour segment as
//! clip-all, too-short, too-long, or ok, and from that classification
//! drives both the clip list and the dash-seed list. Classification and
//! dash planning are independent per segment, so both stages are
//! data-parallel over the segment list (§5) via `rayon`.

use rayon::prelude::*;

use crate::engine::HachureId;
use crate::geometry::{densify, intersection, length, locate_point, Point2D, Polyline};
use crate::params::{Parameters, TieBreak};
use crate::raster::RasterSampler;
use crate::segment::{cutpoint_split, even_split, CutPoint, Segment, SegmentStatus};

/// Splits each ring of a contour's line against every live hachure,
/// producing the `Segment`s the rest of §4.E classifies (§4.E
/// "Split-by-hachures").
pub fn split_by_hachures(ring: &Polyline, hachures: &[(HachureId, Polyline)]) -> Vec<Segment> {
    let mut cuts = Vec::new();
    for (id, hachure) in hachures {
        for point in intersection(ring, hachure) {
            cuts.push(CutPoint { hachure: *id, arc_length: locate_point(ring, point) });
        }
    }
    if cuts.is_empty() {
        vec![Segment::new(ring.clone(), Vec::new())]
    } else {
        cutpoint_split(ring, cuts)
    }
}

/// `Subdivision` (§4.E): any segment longer than `3 * max_spacing` is
/// further split so slope sampling stays local; short cut-derived segments
/// pass through untouched.
pub fn subdivide(segments: Vec<Segment>, max_spacing: f64) -> Vec<Segment> {
    let threshold = 3.0 * max_spacing;
    segments
        .into_iter()
        .flat_map(|segment| {
            if segment.arc_length > threshold {
                even_split(&segment.geometry, threshold)
                    .into_iter()
                    .map(|mut s| {
                        s.bounding_hachures = segment.bounding_hachures.clone();
                        s
                    })
                    .collect::<Vec<_>>()
            } else {
                vec![segment]
            }
        })
        .collect()
}

/// Mean slope sample along `densify(segment, avg_pixel)` (§4.E
/// "Classification"). Empty or NaN collapses to 0, per spec. Exposed at
/// crate visibility so the orchestrator's first-contour case (§4.G), which
/// runs the dash planner without classification, can still populate
/// `Segment::mean_slope`.
pub(crate) fn mean_slope(geometry: &Polyline, sampler: &RasterSampler, avg_pixel: f64) -> f64 {
    let dense = densify(geometry, avg_pixel.max(1e-9));
    if dense.vertices.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in &dense.vertices {
        let s = sampler.sample_slope(v.x, v.y);
        if s.is_finite() {
            sum += s;
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        let mean = sum / count as f64;
        if mean.is_nan() {
            0.0
        } else {
            mean
        }
    }
}

/// Classifies every segment in parallel (§4.E, §5): clip-all when the
/// slope is below `min_slope`, too-short/too-long against the 0.9/2.2
/// thermostat around `ideal_spacing`, otherwise ok.
pub fn classify(
    segments: Vec<Segment>,
    sampler: &RasterSampler,
    params: &Parameters,
    avg_pixel: f64,
) -> Vec<Segment> {
    segments
        .into_par_iter()
        .map(|mut segment| {
            let slope = mean_slope(&segment.geometry, sampler, avg_pixel);
            segment.mean_slope = slope;
            segment.status = Some(match params.ideal_spacing(slope) {
                None => SegmentStatus::ClipAll,
                Some(ideal) => {
                    if segment.arc_length < params.too_short_threshold * ideal {
                        SegmentStatus::TooShort
                    } else if segment.arc_length > params.too_long_threshold * ideal {
                        SegmentStatus::TooLong
                    } else {
                        SegmentStatus::Ok
                    }
                }
            });
            segment
        })
        .collect()
}

/// `Produce clip list` (§4.E): every hachure bounding a clip-all segment,
/// plus one of the two hachures bounding each too-short segment, chosen by
/// `tie_break`. `hachure_length` supplies the length needed by
/// `TieBreak::Shorter`.
pub fn produce_clip_list(
    segments: &[Segment],
    hachure_length: impl Fn(HachureId) -> f64,
    tie_break: TieBreak,
) -> Vec<HachureId> {
    let mut clip = Vec::new();
    for segment in segments {
        match segment.status {
            Some(SegmentStatus::ClipAll) => clip.extend(segment.bounding_hachures.iter().copied()),
            Some(SegmentStatus::TooShort) => {
                if let [a, b] = segment.bounding_hachures[..] {
                    let chosen = match tie_break {
                        TieBreak::Shorter => {
                            if hachure_length(a) <= hachure_length(b) {
                                a
                            } else {
                                b
                            }
                        }
                        TieBreak::Random(seed) => {
                            pick_with_seed(seed ^ segment.arc_length.to_bits(), a, b)
                        }
                    };
                    clip.push(chosen);
                }
            }
            _ => {}
        }
    }
    clip.sort_by_key(|id| id.0);
    clip.dedup();
    clip
}

/// `TieBreak::Random`'s coin flip (§9), reproducing the source's
/// randomized pick via an explicitly-seeded RNG rather than hidden global
/// state. Mixing the segment's own arclength into the seed keeps the
/// choice independent across segments of the same contour step while
/// remaining fully deterministic for a given `(seed, segment)` pair.
fn pick_with_seed(seed: u64, a: HachureId, b: HachureId) -> HachureId {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    let mut rng = SmallRng::seed_from_u64(seed);
    if rng.gen_bool(0.5) {
        a
    } else {
        b
    }
}

/// One seed point produced by the dash planner, ready to hand to the
/// tracer.
#[derive(Clone, Copy, Debug)]
pub struct DashSeed {
    pub point: Point2D,
}

/// `Produce seed list` → the dash planner (§4.E): for each too-long
/// segment, subdivide its length into `units` evenly-spaced dash/gap
/// pairs and emit the midpoint of each dash as a seed.
pub fn produce_seed_list(segments: &[Segment], params: &Parameters) -> Vec<DashSeed> {
    segments
        .par_iter()
        .filter(|s| s.status == Some(SegmentStatus::TooLong))
        .flat_map(|segment| dash_plan(segment, params).into_par_iter())
        .collect()
}

/// Also used for the first-contour case (§4.G), where every `even_split`
/// segment is a dash-planning candidate regardless of classification; in
/// that case the caller must have run `classify` (or set `mean_slope`
/// directly) first so `ideal_spacing` has a slope to work from.
pub fn dash_plan(segment: &Segment, params: &Parameters) -> Vec<DashSeed> {
    let slope_sample_len = segment.arc_length.max(1e-9);
    let spacing = match params.ideal_spacing(segment.mean_slope) {
        Some(s) => s,
        None => return Vec::new(),
    };
    let units = (slope_sample_len / (2.0 * spacing)).round();
    if units < 1.0 {
        return Vec::new();
    }
    let units = units as usize;
    let dash_gap = slope_sample_len / units as f64;
    let dash = dash_gap / 2.0;
    let gap = dash / 2.0;

    let mut seeds = Vec::new();
    let mut start = gap;
    while start + dash <= slope_sample_len + 1e-9 {
        let mid = start + dash / 2.0;
        seeds.push(DashSeed { point: crate::geometry::interpolate(&segment.geometry, mid) });
        start += dash_gap;
    }
    seeds
}
