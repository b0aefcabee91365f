//! The streamline tracer (§4.F): walks the aspect field down-slope from a
//! seed point until one of the stop rules fires. Tracing independent seeds
//! within one contour step is data-parallel (§5) and is dispatched with
//! `rayon`; only the caller's append into the live hachure set is
//! serialized.

use rayon::prelude::*;

use crate::geometry::{Point2D, Polyline};
use crate::params::Parameters;
use crate::raster::RasterSampler;

/// Why a trace stopped, reported only for diagnostics (§7: tracer
/// exhaustion is a normal stop, not an error).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Bounds,
    SlackSlope,
    Oscillation,
    HardCap,
}

/// Traces a single hachure from `seed` (§4.F). Returns `None` if the seed's
/// aspect sample is 0 or the resulting polyline has fewer than 2 vertices.
pub fn trace(seed: Point2D, sampler: &RasterSampler, params: &Parameters) -> Option<Polyline> {
    let aspect0 = sampler.sample_aspect(seed.x, seed.y);
    if aspect0 == 0.0 {
        return None;
    }

    let mut vertices = vec![seed];
    let mut reason = StopReason::HardCap;

    for _ in 0..params.max_tracer_steps {
        let last = *vertices.last().unwrap();
        let aspect = sampler.sample_aspect(last.x, last.y);
        if aspect == 0.0 {
            vertices.pop();
            reason = StopReason::Bounds;
            break;
        }
        let slope = sampler.sample_slope(last.x, last.y);
        if slope < params.min_slope {
            vertices.pop();
            reason = StopReason::SlackSlope;
            break;
        }

        let rad = (aspect + 180.0).to_radians();
        let dx = rad.sin() * params.jump_distance;
        let dy = rad.cos() * params.jump_distance;
        vertices.push(Point2D::new(last.x + dx, last.y + dy));

        if vertices.len() >= 3 {
            let n = vertices.len();
            let sq_dist = vertices[n - 1].distance_squared(&vertices[n - 3]);
            let threshold = (1.5 * params.jump_distance).powi(2);
            if sq_dist < threshold {
                vertices.pop();
                vertices.pop();
                reason = StopReason::Oscillation;
                break;
            }
        }
    }

    let _ = reason;
    if vertices.len() >= 2 {
        Some(Polyline::new(vertices))
    } else {
        None
    }
}

/// Traces every seed in parallel (§5), discarding seeds that produce no
/// hachure.
pub fn trace_all(seeds: &[Point2D], sampler: &RasterSampler, params: &Parameters) -> Vec<Polyline> {
    seeds.par_iter().filter_map(|&seed| trace(seed, sampler, params)).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::raster::{Array2D, Extent};

    fn constant_field(aspect: f64, slope: f64, rows: isize, columns: isize) -> (Extent, RasterSampler) {
        let extent = Extent {
            west: 0.0,
            east: columns as f64,
            south: 0.0,
            north: rows as f64,
            resolution_x: 1.0,
            resolution_y: 1.0,
            rows,
            columns,
        };
        let slope_grid = Array2D::new(rows, columns, slope, -9999.0).unwrap();
        let aspect_grid = Array2D::new(rows, columns, aspect, -9999.0).unwrap();
        let sampler = RasterSampler::new(extent, slope_grid, aspect_grid).unwrap();
        (extent, sampler)
    }

    #[test]
    fn zero_aspect_seed_produces_no_hachure() {
        let (_, sampler) = constant_field(0.0, 30.0, 20, 20);
        let params = Parameters::default();
        assert!(trace(Point2D::new(10.0, 10.0), &sampler, &params).is_none());
    }

    #[test]
    fn flat_plateau_produces_no_hachure() {
        let (_, sampler) = constant_field(90.0, 0.0, 20, 20);
        let mut params = Parameters::default();
        params.min_slope = 1.0;
        assert!(trace(Point2D::new(10.0, 10.0), &sampler, &params).is_none());
    }

    #[test]
    fn traces_down_slope_until_bounds() {
        let (_, sampler) = constant_field(180.0, 30.0, 20, 20);
        let mut params = Parameters::default();
        params.jump_distance = 1.0;
        params.min_slope = 1.0;
        let line = trace(Point2D::new(10.0, 10.0), &sampler, &params).unwrap();
        assert!(line.vertices.len() >= 2);
        assert!(line.vertices.len() <= params.max_tracer_steps + 1);
        // aspect 180 + 180 = 360 -> dy = cos(2pi) = 1, steps move +y (south->north here)
        assert!(line.last().y > line.first().y);
    }

    /// A straight run of five steps east (aspect 270 everywhere) walks into
    /// a single cell whose aspect turns the trace north, with the next cell
    /// over immediately turning it back south: a converging two-cell trap.
    /// The turn into the trap is within the oscillation threshold of the
    /// vertex two steps back, so the tracer must back off by two vertices
    /// (the trap entry and the vertex that triggered it), not one.
    #[test]
    fn converging_trap_terminates_by_oscillation() {
        let extent = Extent {
            west: 0.0,
            east: 20.0,
            south: 0.0,
            north: 20.0,
            resolution_x: 1.0,
            resolution_y: 1.0,
            rows: 20,
            columns: 20,
        };
        let slope = Array2D::new(20, 20, 30.0, -9999.0).unwrap();
        let mut aspect = Array2D::new(20, 20, 270.0, -9999.0).unwrap();
        // (x=10, y=10): turn north.
        aspect.set_value(10, 10, 180.0);
        // (x=10, y=11): turn back south, straight into the previous cell.
        aspect.set_value(9, 10, 0.0);
        let sampler = RasterSampler::new(extent, slope, aspect).unwrap();

        let mut params = Parameters::default();
        params.jump_distance = 1.0;
        params.min_slope = 1.0;

        let line = trace(Point2D::new(5.0, 10.0), &sampler, &params).unwrap();
        // Without the oscillation back-off the trace would still be running
        // through the trap; with it, the walk stops two vertices short of
        // ever entering the trap at all.
        assert_eq!(line.vertices.len(), 5);
        assert_eq!(line.last(), Point2D::new(9.0, 10.0));
    }
}
