//! The orchestrator (§4.G): sweeps the contour stack low to high, keeping
//! the live hachure set up to date by delegating to the spacing
//! controller (E) and the tracer (F), and emits the final set of
//! polylines. Hachure identity is kept stable across a sweep step via an
//! arena of integer handles (`HachureId`) rather than object identity or
//! `Rc<RefCell<_>>` back-pointers (§9).

use std::collections::HashSet;
use std::io::{Error, ErrorKind};
use std::sync::Arc;

use crate::contour::Contour;
use crate::geometry::{length, polyline_difference, Point2D, Polyline};
use crate::params::Parameters;
use crate::progress::{report_progress, AnomalyCounters, NullProgressSink, ProgressSink};
use crate::raster::{Array2D, RasterSampler};
use crate::segment::{even_split, Segment, SegmentStatus};
use crate::spacing::{
    classify, dash_plan, mean_slope, produce_clip_list, produce_seed_list, split_by_hachures, subdivide,
};
use crate::tracer::trace_all;

/// A stable handle into the orchestrator's arena, substituting for the
/// source's reliance on object identity across a sweep step (§9).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HachureId(pub usize);

/// Arena-backed storage for the live hachure set. Removal leaves a hole
/// (`None`) rather than shifting indices, so handles stay valid for the
/// lifetime of the arena.
#[derive(Default)]
struct HachureArena {
    slots: Vec<Option<Polyline>>,
}

impl HachureArena {
    fn insert(&mut self, line: Polyline) -> HachureId {
        let id = HachureId(self.slots.len());
        self.slots.push(Some(line));
        id
    }

    fn get(&self, id: HachureId) -> Option<&Polyline> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn remove(&mut self, id: HachureId) -> Option<Polyline> {
        self.slots.get_mut(id.0).and_then(|slot| slot.take())
    }
}

/// One emitted hachure (§6): its geometry, arc length (attached for
/// convenience, mirroring the `HEIGHT`/`SLOPE`/`ASPECT` attribute columns
/// this engine's WhiteboxTools ancestor wrote to its output shapefile), and
/// optionally a parallel per-vertex elevation sample (§12).
#[derive(Clone, Debug)]
pub struct Hachure {
    pub geometry: Polyline,
    pub length: f64,
    pub elevation: Option<Vec<f64>>,
}

/// The hachure placement engine (§4.G). Constructed with a validated
/// `Parameters` block and a read-only raster sampler; `run` consumes an
/// already-built contour stack (§4.C) and produces the final hachure set.
pub struct Engine {
    sampler: Arc<RasterSampler>,
    params: Parameters,
    pool: rayon::ThreadPool,
}

impl Engine {
    /// Validates `params` per §7/§11 and fails fast on a configuration
    /// error rather than partway through the sweep. Sizes its own `rayon`
    /// thread pool from `num_cpus`, the same way this crate's
    /// WhiteboxTools ancestor sizes its manual worker-thread fan-out in
    /// `topographic_hachures::run` (`num_procs = num_cpus::get()`),
    /// adapted here to `rayon`'s idiom instead of raw `std::thread`.
    pub fn new(sampler: RasterSampler, params: Parameters) -> Result<Engine, Error> {
        params.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_cpus::get())
            .build()
            .map_err(|e| Error::new(ErrorKind::Other, e.to_string()))?;
        Ok(Engine { sampler: Arc::new(sampler), params, pool })
    }

    fn avg_pixel(&self) -> f64 {
        let extent = self.sampler.extent();
        (extent.resolution_x + extent.resolution_y) / 2.0
    }

    /// Runs the full sweep (§4.G) over an already-built contour stack,
    /// low to high. `progress` is invoked once per contour step; pass
    /// `&NullProgressSink` if the caller doesn't need it. When `dem` is
    /// supplied *and* `Parameters::sample_elevation` is set (§11, default
    /// off), each output hachure additionally carries a per-vertex
    /// elevation sample (§12); a `dem` passed with the flag off is ignored.
    /// Sampling has no effect on which hachures are produced.
    pub fn run(
        &self,
        contours: &[Contour],
        verbose: bool,
        progress: &dyn ProgressSink,
        dem: Option<&Array2D>,
    ) -> Result<Vec<Hachure>, Error> {
        if contours.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput, "contour stack must not be empty"));
        }

        let mut arena = HachureArena::default();
        let mut live: HashSet<HachureId> = HashSet::new();
        let mut anomalies = AnomalyCounters::default();
        let mut last_reported = -1;
        let total = contours.len();

        for (index, contour) in contours.iter().enumerate() {
            if live.is_empty() {
                self.first_contour(contour, &mut arena, &mut live, &mut anomalies);
            } else {
                self.subsequent_contour(contour, &mut arena, &mut live, &mut anomalies);
            }
            progress.on_contour(index, total, live.len());
            if verbose {
                last_reported = report_progress("Sweeping contours", index + 1, total, last_reported);
            }
        }

        if verbose {
            println!("{}", anomalies.summarize());
        }

        let mut output: Vec<Hachure> = live
            .into_iter()
            .filter_map(|id| arena.remove(id))
            .map(|geometry| {
                let len = length(&geometry);
                Hachure { geometry, length: len, elevation: None }
            })
            .collect();

        // The elevation post-process (§12) is gated on the `sample_elevation`
        // flag (default off, §11): a `dem` passed while the flag is off is
        // ignored rather than silently changing `run`'s output shape.
        if self.params.sample_elevation {
            if let Some(dem) = dem {
                for hachure in &mut output {
                    hachure.elevation = Some(sample_elevation(&hachure.geometry, dem, self.sampler.extent()));
                }
            }
        }

        Ok(output)
    }

    /// `first_contour(K)` (§4.G): the live set is empty, so every
    /// `even_split` segment of `K.line` is a dash-planning candidate with
    /// no prior classification.
    fn first_contour(
        &self,
        contour: &Contour,
        arena: &mut HachureArena,
        live: &mut HashSet<HachureId>,
        anomalies: &mut AnomalyCounters,
    ) {
        let avg_pixel = self.avg_pixel();
        let spacing = 3.0 * self.params.max_spacing;
        for ring in &contour.line.parts {
            if ring.is_empty() {
                continue;
            }
            let mut segments = even_split(ring, spacing);
            for segment in &mut segments {
                segment.mean_slope = mean_slope(&segment.geometry, &self.sampler, avg_pixel);
            }
            let seeds = self.dash_seeds(&segments, anomalies);
            self.trace_and_install(&seeds, arena, live);
        }
    }

    /// `subsequent_contour(K)` (§4.G).
    fn subsequent_contour(
        &self,
        contour: &Contour,
        arena: &mut HachureArena,
        live: &mut HashSet<HachureId>,
        anomalies: &mut AnomalyCounters,
    ) {
        let avg_pixel = self.avg_pixel();
        let live_hachures: Vec<(HachureId, Polyline)> = live
            .iter()
            .filter_map(|&id| arena.get(id).map(|line| (id, line.clone())))
            .collect();

        let mut all_segments: Vec<Segment> = Vec::new();
        for ring in &contour.line.parts {
            if ring.is_empty() {
                continue;
            }
            let split = split_by_hachures(ring, &live_hachures);
            all_segments.extend(subdivide(split, self.params.max_spacing));
        }

        let classified =
            self.pool.install(|| classify(all_segments, &self.sampler, &self.params, avg_pixel));

        let hachure_length = |id: HachureId| arena.get(id).map(|l| length(l)).unwrap_or(0.0);
        let to_clip = produce_clip_list(&classified, hachure_length, self.params.tie_break);

        for id in &to_clip {
            live.remove(id);
            if let Some(geometry) = arena.remove(*id) {
                for piece in polyline_difference(&geometry, &contour.region) {
                    if !piece.is_empty() {
                        live.insert(arena.insert(piece));
                    }
                }
            }
        }

        // §4.E: the dash planner only ever runs on too-long segments; ok,
        // too-short, and clip-all segments are neither clipped nor reseeded
        // here, which is the whole point of the 0.9/2.2 thermostat.
        for segment in classified.iter().filter(|s| s.status == Some(SegmentStatus::TooLong)) {
            if dash_plan(segment, &self.params).is_empty() {
                anomalies.zero_unit_dashes += 1;
            }
        }
        let seeds: Vec<Point2D> =
            produce_seed_list(&classified, &self.params).into_iter().map(|d| d.point).collect();
        self.trace_and_install(&seeds, arena, live);
    }

    /// Every segment of the first contour is a dash-planning candidate with
    /// no prior classification (§4.G), so unlike `subsequent_contour` this
    /// runs the dash planner unfiltered.
    fn dash_seeds(&self, segments: &[Segment], anomalies: &mut AnomalyCounters) -> Vec<Point2D> {
        let mut seeds = Vec::new();
        for segment in segments {
            let dashes = dash_plan(segment, &self.params);
            if dashes.is_empty() {
                anomalies.zero_unit_dashes += 1;
            }
            seeds.extend(dashes.into_iter().map(|d| d.point));
        }
        seeds
    }

    fn trace_and_install(&self, seeds: &[Point2D], arena: &mut HachureArena, live: &mut HashSet<HachureId>) {
        let sampler = &self.sampler;
        let params = &self.params;
        let traced = self.pool.install(|| trace_all(seeds, sampler, params));
        for line in traced {
            live.insert(arena.insert(line));
        }
    }
}

/// The supplemented elevation-sampling post-process (§12): nearest-pixel
/// sampling of `dem` at each vertex of `line`, nodata mapped to NaN.
fn sample_elevation(line: &Polyline, dem: &Array2D, extent: &crate::raster::Extent) -> Vec<f64> {
    line.vertices
        .iter()
        .map(|v| {
            let (row, col) = extent.to_row_col(v.x, v.y);
            let value = dem.get_value(row, col);
            if value == dem.nodata {
                f64::NAN
            } else {
                value
            }
        })
        .collect()
}
