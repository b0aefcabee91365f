//! An iterative hachure placement engine for cartographic relief shading.
//!
//! Sweeps a stack of elevation contours low to high, at each step deciding
//! where existing down-slope hachures must be clipped, where new ones must
//! be seeded, and how dense they must be to reflect local slope. Adapted
//! from this crate's WhiteboxTools lineage (`topographic_hachures`), whose
//! `Array2D`/`Point2D`/`LineSegment`/progress-reporting idioms this crate
//! reuses throughout; see `DESIGN.md` for the grounding ledger.
//!
//! The entry point is [`Engine`]: build a [`raster::RasterSampler`] from
//! your slope/aspect grids, a [`contour::Contour`] stack via
//! [`contour::build_contour_model`], a [`params::Parameters`] block, then
//! call [`Engine::run`].

pub mod contour;
pub mod engine;
pub mod geometry;
pub mod params;
pub mod progress;
pub mod raster;
pub mod segment;
pub mod spacing;
pub mod tracer;

#[cfg(test)]
mod scenarios;

pub use contour::{build_contour_model, Contour, FilledPolygon, IsoLine};
pub use engine::{Engine, Hachure, HachureId};
pub use params::{Parameters, ParametersBuilder, TieBreak};
pub use progress::{NullProgressSink, ProgressSink};
pub use raster::{Array2D, Extent, RasterSampler};
