//! The contour model (§4.C): turns the externally-produced stack of filled
//! iso-polygons and iso-lines into the ordered `Contour` family the
//! orchestrator sweeps low to high.

use geo_types::Polygon;

use crate::geometry::{MultiPolyline, Polyline, Region};
use crate::raster::Extent;

/// One contour level (§3, §4.C): its boundary polyline (used for spacing
/// measurement) and its "higher-than-E" region (used for clipping). Both
/// are stored rather than one derived from the other on demand, to avoid
/// paying O(n) geometry cost per contour step (§9).
#[derive(Clone, Debug)]
pub struct Contour {
    pub elevation: f64,
    pub line: MultiPolyline,
    pub region: Region,
}

/// A filled iso-polygon tagged with its minimum elevation, as produced by
/// the host pipeline's contour-filling step (§6).
#[derive(Clone, Debug)]
pub struct FilledPolygon {
    pub elev_min: f64,
    pub geometry: Polygon<f64>,
}

/// An iso-line tagged with its elevation, as produced by the host
/// pipeline's contouring step (§6).
#[derive(Clone, Debug)]
pub struct IsoLine {
    pub elevation: f64,
    pub geometry: Polyline,
}

/// Builds the ordered contour family (§4.C steps 1-5).
///
/// `filled` need not arrive pre-sorted; `isolines` are grouped by
/// elevation and each group's parts are collected into one multi-part
/// polyline per level.
pub fn build_contour_model(
    extent: &Extent,
    mut filled: Vec<FilledPolygon>,
    isolines: Vec<IsoLine>,
) -> Vec<Contour> {
    filled.sort_by(|a, b| a.elev_min.partial_cmp(&b.elev_min).unwrap());

    let mut lines_by_elevation: Vec<(f64, Vec<Polyline>)> = Vec::new();
    for iso in isolines {
        match lines_by_elevation.iter_mut().find(|(e, _)| (*e - iso.elevation).abs() < 1e-9) {
            Some((_, parts)) => parts.push(iso.geometry),
            None => lines_by_elevation.push((iso.elevation, vec![iso.geometry])),
        }
    }
    lines_by_elevation.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

    let mut region = Region::from_rect(extent);
    let n = filled.len();
    let mut contours = Vec::with_capacity(n.saturating_sub(1));
    for (i, poly) in filled.iter().enumerate() {
        if i == n - 1 {
            break;
        }
        region = region.difference_polygon(&poly.geometry);
        let line = lines_by_elevation
            .iter()
            .find(|(e, _)| (*e - poly.elev_min).abs() < 1e-9)
            .map(|(_, parts)| MultiPolyline::new(parts.clone()))
            .unwrap_or_default();
        contours.push(Contour { elevation: poly.elev_min, line, region: region.clone() });
    }
    contours
}
