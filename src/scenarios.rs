//! End-to-end scenario tests (§8 "Concrete scenarios"), exercising the
//! full `Engine::run` sweep rather than individual components. Kept as
//! its own file, in this crate's WhiteboxTools-derived habit of one
//! `#[cfg(test)] mod test` per concern, rather than a separate
//! integration-test crate.

#[cfg(test)]
mod test {
    use crate::contour::{build_contour_model, FilledPolygon, IsoLine};
    use crate::engine::Engine;
    use crate::geometry::Point2D;
    use crate::params::ParametersBuilder;
    use crate::progress::NullProgressSink;
    use crate::raster::{Array2D, Extent};
    use geo_types::{Coord, LineString, Polygon};

    const SIZE: isize = 60;

    fn extent() -> Extent {
        Extent {
            west: 0.0,
            east: SIZE as f64,
            south: 0.0,
            north: SIZE as f64,
            resolution_x: 1.0,
            resolution_y: 1.0,
            rows: SIZE,
            columns: SIZE,
        }
    }

    fn ring_from_rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> crate::geometry::Polyline {
        crate::geometry::Polyline::new(vec![
            Point2D::new(min_x, min_y),
            Point2D::new(max_x, min_y),
            Point2D::new(max_x, max_y),
            Point2D::new(min_x, max_y),
            Point2D::new(min_x, min_y),
        ])
    }

    fn square(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::new(vec![
                Coord { x: min_x, y: min_y },
                Coord { x: max_x, y: min_y },
                Coord { x: max_x, y: max_y },
                Coord { x: min_x, y: max_y },
                Coord { x: min_x, y: min_y },
            ]),
            vec![],
        )
    }

    /// A single-ring contour model, built directly (without
    /// `build_contour_model`) for scenarios that don't need a nested
    /// elevation stack.
    fn single_ring_contour(ring: crate::geometry::Polyline) -> Vec<crate::contour::Contour> {
        vec![crate::contour::Contour {
            elevation: 0.0,
            line: crate::geometry::MultiPolyline::new(vec![ring]),
            region: crate::geometry::Region::from_rect(&extent()),
        }]
    }

    /// Scenario 1: planar tilt (elevation = y). Slope is uniform and
    /// aspect points due north (0 degrees) everywhere below the crest,
    /// so hachures should run roughly parallel to the y-axis and none
    /// should terminate by oscillation within the interior.
    #[test]
    fn planar_tilt_produces_hachures_parallel_to_the_tilt() {
        let slope = Array2D::new(SIZE, SIZE, 20.0, -9999.0).unwrap();
        let aspect = Array2D::new(SIZE, SIZE, 0.0, -9999.0).unwrap();
        let sampler = crate::raster::RasterSampler::new(extent(), slope, aspect).unwrap();
        let params = ParametersBuilder::new(1.0, 45.0, 5.0, 8.0).jump_distance(1.0).build();
        let engine = Engine::new(sampler, params).unwrap();

        let contours = single_ring_contour(ring_from_rect(5.0, 5.0, 55.0, 55.0));
        let out = engine.run(&contours, false, &NullProgressSink, None).unwrap();
        assert!(!out.is_empty());
        for hachure in &out {
            // aspect 0 -> step direction 180 -> straight down in y; x should
            // stay essentially constant along the trace.
            let xs: Vec<f64> = hachure.geometry.vertices.iter().map(|v| v.x).collect();
            let spread = xs.iter().cloned().fold(f64::MIN, f64::max)
                - xs.iter().cloned().fold(f64::MAX, f64::min);
            assert!(spread.abs() < 1e-6);
        }
    }

    /// Scenario 4: flat plate, zero slope everywhere. Expect empty
    /// output and no errors.
    #[test]
    fn flat_plate_yields_empty_output_without_error() {
        let slope = Array2D::new(SIZE, SIZE, 0.0, -9999.0).unwrap();
        let aspect = Array2D::new(SIZE, SIZE, 90.0, -9999.0).unwrap();
        let sampler = crate::raster::RasterSampler::new(extent(), slope, aspect).unwrap();
        let params = ParametersBuilder::new(1.0, 45.0, 5.0, 8.0).jump_distance(1.0).build();
        let engine = Engine::new(sampler, params).unwrap();

        let contours = single_ring_contour(ring_from_rect(5.0, 5.0, 55.0, 55.0));
        let out = engine.run(&contours, false, &NullProgressSink, None).unwrap();
        assert!(out.is_empty());
    }

    /// Scenario 2 (simplified): a symmetric cone, approximated as radial
    /// aspect with slope decreasing from a steep crest to a shallow base.
    /// Traces should terminate by slack-slope near the base rather than
    /// running out the grid's bounds or oscillating.
    #[test]
    fn symmetric_cone_terminates_by_slack_slope_at_the_base() {
        let center = (SIZE as f64 / 2.0, SIZE as f64 / 2.0);
        let mut slope = Array2D::new(SIZE, SIZE, 0.0, -9999.0).unwrap();
        let mut aspect = Array2D::new(SIZE, SIZE, 0.0, -9999.0).unwrap();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let x = col as f64 + 0.5;
                let y = SIZE as f64 - (row as f64 + 0.5);
                let dx = x - center.0;
                let dy = y - center.1;
                let r = (dx * dx + dy * dy).sqrt().max(1e-6);
                let max_r = SIZE as f64 / 2.0;
                let s = (45.0 * (1.0 - r / max_r)).max(0.0);
                slope.set_value(row, col, s);
                let bearing = dx.atan2(dy).to_degrees();
                let bearing = if bearing < 0.0 { bearing + 360.0 } else { bearing };
                aspect.set_value(row, col, bearing);
            }
        }
        let sampler = crate::raster::RasterSampler::new(extent(), slope, aspect).unwrap();
        let params = ParametersBuilder::new(2.0, 40.0, 3.0, 6.0).jump_distance(1.0).build();
        let engine = Engine::new(sampler, params).unwrap();

        let contours = single_ring_contour(ring_from_rect(10.0, 10.0, 50.0, 50.0));
        let out = engine.run(&contours, false, &NullProgressSink, None).unwrap();
        assert!(!out.is_empty());
        for hachure in &out {
            assert!(hachure.geometry.vertices.len() >= 2);
            assert!(hachure.geometry.vertices.len() <= params.max_tracer_steps + 1);
        }
    }

    /// Scenario 5: a single-pixel spike far above its neighbors. The
    /// surrounding slope field should radiate hachures that terminate
    /// within a handful of steps rather than crossing the whole grid.
    #[test]
    fn single_pixel_spike_terminates_quickly() {
        let mut slope = Array2D::new(SIZE, SIZE, 0.0, -9999.0).unwrap();
        let mut aspect = Array2D::new(SIZE, SIZE, 0.0, -9999.0).unwrap();
        let (cr, cc) = (SIZE / 2, SIZE / 2);
        for dr in -3..=3 {
            for dc in -3..=3 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = cr + dr;
                let c = cc + dc;
                slope.set_value(r, c, 40.0);
                let bearing = (dc as f64).atan2(-dr as f64).to_degrees();
                let bearing = if bearing < 0.0 { bearing + 360.0 } else { bearing };
                aspect.set_value(r, c, bearing);
            }
        }
        let sampler = crate::raster::RasterSampler::new(extent(), slope, aspect).unwrap();
        let params = ParametersBuilder::new(1.0, 45.0, 1.0, 3.0).jump_distance(1.0).max_tracer_steps(50).build();
        let engine = Engine::new(sampler, params).unwrap();

        let contours = single_ring_contour(ring_from_rect(20.0, 20.0, 40.0, 40.0));
        let out = engine.run(&contours, false, &NullProgressSink, None).unwrap();
        for hachure in &out {
            assert!(hachure.geometry.vertices.len() <= 10);
        }
    }

    /// Scenario 6: exponent sweep. A lower exponent should never produce
    /// *fewer* hachures than a higher one on the same input, since it
    /// widens the slope range that counts as "steep enough".
    #[test]
    fn exponent_sweep_preserves_density_ordering() {
        let mut slope = Array2D::new(SIZE, SIZE, 0.0, -9999.0).unwrap();
        let aspect = Array2D::new(SIZE, SIZE, 90.0, -9999.0).unwrap();
        for row in 0..SIZE {
            for col in 0..SIZE {
                slope.set_value(row, col, 10.0 + (col as f64 / SIZE as f64) * 20.0);
            }
        }
        let sampler_for = |exponent: f64| {
            let s = slope.clone();
            let a = aspect.clone();
            let sampler = crate::raster::RasterSampler::new(extent(), s, a).unwrap();
            let params = ParametersBuilder::new(5.0, 30.0, 2.0, 6.0)
                .jump_distance(1.0)
                .slope_shift_exponent(exponent)
                .build();
            Engine::new(sampler, params).unwrap()
        };

        let contours = single_ring_contour(ring_from_rect(5.0, 5.0, 55.0, 55.0));
        let shallow_exponent = sampler_for(0.5).run(&contours, false, &NullProgressSink, None).unwrap();
        let steep_exponent = sampler_for(2.0).run(&contours, false, &NullProgressSink, None).unwrap();
        assert!(shallow_exponent.len() >= steep_exponent.len());
    }

    /// Keeps `square` in use for scenarios that want a filled-polygon
    /// stack rather than a single externally-built `Contour`.
    #[test]
    fn nested_stack_builds_the_expected_contour_count() {
        let filled = vec![
            FilledPolygon { elev_min: 0.0, geometry: square(0.0, 0.0, 60.0, 60.0) },
            FilledPolygon { elev_min: 15.0, geometry: square(15.0, 15.0, 45.0, 45.0) },
        ];
        let isolines = vec![IsoLine { elevation: 0.0, geometry: ring_from_rect(15.0, 15.0, 45.0, 45.0) }];
        let contours = build_contour_model(&extent(), filled, isolines);
        assert_eq!(contours.len(), 1);
    }
}
