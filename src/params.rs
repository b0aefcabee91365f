//! The parameter block (§3, §6, §11): the frozen configuration the engine
//! is built from, plus the slope-shift transform and ideal-spacing rule
//! that everything downstream of the contour sweep is tuned by.
//!
//! Validation follows this crate's WhiteboxTools-derived error idiom
//! (`std::io::Error` / `ErrorKind::InvalidInput`, §7) rather than a
//! dedicated error enum: configuration mistakes are reported the same way
//! a WhiteboxTools `Tool::run` reports a bad `--flag` value.

use std::io::{Error, ErrorKind};

/// Which of the two hachures bounding a too-short segment gets clipped
/// (§4.E, §9). The source's coin-flip is reproducible via `Random` with an
/// explicit seed; `Shorter` is the deterministic default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    Shorter,
    Random(u64),
}

impl Default for TieBreak {
    fn default() -> TieBreak {
        TieBreak::Shorter
    }
}

/// The frozen parameter block (§3). Built directly or via
/// `ParametersBuilder`; never mutated after `Engine::new` validates it.
#[derive(Clone, Debug)]
pub struct Parameters {
    pub min_spacing: f64,
    pub max_spacing: f64,
    pub min_slope: f64,
    pub max_slope: f64,
    pub slope_shift_exponent: f64,
    pub spacing_checks: usize,
    pub jump_distance: f64,
    pub max_tracer_steps: usize,
    pub too_short_threshold: f64,
    pub too_long_threshold: f64,
    pub tie_break: TieBreak,
    pub sample_elevation: bool,
}

impl Parameters {
    /// The configuration-error checks of §7: fail fast before the sweep
    /// begins rather than surface a confusing failure mid-trace.
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_spacing >= self.max_spacing {
            return Err(Error::new(ErrorKind::InvalidInput, "min_spacing must be < max_spacing"));
        }
        if self.min_spacing <= 0.0 {
            return Err(Error::new(ErrorKind::InvalidInput, "min_spacing must be positive"));
        }
        if !(0.0..=90.0).contains(&self.min_slope) || !(0.0..=90.0).contains(&self.max_slope) {
            return Err(Error::new(ErrorKind::InvalidInput, "min_slope/max_slope must be in [0, 90]"));
        }
        if self.min_slope >= self.max_slope {
            return Err(Error::new(ErrorKind::InvalidInput, "min_slope must be < max_slope"));
        }
        if self.slope_shift_exponent <= 0.0 {
            return Err(Error::new(ErrorKind::InvalidInput, "slope_shift_exponent must be > 0"));
        }
        if self.spacing_checks == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "spacing_checks must be positive"));
        }
        if self.jump_distance <= 0.0 {
            return Err(Error::new(ErrorKind::InvalidInput, "jump_distance must be positive"));
        }
        if self.max_tracer_steps == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "max_tracer_steps must be positive"));
        }
        Ok(())
    }

    /// `shift(v; 0,90, 0,90, e)`, applied to `min_slope`/`max_slope`.
    pub fn shifted_min_slope(&self) -> f64 {
        shift(self.min_slope, 0.0, 90.0, 0.0, 90.0, self.slope_shift_exponent)
    }

    pub fn shifted_max_slope(&self) -> f64 {
        shift(self.max_slope, 0.0, 90.0, 0.0, 90.0, self.slope_shift_exponent)
    }

    /// `ideal_spacing(s)` (§3): `None` when the slope is below the
    /// (shifted) minimum, i.e. "no hachures here".
    pub fn ideal_spacing(&self, slope: f64) -> Option<f64> {
        let s_shifted = shift(slope, 0.0, 90.0, 0.0, 90.0, self.slope_shift_exponent);
        let min_slope = self.shifted_min_slope();
        let max_slope = self.shifted_max_slope();
        if s_shifted < min_slope {
            return None;
        }
        let s_clamped = s_shifted.min(max_slope);
        let spacing = self.max_spacing
            - ((s_clamped - min_slope) / (max_slope - min_slope)) * (self.max_spacing - self.min_spacing);
        Some(spacing)
    }
}

impl Default for Parameters {
    fn default() -> Parameters {
        Parameters {
            min_spacing: 10.0,
            max_spacing: 50.0,
            min_slope: 1.0,
            max_slope: 45.0,
            slope_shift_exponent: 1.0,
            spacing_checks: 20,
            jump_distance: 3.0,
            max_tracer_steps: 150,
            too_short_threshold: 0.9,
            too_long_threshold: 2.2,
            tie_break: TieBreak::Shorter,
            sample_elevation: false,
        }
    }
}

/// Builds a `Parameters` block with the §6/§11 defaults, letting the
/// caller override only what matters to them.
#[derive(Clone, Debug, Default)]
pub struct ParametersBuilder {
    params: Parameters,
}

impl ParametersBuilder {
    pub fn new(min_slope: f64, max_slope: f64, min_spacing: f64, max_spacing: f64) -> ParametersBuilder {
        ParametersBuilder {
            params: Parameters { min_slope, max_slope, min_spacing, max_spacing, ..Parameters::default() },
        }
    }

    pub fn slope_shift_exponent(mut self, exponent: f64) -> Self {
        self.params.slope_shift_exponent = exponent;
        self
    }

    pub fn spacing_checks(mut self, checks: usize) -> Self {
        self.params.spacing_checks = checks;
        self
    }

    pub fn jump_distance(mut self, distance: f64) -> Self {
        self.params.jump_distance = distance;
        self
    }

    pub fn max_tracer_steps(mut self, steps: usize) -> Self {
        self.params.max_tracer_steps = steps;
        self
    }

    pub fn thermostat(mut self, too_short: f64, too_long: f64) -> Self {
        self.params.too_short_threshold = too_short;
        self.params.too_long_threshold = too_long;
        self
    }

    pub fn tie_break(mut self, policy: TieBreak) -> Self {
        self.params.tie_break = policy;
        self
    }

    pub fn sample_elevation(mut self, enabled: bool) -> Self {
        self.params.sample_elevation = enabled;
        self
    }

    pub fn build(self) -> Parameters {
        self.params
    }
}

/// `shift(v; d0,d1, r0,r1, e)` (§3): a power-law remap of `v` from
/// `[d0,d1]` to `[r0,r1]`, clamped outside its domain. `e = 1` is the
/// identity remap.
pub fn shift(v: f64, d0: f64, d1: f64, r0: f64, r1: f64, e: f64) -> f64 {
    debug_assert!(d0 < d1 && e > 0.0);
    let v = v.clamp(d0, d1);
    let t = (v - d0) / (d1 - d0);
    r0 + (r1 - r0) * t.powf(e)
}
