//! Progress reporting (§10), in this crate's WhiteboxTools lineage: no
//! `log`/`tracing` dependency, just a `verbose: bool` flag and a
//! percentage-progress helper that only prints when the integer
//! percentage actually changes (the `old_progress` idiom).

/// The cooperative yield hook (§5, §10) a host harness can install to
/// observe sweep progress without scraping stdout.
pub trait ProgressSink: Send + Sync {
    fn on_contour(&self, index: usize, total: usize, hachure_count: usize);
}

/// The default sink: does nothing. Used when the caller doesn't supply one.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn on_contour(&self, _index: usize, _total: usize, _hachure_count: usize) {}
}

/// Prints `label: NN%` to stdout only when the integer percentage changes,
/// mirroring the `old_progress` bookkeeping used throughout this crate's
/// WhiteboxTools ancestor. Returns the new `last_reported` value for the
/// caller to thread through the next call.
pub fn report_progress(label: &str, processed: usize, total: usize, last_reported: i32) -> i32 {
    if total == 0 {
        return last_reported;
    }
    let progress = ((processed as f64 / total as f64) * 100.0) as i32;
    if progress != last_reported {
        println!("{}: {}%", label, progress);
    }
    progress
}

/// A running tally of the per-segment/per-dash anomalies absorbed locally
/// per §7, summarized once at the end of a verbose run instead of printed
/// per-occurrence (§10).
#[derive(Default, Debug, Clone, Copy)]
pub struct AnomalyCounters {
    pub empty_intersections: usize,
    pub zero_unit_dashes: usize,
    pub empty_slope_samples: usize,
}

impl AnomalyCounters {
    pub fn summarize(&self) -> String {
        format!(
            "{} segments skipped: empty intersection; {} dashes skipped: zero units; {} segments with no slope samples",
            self.empty_intersections, self.zero_unit_dashes, self.empty_slope_samples
        )
    }
}
