//! Opt-in wall-clock timing of pipeline stages.
//!
//! Stages wrap their work in [`timed`]. Nothing is recorded unless
//! collection was switched on with [`set_timing_enabled`]; samples live in a
//! thread-local buffer and [`collect_report`] drains it.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde_json::json;

/// Environment variable that enables timing.
pub const TIMING_ENV: &str = "DRAMATIS_TIMING";

/// Per-stage timings in the order stages first ran.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimingReport {
    pub stages: Vec<StageTiming>,
}

/// Accumulated time for one named stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTiming {
    pub name: String,
    pub total: Duration,
    pub max: Duration,
    pub count: usize,
}

thread_local! {
    static SAMPLES: RefCell<Vec<(String, Duration)>> = const { RefCell::new(Vec::new()) };
}

static TIMING_ENABLED: AtomicBool = AtomicBool::new(false);

/// True when `DRAMATIS_TIMING` is `1`, `true`, `yes` or `on` (any case).
#[must_use]
pub fn timing_enabled_from_env() -> bool {
    std::env::var(TIMING_ENV)
        .ok()
        .is_some_and(|value| is_truthy(&value))
}

/// Switch collection on or off. Switching off discards this thread's samples.
pub fn set_timing_enabled(enabled: bool) {
    TIMING_ENABLED.store(enabled, Ordering::Relaxed);
    if !enabled {
        clear_timings();
    }
}

#[must_use]
pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::Relaxed)
}

pub fn clear_timings() {
    SAMPLES.with(|samples| samples.borrow_mut().clear());
}

/// Run `f`, recording its duration under `stage` when timing is enabled.
pub fn timed<R>(stage: &str, f: impl FnOnce() -> R) -> R {
    if !is_timing_enabled() {
        return f();
    }

    let started = Instant::now();
    let result = f();
    let elapsed = started.elapsed();
    SAMPLES.with(|samples| samples.borrow_mut().push((stage.to_string(), elapsed)));
    result
}

/// Drain this thread's samples into a report.
#[must_use]
pub fn collect_report() -> TimingReport {
    let samples = SAMPLES.with(|samples| std::mem::take(&mut *samples.borrow_mut()));

    let mut stages: Vec<StageTiming> = Vec::new();
    for (name, elapsed) in samples {
        if let Some(stage) = stages.iter_mut().find(|s| s.name == name) {
            stage.total += elapsed;
            stage.max = stage.max.max(elapsed);
            stage.count += 1;
        } else {
            stages.push(StageTiming {
                name,
                total: elapsed,
                max: elapsed,
                count: 1,
            });
        }
    }

    TimingReport { stages }
}

impl TimingReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Sum over all stages.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.stages.iter().map(|s| s.total).sum()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let stages: Vec<_> = self
            .stages
            .iter()
            .map(|s| {
                json!({
                    "stage": s.name,
                    "count": s.count,
                    "total_us": s.total.as_micros(),
                    "max_us": s.max.as_micros(),
                })
            })
            .collect();

        json!({ "stages": stages, "total_us": self.total().as_micros() })
    }

    /// Fixed-width table for terminal output.
    #[must_use]
    pub fn display_table(&self) -> String {
        if self.stages.is_empty() {
            return "No timing samples recorded.".to_string();
        }

        let mut out = String::new();
        out.push_str("stage            count      total        max\n");
        out.push_str("---------------------------------------------\n");
        for s in &self.stages {
            let _ = writeln!(
                out,
                "{:<14} {:>7} {:>10} {:>10}",
                s.name,
                s.count,
                format_duration(s.total),
                format_duration(s.max)
            );
        }
        let _ = writeln!(out, "{:<14} {:>7} {:>10}", "total", "", format_duration(self.total()));
        out
    }
}

fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    if micros >= 1_000_000 {
        format!("{}.{:03}s", micros / 1_000_000, (micros % 1_000_000) / 1_000)
    } else if micros >= 1_000 {
        format!("{}.{:03}ms", micros / 1_000, micros % 1_000)
    } else {
        format!("{micros}µs")
    }
}

fn is_truthy(value: &str) -> bool {
    ["1", "true", "yes", "on"]
        .iter()
        .any(|t| value.trim().eq_ignore_ascii_case(t))
}
