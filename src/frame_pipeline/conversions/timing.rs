use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::info;

/// What a recorded step spent its time on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Decoding or encoding the still frame
    Codec,
    /// One filter stage, named after the stage
    Filter,
}

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub kind: StepKind,
    pub duration: Duration,
}

/// Wall-clock time spent per step of one frame, in execution order.
///
/// Filter stages are recorded under their own names (`darken`, `eecm`,
/// `gammaadt`), so a chain running the same stage twice accumulates both
/// runs under one name in [`get_step`](Self::get_step).
#[derive(Debug, Default)]
pub struct StageTimings {
    steps: Vec<StepTiming>,
    by_name: HashMap<String, Duration>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, kind: StepKind, duration: Duration) {
        let name = name.into();
        *self.by_name.entry(name.clone()).or_insert(Duration::ZERO) += duration;
        self.steps.push(StepTiming {
            name,
            kind,
            duration,
        });
    }

    pub fn record(&mut self, timer: Timer) {
        let step = timer.stop();
        self.add_step(step.name, step.kind, step.duration);
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Time spent inside filter stages only.
    pub fn filter_duration(&self) -> Duration {
        self.steps
            .iter()
            .filter(|s| s.kind == StepKind::Filter)
            .map(|s| s.duration)
            .sum()
    }

    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.by_name.get(name).copied()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    /// Names of the filter stages that ran, in order.
    pub fn filter_steps(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(|s| s.kind == StepKind::Filter)
            .map(|s| s.name.as_str())
    }

    /// Logs each step's share of the frame time, then the totals.
    pub fn log_summary(&self) {
        let total = self.total_duration().as_secs_f64();
        for step in &self.steps {
            let percent = if total > 0.0 {
                step.duration.as_secs_f64() / total * 100.0
            } else {
                0.0
            };
            info!(
                step = %step.name,
                kind = ?step.kind,
                ms = step.duration.as_secs_f64() * 1000.0,
                percent,
                "Step timing"
            );
        }
        info!(
            ms = total * 1000.0,
            filter_ms = self.filter_duration().as_secs_f64() * 1000.0,
            "Frame time"
        );
    }
}

/// Running measurement for one step.
pub struct Timer {
    start: Instant,
    name: String,
    kind: StepKind,
}

impl Timer {
    pub fn codec(name: impl Into<String>) -> Self {
        Self::start(name, StepKind::Codec)
    }

    pub fn start(name: impl Into<String>, kind: StepKind) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
            kind,
        }
    }

    pub fn stop(self) -> StepTiming {
        StepTiming {
            duration: self.start.elapsed(),
            name: self.name,
            kind: self.kind,
        }
    }
}
