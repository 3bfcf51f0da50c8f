//! Monotonic per-phase timing (spec §6.3's "high-resolution timer"),
//! grounded on the `perf_numbers` struct in
//! `original_source/++c/test.cpp`: the original collects a
//! `Vec<float>` of millisecond samples per phase across the whole test
//! run and reports min/max/avg at the end. `std::time::Instant` is the
//! idiomatic stand-in for its hand-rolled `QueryPerformanceCounter` use.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Names of the phases the harness times, in the order the original's
/// `perf_numbers` struct declares its fields.
pub const PHASES: &[&str] = &[
    "read_file",
    "lex",
    "parse",
    "resolve",
    "gen_asm",
    "assemble",
    "run_exe",
    "interp",
    "ground_truth",
    "cleanup",
];

#[derive(Debug, Clone, Copy)]
pub struct PhaseStats {
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    pub total: Duration,
    pub count: usize,
}

/// Accumulates duration samples per named phase across an entire test
/// run, then reduces each phase to min/max/avg/total.
#[derive(Default)]
pub struct PerfNumbers {
    samples: BTreeMap<&'static str, Vec<Duration>>,
}

impl PerfNumbers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, phase: &'static str, elapsed: Duration) {
        self.samples.entry(phase).or_default().push(elapsed);
    }

    /// Time `f` and record its elapsed duration under `phase`, returning
    /// `f`'s result.
    pub fn time<T>(&mut self, phase: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.record(phase, start.elapsed());
        result
    }

    pub fn stats(&self, phase: &str) -> Option<PhaseStats> {
        let samples = self.samples.get(phase)?;
        if samples.is_empty() {
            return None;
        }
        let total: Duration = samples.iter().sum();
        let min = *samples.iter().min().unwrap();
        let max = *samples.iter().max().unwrap();
        let avg = total / samples.len() as u32;
        Some(PhaseStats {
            min,
            max,
            avg,
            total,
            count: samples.len(),
        })
    }

    pub fn phases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.samples.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_samples_to_min_max_avg() {
        let mut perf = PerfNumbers::new();
        perf.record("lex", Duration::from_millis(10));
        perf.record("lex", Duration::from_millis(20));
        perf.record("lex", Duration::from_millis(30));

        let stats = perf.stats("lex").unwrap();
        assert_eq!(stats.min, Duration::from_millis(10));
        assert_eq!(stats.max, Duration::from_millis(30));
        assert_eq!(stats.avg, Duration::from_millis(20));
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn unrecorded_phase_has_no_stats() {
        let perf = PerfNumbers::new();
        assert!(perf.stats("gen_asm").is_none());
    }
}
