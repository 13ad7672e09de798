// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Slow-operation diagnostics
//!
//! Collection operations report their latency here. At level `SlowOnly`
//! only operations above the configured threshold are logged; at `All`
//! every operation is logged. An operability concern, not a correctness
//! one: profiling never changes operation results.

use log::{debug, warn};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::time::Duration;

/// Slow-operation threshold applied until the store is reconfigured
pub const DEFAULT_SLOW_OP_MS: u64 = 100;

/// Profiling levels, numbered as in the bootstrap contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingLevel {
    /// No operation logging
    Off = 0,
    /// Log operations exceeding the slow threshold
    SlowOnly = 1,
    /// Log every operation
    All = 2,
}

impl ProfilingLevel {
    /// Numeric level as declared by `set_profiling(1, ...)`-style callers
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::SlowOnly),
            2 => Some(Self::All),
            _ => None,
        }
    }
}

/// Point-in-time profiler counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilerStats {
    pub level: ProfilingLevel,
    pub slow_threshold_ms: u64,
    pub observed_ops: u64,
    pub slow_ops: u64,
}

/// Latency observer shared by every collection of a store
#[derive(Debug)]
pub struct Profiler {
    level: AtomicU8,
    slow_threshold_ms: AtomicU64,
    observed_ops: AtomicU64,
    slow_ops: AtomicU64,
}

impl Profiler {
    /// Create a profiler with logging off and the default threshold
    pub fn new() -> Self {
        Self {
            level: AtomicU8::new(ProfilingLevel::Off as u8),
            slow_threshold_ms: AtomicU64::new(DEFAULT_SLOW_OP_MS),
            observed_ops: AtomicU64::new(0),
            slow_ops: AtomicU64::new(0),
        }
    }

    /// Set the profiling level and, optionally, the slow threshold
    pub fn set_level(&self, level: ProfilingLevel, slow_ms: Option<u64>) {
        self.level.store(level as u8, Ordering::Relaxed);
        if let Some(ms) = slow_ms {
            self.slow_threshold_ms.store(ms, Ordering::Relaxed);
        }
    }

    /// Current profiling level
    pub fn level(&self) -> ProfilingLevel {
        ProfilingLevel::from_number(self.level.load(Ordering::Relaxed))
            .unwrap_or(ProfilingLevel::Off)
    }

    /// Record one operation's latency
    pub fn observe(&self, operation: &str, target: &str, elapsed: Duration) {
        self.observed_ops.fetch_add(1, Ordering::Relaxed);

        let threshold = Duration::from_millis(self.slow_threshold_ms.load(Ordering::Relaxed));
        let slow = elapsed >= threshold;
        if slow {
            self.slow_ops.fetch_add(1, Ordering::Relaxed);
        }

        match self.level() {
            ProfilingLevel::Off => {}
            ProfilingLevel::SlowOnly => {
                if slow {
                    warn!(
                        "Slow operation: {} on '{}' took {}ms (threshold {}ms)",
                        operation,
                        target,
                        elapsed.as_millis(),
                        threshold.as_millis()
                    );
                }
            }
            ProfilingLevel::All => {
                debug!(
                    "Operation: {} on '{}' took {}ms",
                    operation,
                    target,
                    elapsed.as_millis()
                );
            }
        }
    }

    /// Snapshot the counters
    pub fn stats(&self) -> ProfilerStats {
        ProfilerStats {
            level: self.level(),
            slow_threshold_ms: self.slow_threshold_ms.load(Ordering::Relaxed),
            observed_ops: self.observed_ops.load(Ordering::Relaxed),
            slow_ops: self.slow_ops.load(Ordering::Relaxed),
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_slow_operations_against_threshold() {
        let profiler = Profiler::new();
        profiler.set_level(ProfilingLevel::SlowOnly, Some(50));

        profiler.observe("find", "movies", Duration::from_millis(10));
        profiler.observe("find", "movies", Duration::from_millis(80));

        let stats = profiler.stats();
        assert_eq!(stats.observed_ops, 2);
        assert_eq!(stats.slow_ops, 1);
        assert_eq!(stats.slow_threshold_ms, 50);
    }

    #[test]
    fn level_round_trips_through_numbers() {
        assert_eq!(ProfilingLevel::from_number(1), Some(ProfilingLevel::SlowOnly));
        assert_eq!(ProfilingLevel::from_number(7), None);
    }
}
