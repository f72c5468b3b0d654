//! Cache observability for content stores.
//!
//! Every store owns one `CacheMetrics` and bumps it on each lookup, disk
//! read, and substitution pass.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Lookups answered from the substitution cache
    cache_hits: AtomicUsize,

    /// Lookups that had to substitute
    cache_misses: AtomicUsize,

    /// Times the backing YAML file was read
    disk_loads: AtomicUsize,

    /// Completed substitution passes
    substitutions: AtomicUsize,

    /// Fields left unresolved across all passes
    placeholder_issues: AtomicUsize,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit (substitution already cached).
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss (substitution had to be built).
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read of the backing file.
    pub fn record_disk_load(&self) {
        self.disk_loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a substitution pass and the issues it reported.
    pub fn record_substitution(&self, issues: usize) {
        self.substitutions.fetch_add(1, Ordering::Relaxed);
        self.placeholder_issues.fetch_add(issues, Ordering::Relaxed);
    }

    /// Get the current cache hit count.
    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Get the current cache miss count.
    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Get the number of file reads so far.
    pub fn disk_loads(&self) -> usize {
        self.disk_loads.load(Ordering::Relaxed)
    }

    /// Get the number of substitution passes so far.
    pub fn substitutions(&self) -> usize {
        self.substitutions.load(Ordering::Relaxed)
    }

    /// Get the number of placeholder issues reported so far.
    pub fn placeholder_issues(&self) -> usize {
        self.placeholder_issues.load(Ordering::Relaxed)
    }

    /// Snapshot the counters.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total = hits + misses;
        let cache_hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            disk_loads: self.disk_loads(),
            substitutions: self.substitutions(),
            placeholder_issues: self.placeholder_issues(),
        }
    }
}

/// Point-in-time copy of a store's counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Percentage (0-100)
    pub cache_hit_rate: f64,
    pub disk_loads: usize,
    pub substitutions: usize,
    pub placeholder_issues: usize,
}

impl MetricsReport {
    /// Add another report's counters into this one, recomputing the hit rate.
    pub fn merge(&mut self, other: &MetricsReport) {
        self.cache_hits += other.cache_hits;
        self.cache_misses += other.cache_misses;
        self.disk_loads += other.disk_loads;
        self.substitutions += other.substitutions;
        self.placeholder_issues += other.placeholder_issues;

        let total = self.cache_hits + self.cache_misses;
        self.cache_hit_rate = if total > 0 {
            (self.cache_hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
    }
}

impl Default for MetricsReport {
    fn default() -> Self {
        CacheMetrics::new().report()
    }
}
