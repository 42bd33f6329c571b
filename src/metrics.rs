//! Rewriting metrics collection for profiling and analysis.
//!
//! When the `tracing` feature is enabled, counters are collected during
//! rewriting rounds. When disabled, all operations are no-ops with zero
//! overhead and reports are all zero.
//!
//! # Usage
//!
//! ```rust,ignore
//! let engine = DisjunctiveUnifier::new(MostGeneralUnifiers::new());
//! // ... run rounds ...
//! let report = engine.metrics().report();
//! println!("Rounds: {}, Emitted: {}", report.rounds, report.combinations);
//! ```

#[cfg(feature = "tracing")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Aggregate counters for one engine instance.
#[cfg(feature = "tracing")]
#[derive(Debug)]
pub struct RewriteMetrics {
    /// Rounds run
    pub rounds: AtomicU64,
    /// Piece unifiers computed by the single-query unifier
    pub piece_unifiers: AtomicU64,
    /// Unifiers recorded into the cache
    pub cache_records: AtomicU64,
    /// (query, rule, head) keys pruned
    pub pruned: AtomicU64,
    /// Extension branches taken
    pub branches: AtomicU64,
    /// Heads with no compatible candidate
    pub dead_ends: AtomicU64,
    /// Distinct combinations emitted
    pub combinations: AtomicU64,
    /// Completed combinations already in the round's output
    pub duplicates: AtomicU64,
}

#[cfg(feature = "tracing")]
impl RewriteMetrics {
    pub fn new() -> Self {
        Self {
            rounds: AtomicU64::new(0),
            piece_unifiers: AtomicU64::new(0),
            cache_records: AtomicU64::new(0),
            pruned: AtomicU64::new(0),
            branches: AtomicU64::new(0),
            dead_ends: AtomicU64::new(0),
            combinations: AtomicU64::new(0),
            duplicates: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_round(&self) {
        self.rounds.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_piece_unifiers(&self, count: u64) {
        self.piece_unifiers.fetch_add(count, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_cache_record(&self) {
        self.cache_records.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_pruned(&self, count: u64) {
        self.pruned.fetch_add(count, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_branch(&self) {
        self.branches.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dead_end(&self) {
        self.dead_ends.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_combination(&self) {
        self.combinations.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            rounds: self.rounds.load(Ordering::Relaxed),
            piece_unifiers: self.piece_unifiers.load(Ordering::Relaxed),
            cache_records: self.cache_records.load(Ordering::Relaxed),
            pruned: self.pruned.load(Ordering::Relaxed),
            branches: self.branches.load(Ordering::Relaxed),
            dead_ends: self.dead_ends.load(Ordering::Relaxed),
            combinations: self.combinations.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.rounds.store(0, Ordering::Relaxed);
        self.piece_unifiers.store(0, Ordering::Relaxed);
        self.cache_records.store(0, Ordering::Relaxed);
        self.pruned.store(0, Ordering::Relaxed);
        self.branches.store(0, Ordering::Relaxed);
        self.dead_ends.store(0, Ordering::Relaxed);
        self.combinations.store(0, Ordering::Relaxed);
        self.duplicates.store(0, Ordering::Relaxed);
    }
}

#[cfg(feature = "tracing")]
impl Default for RewriteMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsReport {
    pub rounds: u64,
    pub piece_unifiers: u64,
    pub cache_records: u64,
    pub pruned: u64,
    pub branches: u64,
    pub dead_ends: u64,
    pub combinations: u64,
    pub duplicates: u64,
}

impl MetricsReport {
    /// Fraction of extension steps that found no candidate.
    pub fn dead_end_rate(&self) -> f64 {
        let total = self.branches + self.dead_ends;
        if total == 0 {
            0.0
        } else {
            self.dead_ends as f64 / total as f64
        }
    }

    /// Combinations emitted per round.
    pub fn combinations_per_round(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.combinations as f64 / self.rounds as f64
        }
    }
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Rewriting Metrics ===")?;
        writeln!(f, "Rounds:             {}", self.rounds)?;
        writeln!(f, "Piece unifiers:     {}", self.piece_unifiers)?;
        writeln!(
            f,
            "Cache:              {} recorded, {} pruned",
            self.cache_records, self.pruned
        )?;
        writeln!(
            f,
            "Extension:          {} branches, {} dead ends ({:.1}%)",
            self.branches,
            self.dead_ends,
            self.dead_end_rate() * 100.0
        )?;
        writeln!(
            f,
            "Combinations:       {} emitted, {} duplicates",
            self.combinations, self.duplicates
        )?;
        Ok(())
    }
}

// No-op implementation when tracing is disabled
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct RewriteMetrics;

#[cfg(not(feature = "tracing"))]
impl RewriteMetrics {
    #[inline]
    pub fn new() -> Self {
        RewriteMetrics
    }
    #[inline]
    pub fn record_round(&self) {}
    #[inline]
    pub fn record_piece_unifiers(&self, _count: u64) {}
    #[inline]
    pub fn record_cache_record(&self) {}
    #[inline]
    pub fn record_pruned(&self, _count: u64) {}
    #[inline]
    pub fn record_branch(&self) {}
    #[inline]
    pub fn record_dead_end(&self) {}
    #[inline]
    pub fn record_combination(&self) {}
    #[inline]
    pub fn record_duplicate(&self) {}
    #[inline]
    pub fn report(&self) -> MetricsReport {
        MetricsReport::default()
    }
    #[inline]
    pub fn reset(&self) {}
}

#[cfg(not(feature = "tracing"))]
impl Default for RewriteMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
