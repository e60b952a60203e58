//! Global atomic counters for lapor observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. before the CLI exits).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters: no allocations, no locking.
pub struct Metrics {
    transitions_applied: AtomicU64,
    snapshots_summarized: AtomicU64,
    taxonomy_lookups: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            transitions_applied: AtomicU64::new(0),
            snapshots_summarized: AtomicU64::new(0),
            taxonomy_lookups: AtomicU64::new(0),
        }
    }

    /// Increment the transitions-applied counter by one.
    pub fn inc_transitions(&self) {
        self.transitions_applied.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "transitions_applied", "counter incremented");
    }

    /// Increment the snapshots-summarized counter by one.
    pub fn inc_snapshots_summarized(&self) {
        self.snapshots_summarized.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "snapshots_summarized", "counter incremented");
    }

    /// Increment the taxonomy-lookups counter by one.
    pub fn inc_taxonomy_lookups(&self) {
        self.taxonomy_lookups.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "taxonomy_lookups", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    ///
    /// Call this at natural boundaries (end of a CLI command, dashboard
    /// refresh) rather than on every increment.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            transitions_applied = self.transitions_applied(),
            snapshots_summarized = self.snapshots_summarized(),
            taxonomy_lookups = self.taxonomy_lookups(),
        );
    }

    /// Read the current transitions-applied count.
    pub fn transitions_applied(&self) -> u64 {
        self.transitions_applied.load(Ordering::Relaxed)
    }

    /// Read the current snapshots-summarized count.
    pub fn snapshots_summarized(&self) -> u64 {
        self.snapshots_summarized.load(Ordering::Relaxed)
    }

    /// Read the current taxonomy-lookups count.
    pub fn taxonomy_lookups(&self) -> u64 {
        self.taxonomy_lookups.load(Ordering::Relaxed)
    }
}
