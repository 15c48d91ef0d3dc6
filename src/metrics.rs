// Build metrics module
//
// Lightweight counters describing a single resolution pass

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Per-build resolution metrics
///
/// Uses atomic counters so the resolver can record through a shared reference.
/// Logged once at the end of a build.
#[derive(Debug)]
pub struct BuildMetrics {
    /// Total files listed across every discovered search directory
    files_discovered: AtomicUsize,

    /// Requested names dropped because an optional category lacked the file
    optional_misses: AtomicUsize,

    /// Categories skipped (disabled selector or fastboot)
    categories_skipped: AtomicUsize,

    /// Paths handed to the import sink
    imports_registered: AtomicUsize,

    start_time: Instant,
}

impl BuildMetrics {
    pub fn new() -> Self {
        Self {
            files_discovered: AtomicUsize::new(0),
            optional_misses: AtomicUsize::new(0),
            categories_skipped: AtomicUsize::new(0),
            imports_registered: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_files_discovered(&self, count: usize) {
        self.files_discovered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_optional_misses(&self, count: usize) {
        self.optional_misses.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_category_skipped(&self) {
        self.categories_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_imports_registered(&self, count: usize) {
        self.imports_registered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn files_discovered(&self) -> usize {
        self.files_discovered.load(Ordering::Relaxed)
    }

    pub fn optional_misses(&self) -> usize {
        self.optional_misses.load(Ordering::Relaxed)
    }

    pub fn categories_skipped(&self) -> usize {
        self.categories_skipped.load(Ordering::Relaxed)
    }

    pub fn imports_registered(&self) -> usize {
        self.imports_registered.load(Ordering::Relaxed)
    }

    /// Time since the metrics were created
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Asset Resolution Summary ===");
        tracing::info!("Elapsed: {:.2}ms", self.elapsed().as_secs_f64() * 1000.0);
        tracing::info!(
            "Files discovered: {}, categories skipped: {}",
            self.files_discovered(),
            self.categories_skipped()
        );
        tracing::info!(
            "Imports registered: {}, optional files not shipped: {}",
            self.imports_registered(),
            self.optional_misses()
        );
    }
}

impl Default for BuildMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = BuildMetrics::new();
        assert_eq!(metrics.files_discovered(), 0);
        assert_eq!(metrics.imports_registered(), 0);
    }

    #[test]
    fn test_record_counters() {
        let metrics = BuildMetrics::new();

        metrics.record_files_discovered(12);
        metrics.record_files_discovered(3);
        metrics.record_optional_misses(2);
        metrics.record_category_skipped();
        metrics.record_imports_registered(7);

        assert_eq!(metrics.files_discovered(), 15);
        assert_eq!(metrics.optional_misses(), 2);
        assert_eq!(metrics.categories_skipped(), 1);
        assert_eq!(metrics.imports_registered(), 7);
    }

    #[test]
    fn test_elapsed() {
        let metrics = BuildMetrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.elapsed().as_millis() >= 10);
    }
}
