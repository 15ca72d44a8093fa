use std::sync::atomic::{AtomicU64, Ordering};

/// Request counters kept by the service. Plain counters, no derived logic.
#[derive(Debug, Default)]
pub struct CatalogMetrics {
    searches: AtomicU64,
    comparisons: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    sort_fallbacks: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub searches: u64,
    pub comparisons: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub sort_fallbacks: u64,
}

impl CatalogMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_comparison(&self) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sort_fallback(&self) {
        self.sort_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            searches: self.searches.load(Ordering::Relaxed),
            comparisons: self.comparisons.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            sort_fallbacks: self.sort_fallbacks.load(Ordering::Relaxed),
        }
    }

    pub fn log_summary(&self) {
        let stats = self.snapshot();
        tracing::info!(
            "📊 Requests - searches: {}, comparisons: {}, cache hits/misses: {}/{}, sort fallbacks: {}",
            stats.searches,
            stats.comparisons,
            stats.cache_hits,
            stats.cache_misses,
            stats.sort_fallbacks
        );
    }
}

#[cfg(feature = "cli")]
mod system {
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};
    use sysinfo::{Pid, RefreshKind, System};

    #[derive(Debug, Clone)]
    pub struct SystemStats {
        pub cpu_usage: f32,
        pub memory_usage_mb: u64,
        pub peak_memory_mb: u64,
        pub elapsed_time: Duration,
    }

    pub struct SystemMonitor {
        system: Arc<Mutex<System>>,
        pid: Pid,
        start_time: Instant,
        peak_memory: Arc<Mutex<u64>>,
        enabled: bool,
    }

    impl SystemMonitor {
        pub fn new(enabled: bool) -> Self {
            let mut system = System::new_with_specifics(RefreshKind::everything());
            let pid = sysinfo::get_current_pid().expect("Failed to get current PID");
            system.refresh_all();

            Self {
                system: Arc::new(Mutex::new(system)),
                pid,
                start_time: Instant::now(),
                peak_memory: Arc::new(Mutex::new(0)),
                enabled,
            }
        }

        pub fn get_stats(&self) -> Option<SystemStats> {
            if !self.enabled {
                return None;
            }

            let mut system = self.system.lock().ok()?;
            system.refresh_all();

            let process = system.process(self.pid)?;
            let memory_mb = process.memory() / 1024 / 1024;

            let mut peak = self.peak_memory.lock().ok()?;
            if memory_mb > *peak {
                *peak = memory_mb;
            }
            let peak_memory = *peak;

            Some(SystemStats {
                cpu_usage: process.cpu_usage(),
                memory_usage_mb: memory_mb,
                peak_memory_mb: peak_memory,
                elapsed_time: self.start_time.elapsed(),
            })
        }

        pub fn log_stats(&self, phase: &str) {
            if let Some(stats) = self.get_stats() {
                tracing::info!(
                    "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                    phase,
                    stats.cpu_usage,
                    stats.memory_usage_mb,
                    stats.peak_memory_mb,
                    stats.elapsed_time
                );
            }
        }

        pub fn is_enabled(&self) -> bool {
            self.enabled
        }
    }

    impl Default for SystemMonitor {
        fn default() -> Self {
            Self::new(false)
        }
    }
}

#[cfg(feature = "cli")]
pub use system::{SystemMonitor, SystemStats};

// No-op stand-in when the CLI feature (and sysinfo) is absent.
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
