//! Resolution health counters, injected into each resolver rather than kept
//! as process globals.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub trait ResolutionMetrics: Send + Sync {
    /// A reference was accepted through a single import that names no
    /// indexed type.
    fn record_dependency_import(&self, canonical: &str);

    /// A resolution call exhausted its scope chain.
    fn record_failure(&self, name: &str);
}

pub struct NoopResolutionMetrics;

impl ResolutionMetrics for NoopResolutionMetrics {
    fn record_dependency_import(&self, _canonical: &str) {}

    fn record_failure(&self, _name: &str) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub dependency_imports: u64,
    pub failures: u64,
}

#[derive(Debug, Default)]
pub struct HealthCounters {
    dependency_imports: AtomicU64,
    failures: AtomicU64,
}

impl HealthCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            dependency_imports: self.dependency_imports.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.dependency_imports.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}

impl ResolutionMetrics for HealthCounters {
    fn record_dependency_import(&self, _canonical: &str) {
        self.dependency_imports.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self, _name: &str) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_isolated_per_instance() {
        let live = HealthCounters::new();
        let batch = HealthCounters::new();
        live.record_dependency_import("ext.Lib");
        live.record_failure("Missing");
        batch.record_failure("Other");

        assert_eq!(
            live.snapshot(),
            HealthSnapshot {
                dependency_imports: 1,
                failures: 1
            }
        );
        assert_eq!(batch.snapshot().failures, 1);
        assert_eq!(batch.snapshot().dependency_imports, 0);

        live.reset();
        assert_eq!(live.snapshot(), HealthSnapshot::default());
    }
}
