//! Execution seams: the unit-of-work trait, detached spawning, and the
//! simulated workload.

use std::future::Future;

use async_trait::async_trait;

use crate::core::Task;

/// A unit of work run for one admitted task.
///
/// Execution is fire-and-forget: the admission loop hands the task off and
/// never waits for or retrieves a result. The only synchronization point a
/// unit of work provides is the release of its slot, which happens outside
/// this trait when the task's permit is dropped.
#[async_trait]
pub trait TaskExecutor: Send + Sync + Clone + 'static {
    /// Run the work for `task` to completion.
    async fn execute(&self, task: Task);
}

/// Abstraction for spawning detached futures on a shared worker pool.
///
/// Admitted units of work run as independently scheduled tasks on whatever
/// runtime the spawner fronts; see `runtime::TokioSpawner` for the tokio
/// adapter.
pub trait Spawn {
    /// Spawn a detached future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

#[cfg(feature = "tokio-runtime")]
pub use simulated::SimulatedExecutor;

#[cfg(feature = "tokio-runtime")]
mod simulated {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::config::AdmissionConfig;
    use crate::core::Task;

    use super::TaskExecutor;

    /// Simulated workload: holds the task's slot for a uniformly random
    /// duration, then returns. No failure path exists.
    ///
    /// The duration range and the random generator are both injectable so
    /// tests can pin deterministic timings (a zero-width range of `0` ms
    /// makes completion immediate).
    #[derive(Clone)]
    pub struct SimulatedExecutor {
        min_ms: u64,
        max_ms: u64,
        rng: Arc<Mutex<StdRng>>,
    }

    impl SimulatedExecutor {
        /// Build an executor drawing durations from `[min_ms, max_ms]`,
        /// seeded from OS entropy.
        #[must_use]
        pub fn new(min_ms: u64, max_ms: u64) -> Self {
            Self::with_rng(min_ms, max_ms, StdRng::from_os_rng())
        }

        /// Build an executor from the work-duration range in `config`.
        #[must_use]
        pub fn from_config(config: &AdmissionConfig) -> Self {
            Self::new(config.work_min_ms, config.work_max_ms)
        }

        /// Build an executor with an explicit, seedable generator.
        #[must_use]
        pub fn with_rng(min_ms: u64, max_ms: u64, rng: StdRng) -> Self {
            assert!(min_ms <= max_ms, "work duration range is inverted");
            Self {
                min_ms,
                max_ms,
                rng: Arc::new(Mutex::new(rng)),
            }
        }
    }

    #[async_trait]
    impl TaskExecutor for SimulatedExecutor {
        async fn execute(&self, _task: Task) {
            let duration_ms = self.rng.lock().random_range(self.min_ms..=self.max_ms);
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }
    }

}
