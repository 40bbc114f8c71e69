//! Periodic admission loop over a slot pool.
//!
//! One dedicated OS thread drives a fixed-interval tick. Each tick reads the
//! free-slot count and, when any slot is free, admits a uniformly random
//! number of tasks in `[1, free]`: the policy guarantees at least one
//! admission whenever capacity exists, with no damping. Every admitted task
//! is handed to a detached unit of work on a shared worker pool; the loop
//! tracks nothing beyond the slot each task holds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::config::AdmissionConfig;
use crate::core::{
    SchedulerError, SlotPermit, SlotPool, Spawn, Task, TaskExecutor, TaskIdGenerator,
};

/// Lifecycle states of the admission loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Not running; no tick thread exists.
    Stopped,
    /// Tick thread is live and admitting tasks.
    Running,
    /// Shutdown requested; draining in-flight tasks.
    Stopping,
}

/// State shared between the loop handle, the tick thread, and nothing else.
struct Shared<E, S> {
    config: AdmissionConfig,
    pool: Arc<SlotPool>,
    ids: TaskIdGenerator,
    rng: Mutex<StdRng>,
    /// Read by the tick thread between sleeps; cleared by `stop`.
    running: AtomicBool,
    executor: E,
    spawner: S,
}

/// Periodic task admission over a [`SlotPool`].
///
/// Moves through `Stopped → Running → Stopping → Stopped`. `start` returns
/// immediately; `stop` is a cooperative drain that blocks until the tick
/// thread has exited and every in-flight unit of work has released its slot.
/// Calling either from a non-matching state is a no-op.
pub struct AdmissionLoop<E, S> {
    shared: Arc<Shared<E, S>>,
    state: Mutex<LoopState>,
    tick_thread: Mutex<Option<JoinHandle<()>>>,
}

impl<E, S> AdmissionLoop<E, S>
where
    E: TaskExecutor,
    S: Spawn + Send + Sync + 'static,
{
    /// Create a stopped loop from validated configuration, seeding the
    /// admission generator from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfig`] if `config` fails
    /// validation.
    pub fn new(config: AdmissionConfig, executor: E, spawner: S) -> Result<Self, SchedulerError> {
        Self::with_rng(config, executor, spawner, StdRng::from_os_rng())
    }

    /// Create a stopped loop with an explicit, seedable admission generator
    /// so tests can pin deterministic admission sequences.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfig`] if `config` fails
    /// validation.
    pub fn with_rng(
        config: AdmissionConfig,
        executor: E,
        spawner: S,
        rng: StdRng,
    ) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;
        let pool = Arc::new(SlotPool::new(config.capacity));
        Ok(Self {
            shared: Arc::new(Shared {
                config,
                pool,
                ids: TaskIdGenerator::new(),
                rng: Mutex::new(rng),
                running: AtomicBool::new(false),
                executor,
                spawner,
            }),
            state: Mutex::new(LoopState::Stopped),
            tick_thread: Mutex::new(None),
        })
    }

    /// The pool whose slots this loop admits into.
    #[must_use]
    pub fn pool(&self) -> Arc<SlotPool> {
        Arc::clone(&self.shared.pool)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        *self.state.lock()
    }

    /// Transition Stopped→Running and launch the tick thread.
    ///
    /// Returns immediately; the first tick runs on the new thread. A no-op
    /// unless the loop is currently Stopped.
    pub fn start(&self) {
        let mut state = self.state.lock();
        if *state != LoopState::Stopped {
            warn!("start ignored: admission loop is not stopped");
            return;
        }

        self.shared.running.store(true, Ordering::Release);
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name("admission-tick".into())
            .spawn(move || Self::run_tick_loop(&shared))
            .expect("failed to spawn admission tick thread");
        *self.tick_thread.lock() = Some(handle);
        *state = LoopState::Running;

        info!(
            capacity = self.shared.pool.capacity(),
            "admission loop started"
        );
    }

    /// Transition Running→Stopping, join the tick thread, drain, and settle
    /// in Stopped.
    ///
    /// Blocks until every outstanding slot has been returned to the pool.
    /// This is a counting wait, not preemption: in-flight units of work
    /// run to natural completion. A no-op unless the loop is Running.
    pub fn stop(&self) {
        {
            let mut state = self.state.lock();
            if *state != LoopState::Running {
                return;
            }
            *state = LoopState::Stopping;
        }
        info!("admission loop stopping, waiting for in-flight tasks");

        // The tick thread observes the cleared flag after its current sleep.
        self.shared.running.store(false, Ordering::Release);
        if let Some(handle) = self.tick_thread.lock().take() {
            if handle.join().is_err() {
                warn!("admission tick thread panicked");
            }
        }

        self.shared.pool.wait_idle();
        *self.state.lock() = LoopState::Stopped;
        info!("admission loop stopped, all tasks completed");
    }

    /// Tick-thread body: tick, sleep, re-check the running flag.
    fn run_tick_loop(shared: &Arc<Shared<E, S>>) {
        let interval = Duration::from_millis(shared.config.tick_interval_ms);
        while shared.running.load(Ordering::Acquire) {
            Self::tick(shared);
            thread::sleep(interval);
        }
    }

    /// One admission tick. Skipped entirely once shutdown has been
    /// requested.
    fn tick(shared: &Shared<E, S>) {
        if !shared.running.load(Ordering::Acquire) {
            return;
        }

        let free = shared.pool.free_count();
        if free == 0 {
            info!("no free slots this tick");
            return;
        }

        let tasks_to_add = shared.rng.lock().random_range(1..=free);
        info!(tasks = tasks_to_add, free, "admitting tasks");

        for _ in 0..tasks_to_add {
            // The free-count read above may already be stale; acquisition
            // then blocks until a slot comes back rather than failing.
            let permit = shared.pool.acquire();
            let task_id = shared.ids.next_id();
            let task = Task::new(
                permit.slot_number(),
                task_id,
                format!("parameters for task {task_id}"),
            );
            Self::spawn_unit(shared, permit, task);
        }
    }

    /// Hand one admitted task to a detached unit of work. The permit moves
    /// into the future, so the slot is released on every exit path.
    fn spawn_unit(shared: &Shared<E, S>, permit: SlotPermit, task: Task) {
        let executor = shared.executor.clone();
        shared.spawner.spawn(async move {
            let slot = permit.slot_number();
            let task_id = task.task_id;
            info!(slot, task_id, "task started");
            executor.execute(task).await;
            info!(slot, task_id, "task completed");
            drop(permit);
        });
    }
}
