//! # Slot Admission
//!
//! A bounded-concurrency task admission and slot-tracking core.
//!
//! This library provides a fixed number of execution slots, a periodic
//! admission loop that randomly admits new work while slots are free, and
//! per-slot lifecycle tracking. It is the coordination layer of a simulated
//! job system: the entry point and the log consumer are external
//! collaborators, everything concurrent lives here.
//!
//! ## Core Pieces
//!
//! - **`SlotPool`**: a fixed-capacity set of numbered slots with counting
//!   semaphore semantics. `acquire` blocks until a slot is free, assigns the
//!   first free 1-based slot number, and returns an RAII `SlotPermit` that
//!   releases the slot when dropped, on every exit path.
//! - **`AdmissionLoop`**: a dedicated tick thread that, once per interval,
//!   reads the free-slot count and admits a uniformly random number of tasks
//!   in `[1, free]`. Each admitted task is handed to a detached unit of work
//!   on a shared worker pool; the loop never waits for completion. The only
//!   synchronization point a task provides is the release of its slot.
//!
//! ## Lifecycle
//!
//! The loop moves through `Stopped → Running → Stopping → Stopped`.
//! `stop` is a cooperative drain: it joins the tick thread, then waits until
//! every outstanding slot has been returned to the pool.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use slot_admission::config::AdmissionConfig;
//! use slot_admission::core::{AdmissionLoop, SimulatedExecutor};
//! use slot_admission::runtime::TokioSpawner;
//!
//! slot_admission::util::init_tracing();
//!
//! let config = AdmissionConfig::new(5);
//! let executor = SimulatedExecutor::from_config(&config);
//! let spawner = TokioSpawner::new(tokio::runtime::Handle::current());
//! let admission = Arc::new(AdmissionLoop::new(config, executor, spawner)?);
//!
//! admission.start();
//! std::thread::sleep(std::time::Duration::from_secs(15));
//! admission.stop(); // blocks until every in-flight task released its slot
//! ```
//!
//! For complete examples, see `tests/admission_loop_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

/// Core slot accounting and the admission loop.
pub mod core;
/// Configuration model for the admission loop.
pub mod config;
/// Runtime adapters for spawning detached units of work.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::core::{SlotPermit, SlotPool};
