//! Core slot accounting and the admission loop.

pub mod admission;
pub mod error;
pub mod executor;
pub mod slot_pool;
pub mod task;

pub use admission::{AdmissionLoop, LoopState};
pub use error::{AppResult, SchedulerError};
pub use executor::{Spawn, TaskExecutor};
#[cfg(feature = "tokio-runtime")]
pub use executor::SimulatedExecutor;
pub use slot_pool::{SlotPermit, SlotPool};
pub use task::{Task, TaskIdGenerator};
