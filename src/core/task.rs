//! Admitted-task record and task id generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One admitted task, created at admission time and destroyed when its unit
/// of work completes and releases its slot. No identity persists after
/// completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// 1-based slot number assigned at admission, stable for the task's
    /// lifetime.
    pub slot_number: usize,
    /// Globally unique, monotonically increasing id; never reused.
    pub task_id: u64,
    /// Opaque descriptive string with no semantic meaning to the core.
    pub payload: String,
}

impl Task {
    /// Build a task record for an admission.
    #[must_use]
    pub fn new(slot_number: usize, task_id: u64, payload: impl Into<String>) -> Self {
        Self {
            slot_number,
            task_id,
            payload: payload.into(),
        }
    }
}

/// Cloneable handle over a shared atomic counter issuing task ids.
///
/// Ids are assigned in strictly increasing order across all admissions,
/// starting at 1. The generator is injected into the admission loop rather
/// than living as ambient global state.
#[derive(Debug, Clone, Default)]
pub struct TaskIdGenerator {
    counter: Arc<AtomicU64>,
}

impl TaskIdGenerator {
    /// Create a generator whose first issued id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next task id.
    pub fn next_id(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}
