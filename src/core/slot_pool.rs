//! Fixed-capacity slot pool with blocking acquisition and first-fit numbering.
//!
//! The pool combines two pieces of bookkeeping under one lock: a counting
//! permit (semaphore semantics) and a per-slot occupancy table that gives
//! every held permit a stable, human-facing 1-based slot number. Serializing
//! both under the same mutex guarantees that two concurrent acquirers can
//! never be handed the same slot number.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tracing::debug;

/// Occupancy table and permit count, guarded by the pool mutex.
struct SlotState {
    /// `occupied[i]` is true while slot `i + 1` is held.
    occupied: Vec<bool>,
    /// Permits currently available for acquisition.
    free_permits: usize,
}

/// Fixed set of execution slots with counting semaphore semantics.
///
/// `acquire` blocks the calling thread until a slot is free, marks the first
/// free slot occupied, and returns a [`SlotPermit`] that releases the slot on
/// drop. [`SlotPool::free_count`] is a best-effort snapshot; a caller that
/// observed free slots may still block briefly in `acquire` if another
/// acquirer won the race, and must tolerate that rather than fail.
pub struct SlotPool {
    capacity: usize,
    state: Mutex<SlotState>,
    /// Notified on every release; wakes blocked acquirers and idle-waiters.
    slot_freed: Condvar,
}

impl SlotPool {
    /// Create a pool with `capacity` slots, all free.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Capacity comes from validated
    /// configuration; a zero here is a configuration error surfaced at
    /// construction.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "slot pool capacity must be positive");
        Self {
            capacity,
            state: Mutex::new(SlotState {
                occupied: vec![false; capacity],
                free_permits: capacity,
            }),
            slot_freed: Condvar::new(),
        }
    }

    /// Total number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of currently free slots.
    ///
    /// Read concurrently with acquisitions and releases, so the value is a
    /// point-in-time estimate, not transactionally consistent with later
    /// calls.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.state.lock().free_permits
    }

    /// Snapshot of currently held slots, counted from the occupancy table.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.state
            .lock()
            .occupied
            .iter()
            .filter(|taken| **taken)
            .count()
    }

    /// Block until a slot is free, occupy the first free one, and return a
    /// permit for it.
    ///
    /// The permit wait and the first-fit slot assignment happen under a
    /// single critical section, so no two holders ever share a slot number.
    /// The returned [`SlotPermit`] releases the slot when dropped, on every
    /// exit path of the holding task.
    #[must_use]
    pub fn acquire(self: &Arc<Self>) -> SlotPermit {
        let mut state = self.state.lock();
        while state.free_permits == 0 {
            self.slot_freed.wait(&mut state);
        }
        state.free_permits -= 1;
        let slot_number = first_free_slot(&mut state);
        drop(state);

        debug!(slot = slot_number, "slot acquired");
        SlotPermit {
            pool: Arc::clone(self),
            slot_number,
        }
    }

    /// Block until every slot has been returned to the pool.
    ///
    /// Used as the drain step of a cooperative shutdown: returns only once
    /// all in-flight units of work have released their slots.
    pub fn wait_idle(&self) {
        let mut state = self.state.lock();
        while state.free_permits < self.capacity {
            self.slot_freed.wait(&mut state);
        }
    }

    /// Return `slot_number` to the pool. Called exactly once per successful
    /// acquisition, by [`SlotPermit::drop`].
    pub(crate) fn release(&self, slot_number: usize) {
        {
            let mut state = self.state.lock();
            debug_assert!(
                state.occupied[slot_number - 1],
                "released slot {slot_number} was not occupied"
            );
            state.occupied[slot_number - 1] = false;
            state.free_permits += 1;
        }
        // One notification serves both blocked acquirers and idle-waiters.
        self.slot_freed.notify_all();
        debug!(slot = slot_number, "slot released");
    }
}

/// First-fit scan over the occupancy table; marks the found slot occupied and
/// returns its 1-based number.
///
/// # Panics
///
/// Panics if no free slot exists. The caller holds a permit, so a full table
/// means the occupancy bookkeeping desynchronized from the permit count, a
/// broken invariant rather than a recoverable condition.
fn first_free_slot(state: &mut SlotState) -> usize {
    for (index, taken) in state.occupied.iter_mut().enumerate() {
        if !*taken {
            *taken = true;
            return index + 1;
        }
    }
    panic!("slot table desynchronized from permit count: no free slot found");
}

/// RAII guard for one held slot.
///
/// Holds the slot for its lifetime and releases it on drop. Permits are
/// `Send`, so a detached unit of work can own its permit for the duration of
/// the simulated workload.
pub struct SlotPermit {
    pool: Arc<SlotPool>,
    slot_number: usize,
}

impl SlotPermit {
    /// The 1-based slot number assigned to this permit, stable for the
    /// lifetime of the holding task.
    #[must_use]
    pub fn slot_number(&self) -> usize {
        self.slot_number
    }
}

impl Drop for SlotPermit {
    fn drop(&mut self) {
        self.pool.release(self.slot_number);
    }
}

impl std::fmt::Debug for SlotPermit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotPermit")
            .field("slot_number", &self.slot_number)
            .finish()
    }
}
