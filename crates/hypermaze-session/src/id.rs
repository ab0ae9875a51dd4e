//! Bounded identity allocation.
//!
//! Users and sessions get small integers (`0..1000` by default) because
//! players read session ids off one screen and type them into another.
//! Ids are handed out from a monotonic cursor; released ids go into a free
//! set and are reused, lowest first, before the cursor advances again.
//! When the cursor reaches the capacity and nothing is free, allocation
//! fails instead of spinning.

use std::collections::BTreeSet;

use crate::SessionError;

/// Default size of the id space: ids are drawn from `0..1000`.
pub const DEFAULT_ID_CAPACITY: u64 = 1000;

/// Hands out unique ids from `0..capacity`.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    capacity: u64,
    /// Next never-used id.
    cursor: u64,
    /// Ids below `cursor` that were released and may be reused.
    free: BTreeSet<u64>,
}

impl IdAllocator {
    /// Creates an allocator over `0..capacity`.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            cursor: 0,
            free: BTreeSet::new(),
        }
    }

    /// Returns an id that is not currently in use.
    ///
    /// # Errors
    /// Returns [`SessionError::IdSpaceExhausted`] when all `capacity` ids
    /// are allocated.
    pub fn allocate(&mut self) -> Result<u64, SessionError> {
        if let Some(id) = self.free.pop_first() {
            return Ok(id);
        }
        if self.cursor < self.capacity {
            let id = self.cursor;
            self.cursor += 1;
            return Ok(id);
        }
        Err(SessionError::IdSpaceExhausted {
            capacity: self.capacity,
        })
    }

    /// Returns `id` to the pool. Releasing an id that was never handed out,
    /// or releasing twice, is ignored.
    pub fn release(&mut self, id: u64) {
        if id >= self.cursor || !self.free.insert(id) {
            tracing::trace!(id, "ignoring release of an id that isn't in use");
        }
    }

    /// Returns `true` if `id` is currently handed out.
    pub fn is_allocated(&self, id: u64) -> bool {
        id < self.cursor && !self.free.contains(&id)
    }

    /// Number of ids currently in use.
    pub fn in_use(&self) -> u64 {
        self.cursor - self.free.len() as u64
    }

    /// Size of the id space.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_allocate_full_space_distinct_and_in_range() {
        let mut ids = IdAllocator::default();
        let mut seen = HashSet::new();

        for _ in 0..DEFAULT_ID_CAPACITY {
            let id = ids.allocate().expect("space not yet full");
            assert!(id < DEFAULT_ID_CAPACITY, "id {id} out of range");
            assert!(seen.insert(id), "id {id} handed out twice");
        }
        assert_eq!(ids.in_use(), DEFAULT_ID_CAPACITY);
    }

    #[test]
    fn test_allocate_exhausted_returns_error() {
        let mut ids = IdAllocator::new(2);
        ids.allocate().unwrap();
        ids.allocate().unwrap();

        let result = ids.allocate();

        assert!(matches!(result, Err(SessionError::IdSpaceExhausted { capacity: 2 })));
    }

    #[test]
    fn test_release_makes_id_reusable() {
        let mut ids = IdAllocator::new(2);
        let a = ids.allocate().unwrap();
        ids.allocate().unwrap();

        ids.release(a);

        assert!(!ids.is_allocated(a));
        assert_eq!(ids.allocate().unwrap(), a);
        assert!(ids.is_allocated(a));
    }

    #[test]
    fn test_release_reuses_lowest_first() {
        let mut ids = IdAllocator::default();
        for _ in 0..5 {
            ids.allocate().unwrap();
        }
        ids.release(3);
        ids.release(1);

        assert_eq!(ids.allocate().unwrap(), 1);
        assert_eq!(ids.allocate().unwrap(), 3);
        assert_eq!(ids.allocate().unwrap(), 5);
    }

    #[test]
    fn test_release_unknown_or_twice_is_ignored() {
        let mut ids = IdAllocator::default();
        let a = ids.allocate().unwrap();

        ids.release(500); // never handed out
        ids.release(a);
        ids.release(a);

        assert_eq!(ids.in_use(), 0);
        assert_eq!(ids.allocate().unwrap(), a);
        assert_eq!(ids.allocate().unwrap(), 1);
    }
}
