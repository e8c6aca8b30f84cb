use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::valuation::ComparableId;

/// Source of identifiers for comparables added to a session.
pub trait ComparableIdGenerator: Send + Sync {
    fn next_id(&self) -> ComparableId;
}

/// Random v4 UUIDs; the default for interactive sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl ComparableIdGenerator for UuidIdGenerator {
    fn next_id(&self) -> ComparableId {
        ComparableId(Uuid::new_v4().to_string())
    }
}

/// Monotonic `cmp-000001` style identifiers, stable across runs.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparableIdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> ComparableId {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        ComparableId(format!("cmp-{id:06}"))
    }
}
