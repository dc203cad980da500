// Shared fixtures for SimpleVec integration tests
//
// `Probe` values count their drops into a shared counter so tests can check
// that every value a container took ownership of is dropped exactly once.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared drop counter.
#[derive(Clone, Default)]
pub struct DropCounter(Arc<AtomicUsize>);

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a probe that reports to this counter.
    pub fn probe(&self, id: u32) -> Probe {
        Probe {
            id,
            counter: Some(Arc::clone(&self.0)),
        }
    }

    pub fn drops(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Element type that records its drop. The default value reports nowhere.
#[derive(Debug, Default)]
pub struct Probe {
    pub id: u32,
    counter: Option<Arc<AtomicUsize>>,
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        Probe {
            id: self.id,
            counter: self.counter.clone(),
        }
    }
}

impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        if let Some(counter) = &self.counter {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Ids of a slice of probes, in order.
pub fn ids(probes: &[Probe]) -> Vec<u32> {
    probes.iter().map(|p| p.id).collect()
}

/// Applies `SIMPLEVEC_LOG`, so failing tests can show the reallocation
/// history. A malformed value fails the test.
pub fn init_logging() {
    simplevec_log::init_from_env().expect("invalid SIMPLEVEC_LOG");
}
