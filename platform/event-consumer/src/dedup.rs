//! Opt-in duplicate suppression by envelope id
//!
//! Redelivery of an envelope is not idempotent for handlers that generate new
//! values on every apply. With [`DedupPolicy::Disabled`] (the default) every
//! delivery is applied. With [`DedupPolicy::ByEventId`] the dispatcher claims
//! each envelope id before apply and skips ids it has already claimed.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use uuid::Uuid;

/// Duplicate suppression policy for a dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Apply every delivery, including redeliveries of the same id
    #[default]
    Disabled,

    /// Remember the most recent `capacity` applied ids and skip repeats
    ///
    /// The claim is taken before apply. When two copies of one id are in
    /// flight on different subscriptions, the second is skipped as a
    /// duplicate while the first is still running; if the first then fails,
    /// the event is not applied at all. Copies on the same subscription are
    /// processed in order and are not affected.
    ByEventId { capacity: usize },
}

/// Bounded FIFO memory of claimed event ids
#[derive(Debug)]
pub(crate) struct SeenEvents {
    capacity: usize,
    inner: Mutex<SeenInner>,
}

#[derive(Debug, Default)]
struct SeenInner {
    ids: HashSet<Uuid>,
    order: VecDeque<Uuid>,
}

impl SeenEvents {
    pub(crate) fn from_policy(policy: DedupPolicy) -> Option<Self> {
        match policy {
            DedupPolicy::Disabled => None,
            DedupPolicy::ByEventId { capacity } => Some(Self {
                capacity: capacity.max(1),
                inner: Mutex::new(SeenInner::default()),
            }),
        }
    }

    /// Atomically claim an id; false if it was already claimed
    pub(crate) fn claim(&self, id: Uuid) -> bool {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if !inner.ids.insert(id) {
            return false;
        }

        inner.order.push_back(id);
        while inner.order.len() > self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.ids.remove(&oldest);
            }
        }

        true
    }

    /// Give back a claim after a failed apply so a redelivery can retry
    pub(crate) fn release(&self, id: Uuid) {
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if inner.ids.remove(&id) {
            inner.order.retain(|seen| *seen != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_policy_has_no_memory() {
        assert!(SeenEvents::from_policy(DedupPolicy::Disabled).is_none());
        assert_eq!(DedupPolicy::default(), DedupPolicy::Disabled);
    }

    #[test]
    fn test_claim_once() {
        let seen = SeenEvents::from_policy(DedupPolicy::ByEventId { capacity: 10 }).unwrap();
        let id = Uuid::new_v4();

        assert!(seen.claim(id));
        assert!(!seen.claim(id));
    }

    #[test]
    fn test_release_allows_reclaim() {
        let seen = SeenEvents::from_policy(DedupPolicy::ByEventId { capacity: 10 }).unwrap();
        let id = Uuid::new_v4();

        assert!(seen.claim(id));
        seen.release(id);
        assert!(seen.claim(id));
    }

    #[test]
    fn test_oldest_ids_are_forgotten() {
        let seen = SeenEvents::from_policy(DedupPolicy::ByEventId { capacity: 2 }).unwrap();
        let first = Uuid::new_v4();

        assert!(seen.claim(first));
        assert!(seen.claim(Uuid::new_v4()));
        assert!(seen.claim(Uuid::new_v4()));

        // Evicted, so it can be claimed again
        assert!(seen.claim(first));
    }
}
