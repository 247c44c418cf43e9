//! In-flight mutation tracking.
//!
//! Each mutation holds a [`PendingGuard`] for its lifetime; dropping the
//! guard (success, failure or cancellation) releases it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mutations the gateway can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    AddUser,
    DisableUser,
    UpdateUser,
    ChangePassword,
}

impl Mutation {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            Mutation::AddUser => 0,
            Mutation::DisableUser => 1,
            Mutation::UpdateUser => 2,
            Mutation::ChangePassword => 3,
        }
    }
}

/// Shared counters of in-flight mutations.
#[derive(Debug, Clone, Default)]
pub struct PendingMutations {
    counts: Arc<[AtomicUsize; Mutation::COUNT]>,
}

impl PendingMutations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `mutation` as in flight until the returned guard drops.
    pub fn begin(&self, mutation: Mutation) -> PendingGuard {
        self.counts[mutation.index()].fetch_add(1, Ordering::SeqCst);
        PendingGuard {
            counts: Arc::clone(&self.counts),
            mutation,
        }
    }

    pub fn is_pending(&self, mutation: Mutation) -> bool {
        self.counts[mutation.index()].load(Ordering::SeqCst) > 0
    }

    pub fn any_pending(&self, mutations: &[Mutation]) -> bool {
        mutations.iter().any(|m| self.is_pending(*m))
    }
}

/// Releases its mutation on drop.
#[derive(Debug)]
pub struct PendingGuard {
    counts: Arc<[AtomicUsize; Mutation::COUNT]>,
    mutation: Mutation,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.counts[self.mutation.index()].fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_releases_on_drop() {
        let pending = PendingMutations::new();
        let guard = pending.begin(Mutation::AddUser);
        assert!(pending.is_pending(Mutation::AddUser));
        assert!(!pending.is_pending(Mutation::DisableUser));
        drop(guard);
        assert!(!pending.is_pending(Mutation::AddUser));
    }

    #[test]
    fn clones_share_counters() {
        let pending = PendingMutations::new();
        let observer = pending.clone();
        let _guard = pending.begin(Mutation::DisableUser);
        assert!(observer.any_pending(&[Mutation::AddUser, Mutation::DisableUser]));
    }

    #[test]
    fn overlapping_guards_are_counted() {
        let pending = PendingMutations::new();
        let a = pending.begin(Mutation::ChangePassword);
        let b = pending.begin(Mutation::ChangePassword);
        drop(a);
        assert!(pending.is_pending(Mutation::ChangePassword));
        drop(b);
        assert!(!pending.is_pending(Mutation::ChangePassword));
    }
}
