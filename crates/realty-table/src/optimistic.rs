//! Optimistic state with explicit commit and rollback
//!
//! A speculative value is layered over the last confirmed one. Every `apply`
//! hands out a token; only the newest token can commit or roll back, and a
//! `reconcile` with server data invalidates every outstanding token.

/// Token for one speculative change
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an optimistic update must be committed or rolled back"]
pub struct OptimisticUpdate {
    generation: u64,
}

#[derive(Clone, Debug)]
pub struct Optimistic<T> {
    confirmed: T,
    speculative: Option<T>,
    generation: u64,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self {
            confirmed: value,
            speculative: None,
            generation: 0,
        }
    }

    /// The value to display: the speculative one if present
    pub fn current(&self) -> &T {
        self.speculative.as_ref().unwrap_or(&self.confirmed)
    }

    pub fn confirmed(&self) -> &T {
        &self.confirmed
    }

    pub fn is_pending(&self) -> bool {
        self.speculative.is_some()
    }

    /// Apply `update` on top of the current value
    pub fn apply<F>(&mut self, update: F) -> OptimisticUpdate
    where
        F: FnOnce(&mut T),
    {
        let mut next = self.current().clone();
        update(&mut next);
        self.speculative = Some(next);
        self.generation += 1;
        OptimisticUpdate {
            generation: self.generation,
        }
    }

    /// Promote the speculative value. Returns false for a stale token.
    pub fn commit(&mut self, update: OptimisticUpdate) -> bool {
        if !self.owns(&update) {
            return false;
        }
        if let Some(value) = self.speculative.take() {
            self.confirmed = value;
        }
        true
    }

    /// Drop the speculative value. Returns false for a stale token.
    pub fn rollback(&mut self, update: OptimisticUpdate) -> bool {
        if !self.owns(&update) {
            return false;
        }
        self.speculative = None;
        true
    }

    /// Replace everything with authoritative server data
    pub fn reconcile(&mut self, value: T) {
        self.confirmed = value;
        self.speculative = None;
        self.generation += 1;
    }

    fn owns(&self, update: &OptimisticUpdate) -> bool {
        self.speculative.is_some() && update.generation == self.generation
    }
}

impl<T: Clone + Default> Default for Optimistic<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_commit() {
        let mut state = Optimistic::new(vec![1, 2, 3]);
        let update = state.apply(|v| v.reverse());
        assert_eq!(state.current(), &vec![3, 2, 1]);
        assert_eq!(state.confirmed(), &vec![1, 2, 3]);
        assert!(state.is_pending());

        assert!(state.commit(update));
        assert_eq!(state.confirmed(), &vec![3, 2, 1]);
        assert!(!state.is_pending());
    }

    #[test]
    fn test_rollback_restores_confirmed() {
        let mut state = Optimistic::new(vec![1, 2, 3]);
        let update = state.apply(|v| v.push(4));
        assert!(state.rollback(update));
        assert_eq!(state.current(), &vec![1, 2, 3]);
    }

    #[test]
    fn test_reconcile_invalidates_tokens() {
        let mut state = Optimistic::new(vec![1, 2, 3]);
        let update = state.apply(|v| v.clear());
        state.reconcile(vec![9]);

        assert!(!state.rollback(update));
        assert_eq!(state.current(), &vec![9]);
    }

    #[test]
    fn test_newer_update_supersedes_older() {
        let mut state = Optimistic::new(0);
        let first = state.apply(|v| *v += 1);
        let second = state.apply(|v| *v += 1);
        assert_eq!(*state.current(), 2);

        assert!(!state.rollback(first));
        assert_eq!(*state.current(), 2);

        assert!(state.commit(second));
        assert_eq!(*state.confirmed(), 2);
    }
}
