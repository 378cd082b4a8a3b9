//! Supersession of in-flight list queries.
//!
//! A list page issues a query whenever its filters change. Responses can
//! arrive out of order, so each query carries a ticket and only the ticket
//! of the latest query for the current filters is accepted.

use mpdx_model::ActiveFilterSet;
use tracing::debug;

/// Value tagged with the filter version it was derived from.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub source_version: u64,
}

impl<T> Versioned<T> {
    #[inline]
    pub fn is_stale(&self, current_version: u64) -> bool {
        self.source_version != current_version
    }

    #[inline]
    pub fn is_current(&self, current_version: u64) -> bool {
        self.source_version == current_version
    }
}

/// Handle for one issued list query.
#[derive(Debug, Clone)]
pub struct QueryTicket {
    sequence: u64,
    filters: Versioned<ActiveFilterSet>,
}

impl QueryTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Filter version the query was issued for.
    pub fn generation(&self) -> u64 {
        self.filters.source_version
    }

    /// Snapshot of the filters sent as query variables.
    pub fn filters(&self) -> &ActiveFilterSet {
        &self.filters.data
    }
}

/// Tracks which list query is the current one.
#[derive(Debug, Clone, Default)]
pub struct ListQueryTracker {
    generation: u64,
    next_sequence: u64,
    latest: Option<u64>,
}

impl ListQueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new generation. Every outstanding ticket becomes stale.
    pub fn invalidate(&mut self, generation: u64) {
        if let Some(sequence) = self.latest.take() {
            debug!(sequence, generation, "superseding in-flight list query");
        }
        self.generation = generation;
    }

    /// Issues a ticket for a query over `filters` at `generation`.
    ///
    /// A ticket for a newer generation invalidates the old one first.
    pub fn begin(&mut self, generation: u64, filters: &ActiveFilterSet) -> QueryTicket {
        if generation != self.generation {
            self.invalidate(generation);
        }
        self.next_sequence += 1;
        self.latest = Some(self.next_sequence);
        QueryTicket {
            sequence: self.next_sequence,
            filters: Versioned {
                data: filters.clone(),
                source_version: generation,
            },
        }
    }

    /// Whether results for `ticket` should be shown.
    pub fn accept(&self, ticket: &QueryTicket) -> bool {
        let accepted =
            ticket.filters.is_current(self.generation) && self.latest == Some(ticket.sequence);
        if !accepted {
            debug!(
                sequence = ticket.sequence,
                generation = ticket.generation(),
                current = self.generation,
                "discarding stale list query results"
            );
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_accepted() {
        let mut tracker = ListQueryTracker::new();
        let ticket = tracker.begin(0, &ActiveFilterSet::new());
        assert!(tracker.accept(&ticket));
        assert!(tracker.accept(&ticket));
    }

    #[test]
    fn test_older_ticket_of_same_generation_is_rejected() {
        let mut tracker = ListQueryTracker::new();
        let first = tracker.begin(3, &ActiveFilterSet::new());
        let second = tracker.begin(3, &ActiveFilterSet::new());
        assert!(!tracker.accept(&first));
        assert!(tracker.accept(&second));
    }

    #[test]
    fn test_late_results_of_old_generation_are_rejected() {
        let mut tracker = ListQueryTracker::new();
        let old = tracker.begin(1, &ActiveFilterSet::new());
        let new = tracker.begin(2, &ActiveFilterSet::new());
        assert!(tracker.accept(&new));
        assert!(!tracker.accept(&old));
        assert_eq!(new.generation(), 2);
    }

    #[test]
    fn test_invalidate_rejects_outstanding_ticket() {
        let mut tracker = ListQueryTracker::new();
        let ticket = tracker.begin(1, &ActiveFilterSet::new());
        tracker.invalidate(2);
        assert!(!tracker.accept(&ticket));
    }

    #[test]
    fn test_versioned() {
        let cached = Versioned {
            data: (),
            source_version: 4,
        };
        assert!(cached.is_current(4));
        assert!(cached.is_stale(5));
    }
}
