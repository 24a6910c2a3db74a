//! Supersession tickets for interactive card searches.
//!
//! Repeated searches from an interactive caller race: a slow early
//! response must not overwrite the results of a later search. Each
//! dispatched search takes a ticket; a response is applied only while its
//! ticket is still the latest one issued.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one dispatched search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Monotonic ticket issuer with stale-response discard.
///
/// # Example
///
/// ```
/// use deckstack::sequence::SearchSequence;
///
/// let seq = SearchSequence::new();
/// let first = seq.begin();
/// let second = seq.begin();
/// assert!(!seq.is_current(first));
/// assert!(seq.is_current(second));
/// ```
#[derive(Debug, Default)]
pub struct SearchSequence {
    latest: AtomicU64,
}

impl SearchSequence {
    /// Create a sequence with no searches dispatched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a new search as dispatched and return its ticket.
    ///
    /// Every earlier ticket becomes stale immediately.
    pub fn begin(&self) -> SearchTicket {
        let issued = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket(issued)
    }

    /// Whether the ticket still identifies the latest dispatched search.
    ///
    /// A stale ticket means the response it tags must be discarded.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest.load(Ordering::SeqCst)
    }

    /// Number of searches dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
