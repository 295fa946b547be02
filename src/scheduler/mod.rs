//! Explicit scheduling for playback.
//!
//! Instead of chaining timers, every action is placed on a [`Timeline`] at an
//! absolute timestamp. A single loop (the player's `pump`) pops whatever is
//! due. Actions sharing a timestamp fire in the order they were scheduled.
//! Each entry carries the [`SessionId`] of the playback session that created
//! it so a whole session can be revoked at once.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use std::collections::BTreeMap;
use std::time::Duration;

/// Token identifying one playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SessionId(u64);

impl SessionId {
    /// The session after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// An action placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheduled<A> {
    pub at: Duration,
    pub session: SessionId,
    pub action: A,
}

/// Pending actions ordered by (timestamp, scheduling order).
#[derive(Debug, Clone)]
pub struct Timeline<A> {
    entries: BTreeMap<(Duration, u64), Scheduled<A>>,
    next_seq: u64,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `action` at absolute time `at`.
    pub fn schedule(&mut self, at: Duration, session: SessionId, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            (at, seq),
            Scheduled {
                at,
                session,
                action,
            },
        );
    }

    /// Remove and return the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Scheduled<A>> {
        let key = *self.entries.keys().next()?;
        if key.0 > now {
            return None;
        }
        self.entries.remove(&key)
    }

    /// Drop every entry belonging to `session`. Returns how many were dropped.
    pub fn cancel(&mut self, session: SessionId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.session != session);
        before - self.entries.len()
    }

    /// Timestamp of the earliest pending entry.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(at, _)| *at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pending entries in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &Scheduled<A>> {
        self.entries.values()
    }
}
