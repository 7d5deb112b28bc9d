//! One-shot deferred actions driven by elapsed frame time.

use std::time::Duration;

/// A single slot holding at most one pending deferred action
///
/// Scheduling while an action is pending cancels and replaces it, so a later
/// request can never be overwritten by an earlier timer firing.
#[derive(Debug, Clone)]
pub struct DeferredSlot<A> {
    pending: Option<Pending<A>>,
}

#[derive(Debug, Clone)]
struct Pending<A> {
    remaining: Duration,
    action: A,
}

impl<A> DeferredSlot<A> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedules `action` after `delay`; returns the action it replaced, if any
    pub fn schedule(&mut self, delay: Duration, action: A) -> Option<A> {
        self.pending
            .replace(Pending {
                remaining: delay,
                action,
            })
            .map(|cancelled| cancelled.action)
    }

    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.action)
    }

    /// Advances time; returns the action if it fired during this step
    pub fn advance(&mut self, delta: Duration) -> Option<A> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(delta);
        if pending.remaining.is_zero() {
            self.pending.take().map(|p| p.action)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.remaining)
    }

    pub fn peek(&self) -> Option<&A> {
        self.pending.as_ref().map(|p| &p.action)
    }
}

impl<A> Default for DeferredSlot<A> {
    fn default() -> Self {
        Self::new()
    }
}
