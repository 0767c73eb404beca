//! Cooperative timers driven by the frame clock.
//!
//! Nothing here runs on its own: [`Scheduler::advance`] is called from the
//! per-frame tick and hands back every entry whose deadline has passed. An
//! entry is identified by a [`TimerToken`]; the owner keeps the token and
//! checks [`Scheduler::is_armed`] (or compares tokens) before acting, so a
//! cancelled or superseded timer can never act on stale state.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

#[derive(Debug)]
struct Pending<A> {
    token: TimerToken,
    deadline: Duration,
    action: A,
}

#[derive(Debug)]
pub struct Scheduler<A> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Time elapsed on the frame clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn after(&mut self, delay: Duration, action: A) -> TimerToken {
        let token = TimerToken(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            token,
            deadline: self.now + delay,
            action,
        });
        token
    }

    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.token != token);
        self.pending.len() != before
    }

    pub fn cancel_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&A) -> bool,
    {
        let before = self.pending.len();
        self.pending.retain(|p| !pred(&p.action));
        before - self.pending.len()
    }

    pub fn is_armed(&self, token: TimerToken) -> bool {
        self.pending.iter().any(|p| p.token == token)
    }

    /// Move the clock forward and return the due entries, earliest first.
    /// Returned entries are disarmed.
    pub fn advance(&mut self, dt: Duration) -> Vec<(TimerToken, A)> {
        self.now += dt;
        let now = self.now;
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].deadline <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.deadline.cmp(&b.deadline).then(a.token.cmp(&b.token)));
        due.into_iter().map(|p| (p.token, p.action)).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
