//! Deferred commits for settle windows.
//!
//! A spin or roll schedules a task that becomes due once its settle window
//! has elapsed. The host drives the scheduler by passing the current time,
//! so tests never sleep. Each task carries a token; the session only runs a
//! task whose token is still the one it is waiting for.

use std::time::{Duration, Instant};

/// Identifies one scheduled commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettleToken(u64);

/// What to do when a settle window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleTask {
    /// Resolve the wheel and reveal the result.
    CommitSpin,
    /// Reveal the rolled face.
    CommitRoll {
        /// The face drawn when the roll started.
        face: u32,
    },
}

#[derive(Debug, Clone)]
struct Deferred {
    token: SettleToken,
    due: Instant,
    task: SettleTask,
}

/// Queue of pending commits ordered by due time.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    next_token: u64,
    pending: Vec<Deferred>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to become due `delay` after `now`.
    pub fn schedule(&mut self, task: SettleTask, now: Instant, delay: Duration) -> SettleToken {
        let token = SettleToken(self.next_token);
        self.next_token += 1;
        self.pending.push(Deferred {
            token,
            due: now + delay,
            task,
        });
        token
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(SettleToken, SettleTask)> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|d| d.due <= now);
        self.pending = rest;
        due.sort_by_key(|d| (d.due, d.token));
        due.into_iter().map(|d| (d.token, d.task)).collect()
    }

    /// When the earliest pending task becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|d| d.due).min()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
