//! Per-word countdown and the single-shot feedback deferral.
//!
//! Both are driven by elapsed time handed in by the caller (`advance(dt)`), so
//! nothing here owns a thread or a clock. Each belongs to exactly one word index.

use std::time::Duration;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Pause after a duel answer or a timeout before the next word
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1500);
/// Pause after a solo answer when auto-advance is on
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { word_index: usize, remaining: u32 },
    Timeout { word_index: usize },
    Cancelled { word_index: usize },
}

/// Countdown for one word. A limit of zero means unlimited time: the countdown
/// is inert and never fires.
#[derive(Debug, Clone)]
pub struct Countdown {
    word_index: usize,
    limit: u32,
    remaining: u32,
    active: bool,
    carry: Duration,
}

impl Countdown {
    pub fn start(word_index: usize, limit_secs: u32) -> Self {
        Self {
            word_index,
            limit: limit_secs,
            remaining: limit_secs,
            active: limit_secs > 0,
            carry: Duration::ZERO,
        }
    }

    /// Feed elapsed time. Emits one `Tick` per whole second and a single
    /// `Timeout` when the countdown reaches zero.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if !self.active {
            return events;
        }

        self.carry += dt;
        while self.active && self.carry >= ONE_SECOND {
            self.carry -= ONE_SECOND;
            self.remaining = self.remaining.saturating_sub(1);
            events.push(TimerEvent::Tick {
                word_index: self.word_index,
                remaining: self.remaining,
            });
            if self.remaining == 0 {
                self.active = false;
                events.push(TimerEvent::Timeout {
                    word_index: self.word_index,
                });
            }
        }
        events
    }

    /// Stop the countdown. Returns `Cancelled` only the first time, and never
    /// after the countdown already timed out.
    pub fn cancel(&mut self) -> Option<TimerEvent> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(TimerEvent::Cancelled {
            word_index: self.word_index,
        })
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a limit is configured at all
    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    pub fn has_expired(&self) -> bool {
        self.is_enabled() && self.remaining == 0
    }

    /// Share of the limit still left, 0.0..=1.0
    pub fn fraction_left(&self) -> f64 {
        if self.limit == 0 {
            return 1.0;
        }
        self.remaining as f64 / self.limit as f64
    }
}

/// Delayed "advance to the next word", fired at most once
#[derive(Debug, Clone)]
pub struct Deferral {
    word_index: usize,
    remaining: Duration,
    pending: bool,
}

impl Deferral {
    pub fn new(word_index: usize, delay: Duration) -> Self {
        Self {
            word_index,
            remaining: delay,
            pending: true,
        }
    }

    /// Returns the word index once, when the delay has fully elapsed
    pub fn advance(&mut self, dt: Duration) -> Option<usize> {
        if !self.pending {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            self.pending = false;
            return Some(self.word_index);
        }
        None
    }

    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }
}
