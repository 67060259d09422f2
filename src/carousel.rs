//! Windowed view over the filtered track list.
//!
//! The carousel shows a fixed number of consecutive tracks starting at its
//! index. Stepping the index wraps around the list; the window itself never
//! wraps, so it gets shorter near the end. Each step holds a transition token
//! for a short period and steps requested while it is held are dropped.

use std::time::{Duration, Instant};

pub const DEFAULT_WINDOW: usize = 5;
pub const DEFAULT_TRANSITION_LOCK: Duration = Duration::from_millis(500);

/// Single-slot guard for an in-flight transition.
#[derive(Debug, Clone)]
pub struct TransitionGuard {
    hold: Duration,
    busy_until: Option<Instant>,
}

impl TransitionGuard {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            busy_until: None,
        }
    }

    /// Take the token if it is free at `now`. Returns `false` when a
    /// transition is still in flight.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if self.is_busy(now) {
            return false;
        }
        self.busy_until = Some(now + self.hold);
        true
    }

    pub fn is_busy(&self, now: Instant) -> bool {
        self.busy_until.is_some_and(|until| now < until)
    }
}

#[derive(Debug, Clone)]
pub struct Carousel {
    index: usize,
    window: usize,
    guard: TransitionGuard,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_TRANSITION_LOCK)
    }
}

impl Carousel {
    pub fn new(window: usize, transition_lock: Duration) -> Self {
        Self {
            index: 0,
            window: window.max(1),
            guard: TransitionGuard::new(transition_lock),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Step forward, wrapping past the end of a list of `len` tracks.
    /// Returns whether the index moved.
    pub fn next(&mut self, len: usize, now: Instant) -> bool {
        if len == 0 || !self.guard.try_begin(now) {
            return false;
        }
        self.index = (self.index + 1) % len;
        true
    }

    /// Step back, wrapping before the start of a list of `len` tracks.
    pub fn previous(&mut self, len: usize, now: Instant) -> bool {
        if len == 0 || !self.guard.try_begin(now) {
            return false;
        }
        self.index = (self.index % len + len - 1) % len;
        true
    }

    pub fn is_transitioning(&self, now: Instant) -> bool {
        self.guard.is_busy(now)
    }

    /// Back to the first track (used when the view is re-derived).
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Keep the index inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = 0;
        }
    }

    /// The visible slice of `tracks`.
    pub fn window<'a, T>(&self, tracks: &'a [T]) -> &'a [T] {
        let start = self.index.min(tracks.len());
        let end = (start + self.window).min(tracks.len());
        &tracks[start..end]
    }
}
