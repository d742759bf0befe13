//! Keyed numeric tween engine.
//!
//! The interaction logic never animates anything itself — it asks this
//! engine to move a named property toward a target over a duration, then
//! applies the values (and completions) that fall out of [`TweenEngine::advance`]
//! once per frame. Starting a tween on a key that is already animating
//! replaces the old motion, picking up from whatever current value the
//! caller supplies.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Easing curves. `CubicOut` is the decelerating curve every hover and fade
/// transition uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    CubicOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[derive(Debug, Clone)]
struct Tween {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    fn value_at(&self, now: Instant) -> (f64, bool) {
        if self.duration.is_zero() {
            return (self.to, true);
        }
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.from + (self.to - self.from) * self.easing.apply(t), false)
    }
}

/// A property update produced by one frame advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenUpdate<K> {
    pub key: K,
    pub value: f64,
    /// Set on the final update for this tween; the tween is gone afterwards.
    pub done: bool,
}

/// The engine: one live tween per key.
#[derive(Debug)]
pub struct TweenEngine<K: Eq + Hash + Copy> {
    tweens: HashMap<K, Tween>,
}

impl<K: Eq + Hash + Copy> Default for TweenEngine<K> {
    fn default() -> Self {
        Self { tweens: HashMap::new() }
    }
}

impl<K: Eq + Hash + Copy> TweenEngine<K> {
    /// Start (or replace) the tween for `key`, running `from` → `to`.
    pub fn go(&mut self, key: K, from: f64, to: f64, duration: Duration, easing: Easing, now: Instant) {
        self.tweens.insert(
            key,
            Tween { from, to, started: now, duration, easing },
        );
    }

    /// Sample every live tween at `now`. Finished tweens report `done: true`
    /// exactly once and are removed.
    pub fn advance(&mut self, now: Instant) -> Vec<TweenUpdate<K>> {
        let mut updates: Vec<TweenUpdate<K>> = self
            .tweens
            .iter()
            .map(|(&key, tween)| {
                let (value, done) = tween.value_at(now);
                TweenUpdate { key, value, done }
            })
            .collect();
        // Stable order keeps frame application deterministic in tests.
        updates.sort_by(|a, b| a.done.cmp(&b.done));
        for update in &updates {
            if update.done {
                self.tweens.remove(&update.key);
            }
        }
        updates
    }
}
