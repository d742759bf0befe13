//! Row-level smooth scroll with exponential ease-out.
//!
//! Wheel and key input move a logical target offset; each frame tick pulls
//! the visible offset a fraction of the remaining distance toward it, so
//! the card list glides instead of jumping. The hover logic re-measures
//! card boxes every frame while this is in motion — boxes slide under a
//! stationary pointer exactly as they do under a browser scroll.

use std::time::Instant;

/// Target-chasing scroll animator. Offsets are fractional rows.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Offset actually applied to the card list this frame.
    current: f64,
    /// Offset the animation is heading toward.
    target: f64,
    /// Fraction of the remaining distance covered per 60 Hz frame.
    /// Good range: 0.1–0.3; higher settles faster.
    speed: f64,
    last_tick: Option<Instant>,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
            last_tick: None,
        }
    }

    /// Nudge the target by `delta` rows, clamped to `0..=max`.
    pub fn scroll_by(&mut self, delta: f64, max: f64) {
        self.target = (self.target + delta).clamp(0.0, max.max(0.0));
    }

    /// Re-clamp after a resize or data change shrank the content.
    pub fn clamp_target(&mut self, max: f64) {
        self.target = self.target.clamp(0.0, max.max(0.0));
        self.current = self.current.clamp(0.0, max.max(0.0));
    }

    /// Advance the ease toward the target. Call once per frame with the
    /// frame timestamp; the decay is normalised to elapsed time so the
    /// glide feels identical at any frame rate.
    pub fn tick(&mut self, now: Instant) {
        let dt = match self.last_tick.replace(now) {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f64(),
            None => return,
        };
        let frames = dt * 60.0;
        let retain = (1.0 - self.speed).powf(frames);
        self.current = self.target + (self.current - self.target) * retain;
        if (self.current - self.target).abs() < 0.05 {
            self.current = self.target;
        }
    }

    /// Current fractional row offset.
    pub fn offset_rows(&self) -> f64 {
        self.current
    }

    /// True while there is still visible motion to play out.
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn eases_toward_target_and_settles() {
        let t0 = Instant::now();
        let mut scroll = SmoothScroll::new(0.2);
        scroll.tick(t0);
        scroll.scroll_by(9.0, 100.0);
        assert!(scroll.is_animating());

        let mut prev = 0.0;
        for i in 1..=120 {
            scroll.tick(t0 + Duration::from_millis(16 * i));
            assert!(scroll.offset_rows() >= prev);
            prev = scroll.offset_rows();
        }
        assert!(!scroll.is_animating());
        assert_eq!(scroll.offset_rows(), 9.0);
    }

    #[test]
    fn target_clamps_to_content() {
        let mut scroll = SmoothScroll::new(0.2);
        scroll.scroll_by(-5.0, 100.0);
        assert_eq!(scroll.target, 0.0);
        scroll.scroll_by(500.0, 30.0);
        assert_eq!(scroll.target, 30.0);
    }

    #[test]
    fn shrunken_content_pulls_the_offset_back() {
        let t0 = Instant::now();
        let mut scroll = SmoothScroll::new(0.5);
        scroll.tick(t0);
        scroll.scroll_by(50.0, 100.0);
        for i in 1..=200 {
            scroll.tick(t0 + Duration::from_millis(16 * i));
        }
        scroll.clamp_target(10.0);
        assert_eq!(scroll.offset_rows(), 10.0);
    }
}
