//! Scroll animation controller
//!
//! Combines easing functions and timing utilities to move the page from its
//! current offset to a navigation target.

use std::time::Duration;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};
use super::{ScrollConfig, ScrollConfigExt};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Duration,
    /// Starting scroll position
    from: f64,
    /// Target scroll position
    to: f64,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

/// Scroll animation controller
///
/// Call `animate_to()` to begin an animation, then `tick()` each frame to
/// get the position to apply. Starting a new animation replaces the one in
/// flight, continuing from wherever the page currently is.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    /// Configuration
    config: ScrollConfig,
    /// Last position handed out
    current: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    /// Create a new scroll animator with configuration
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Get the target scroll position (final position after animation)
    pub fn target(&self) -> f64 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    /// Last position produced by `animate_to` or `tick`
    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Start animating from `from` to `target`, clamped to `[0, max_scroll]`
    ///
    /// Returns the position to apply right away when no animation is
    /// needed: smooth scrolling disabled means an instant jump.
    pub fn animate_to(&mut self, from: f64, target: f64, max_scroll: f64, now: Duration) -> Option<f64> {
        let target = target.clamp(0.0, max_scroll.max(0.0));
        self.current = from;

        if !self.config.is_smooth() {
            self.animation = None;
            self.current = target;
            return Some(target);
        }

        if (from - target).abs() < f64::EPSILON {
            self.animation = None;
            return None;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
        None
    }

    /// Advance the animation, returning the position to apply this frame
    ///
    /// Returns `None` when nothing is animating.
    pub fn tick(&mut self, now: Duration) -> Option<f64> {
        let anim = self.animation.as_ref()?;

        if is_complete(anim.start, now, anim.duration) {
            self.current = anim.to;
            self.animation = None;
        } else {
            let t = progress(anim.start, now, anim.duration);
            self.current = lerp(anim.from, anim.to, anim.easing.apply(t));
        }

        Some(self.current)
    }

    /// Cancel any active animation and stop at `position`
    pub fn cancel(&mut self, position: f64) {
        self.animation = None;
        self.current = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_instant_scroll_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        assert_eq!(animator.animate_to(0.0, 100.0, 200.0, ms(0)), Some(100.0));
        assert!(!animator.is_animating());
        assert_eq!(animator.tick(ms(10)), None);
    }

    #[test]
    fn test_reaches_target_after_duration() {
        let mut animator = ScrollAnimator::with_defaults();
        assert_eq!(animator.animate_to(0.0, 730.0, 2000.0, ms(1000)), None);
        assert!(animator.is_animating());

        let mid = animator.tick(ms(1300)).unwrap();
        assert!(mid > 0.0 && mid < 730.0);
        assert!((mid - 365.0).abs() < 1e-6, "swing midpoint, got {}", mid);

        assert_eq!(animator.tick(ms(1599)).map(|p| p < 730.0), Some(true));
        assert_eq!(animator.tick(ms(1600)), Some(730.0));
        assert!(!animator.is_animating());
        assert_eq!(animator.tick(ms(1700)), None);
    }

    #[test]
    fn test_new_target_supersedes_animation_in_flight() {
        let mut animator = ScrollAnimator::with_defaults();
        animator.animate_to(0.0, 1000.0, 5000.0, ms(0));
        let pos = animator.tick(ms(300)).unwrap();

        animator.animate_to(pos, 200.0, 5000.0, ms(300));
        assert_eq!(animator.target(), 200.0);
        assert_eq!(animator.tick(ms(900)), Some(200.0));
    }

    #[test]
    fn test_target_clamped_to_scroll_range() {
        let mut animator = ScrollAnimator::with_defaults();
        animator.animate_to(50.0, 300.0, 100.0, ms(0));
        assert_eq!(animator.target(), 100.0);

        animator.animate_to(50.0, -70.0, 100.0, ms(0));
        assert_eq!(animator.target(), 0.0);
    }

    #[test]
    fn test_no_animation_when_already_at_target() {
        let mut animator = ScrollAnimator::with_defaults();
        assert_eq!(animator.animate_to(730.0, 730.0, 2000.0, ms(0)), None);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_cancel_stops_in_place() {
        let mut animator = ScrollAnimator::with_defaults();
        animator.animate_to(0.0, 500.0, 1000.0, ms(0));
        animator.cancel(120.0);
        assert!(!animator.is_animating());
        assert_eq!(animator.current(), 120.0);
    }
}
