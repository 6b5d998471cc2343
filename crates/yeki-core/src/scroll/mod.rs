//! Smooth scrolling for navigation clicks
//!
//! - `easing` - pure easing curves
//! - `timing` - progress and interpolation helpers
//! - `animation` - the animator combining both
//!
//! Time is always passed in by the host as a `Duration` since an arbitrary
//! origin (`performance.now()` in the browser, an `Instant` in the terminal),
//! so nothing here reads a clock.
//!
//! ```ignore
//! use std::time::Duration;
//! use yeki_core::scroll::ScrollAnimator;
//!
//! let mut animator = ScrollAnimator::with_defaults();
//! animator.animate_to(current, 730.0, max_scroll, now);
//!
//! // once per frame
//! if let Some(position) = animator.tick(frame_time) {
//!     window.scroll_to(position);
//! }
//! ```

pub mod animation;
pub mod easing;
pub mod timing;

pub use animation::ScrollAnimator;
pub use easing::EasingTypeExt;
pub use crate::config::{EasingType, ScrollConfig};

use std::time::Duration;

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Get animation duration as Duration
    fn animation_duration(&self) -> Duration;

    /// Get tick duration for animation FPS
    fn animation_tick_duration(&self) -> Duration;

    /// Check if smooth scrolling is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            // never zero
            Duration::from_millis((1000 / self.animation_fps as u64).max(1))
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_duration() {
        let config = ScrollConfig::default();
        assert_eq!(config.animation_duration(), Duration::from_millis(600));
    }

    #[test]
    fn test_tick_duration_fallback() {
        let config = ScrollConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_tick_duration_never_zero() {
        let config = ScrollConfig {
            animation_fps: 2000,
            ..Default::default()
        };
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(1));

        let config = ScrollConfig {
            animation_fps: 60,
            ..Default::default()
        };
        assert_eq!(config.animation_tick_duration(), Duration::from_millis(16));
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        assert!(config.is_smooth());

        config.smooth_enabled = false;
        assert!(!config.is_smooth());

        config.smooth_enabled = true;
        config.animation_duration_ms = 0;
        assert!(!config.is_smooth());
    }
}
