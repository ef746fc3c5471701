#![forbid(unsafe_code)]

//! Scroll-linked effects: page progress, nav bar background, frame throttle.

use crate::config::NavConfig;

/// Fraction of the scrollable range covered by `scroll_y`, clamped to `0..=1`.
///
/// A page that does not scroll reports `0`. Negative offsets (elastic
/// overscroll) clamp to `0`.
#[must_use]
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let max_scroll = document_height - viewport_height;
    if max_scroll.is_nan() || max_scroll <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / max_scroll).clamp(0.0, 1.0)
}

/// Background picker for the navigation bar.
#[derive(Debug, Clone)]
pub struct NavBar {
    threshold_px: f64,
    top: String,
    scrolled: String,
}

impl NavBar {
    #[must_use]
    pub fn new(config: &NavConfig) -> Self {
        Self {
            threshold_px: config.threshold_px,
            top: config.top_background.clone(),
            scrolled: config.scrolled_background.clone(),
        }
    }

    /// Background for the bar at `scroll_y`; switches strictly past the threshold.
    #[must_use]
    pub fn background(&self, scroll_y: f64) -> &str {
        if scroll_y > self.threshold_px {
            &self.scrolled
        } else {
            &self.top
        }
    }
}

/// Coalesces bursts of scroll events into one update per animation frame.
///
/// ```
/// use dreamer_core::scroll::FrameThrottle;
///
/// let mut throttle = FrameThrottle::default();
/// assert!(throttle.request());   // schedule a frame
/// assert!(!throttle.request());  // already pending
/// throttle.complete();           // frame ran
/// assert!(throttle.request());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    /// Returns `true` when the caller must schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// The scheduled frame ran.
    pub fn complete(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn progress_is_ratio_of_scrollable_range() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(500.0, 3000.0, 1000.0), 0.25);
        assert_eq!(scroll_progress(2000.0, 3000.0, 1000.0), 1.0);
    }

    #[test]
    fn progress_clamps_overscroll() {
        assert_eq!(scroll_progress(2600.0, 3000.0, 1000.0), 1.0);
        assert_eq!(scroll_progress(-40.0, 3000.0, 1000.0), 0.0);
    }

    #[test]
    fn unscrollable_page_reports_zero() {
        assert_eq!(scroll_progress(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_progress(10.0, 600.0, 800.0), 0.0);
        assert_eq!(scroll_progress(f64::NAN, 3000.0, 1000.0), 0.0);
    }

    #[test]
    fn nav_background_switches_past_threshold() {
        let nav = NavBar::new(&NavConfig::default());
        assert_eq!(nav.background(0.0), "rgba(0,0,0,.6)");
        assert_eq!(nav.background(40.0), "rgba(0,0,0,.6)");
        assert_eq!(nav.background(40.5), "rgba(0,0,0,.85)");
    }

    #[test]
    fn throttle_allows_one_pending_frame() {
        let mut t = FrameThrottle::default();
        assert!(t.request());
        assert!(t.is_pending());
        for _ in 0..10 {
            assert!(!t.request());
        }
        t.complete();
        assert!(!t.is_pending());
        assert!(t.request());
    }
}
