#![forbid(unsafe_code)]

//! Staggered fade-in of portfolio items.
//!
//! Items start transparent and slightly lowered. The first time an item is
//! reported visible it is revealed and its observation ends; later reports
//! for the same item are ignored.

use std::collections::HashSet;

use crate::config::RevealConfig;

/// An inline style property and its value.
pub type StyleDecl = (&'static str, String);

/// Inline styles for the hidden and revealed phases.
#[derive(Debug, Clone)]
pub struct RevealStyle {
    offset_px: f64,
    duration_ms: u128,
    stagger_ms: u128,
}

impl RevealStyle {
    #[must_use]
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            offset_px: config.offset_px,
            duration_ms: config.duration.as_millis(),
            stagger_ms: config.stagger.as_millis(),
        }
    }

    /// Styles applied at mount to the item at `index` (document order).
    #[must_use]
    pub fn initial(&self, index: usize) -> Vec<StyleDecl> {
        let d = self.duration_ms;
        let delay = self.stagger_ms.saturating_mul(index as u128);
        vec![
            ("opacity", "0".to_owned()),
            ("transform", format!("translateY({}px)", self.offset_px)),
            (
                "transition",
                format!("opacity {d}ms ease, transform {d}ms ease"),
            ),
            ("transition-delay", format!("{delay}ms")),
        ]
    }

    /// Styles applied once the item becomes visible.
    #[must_use]
    pub fn revealed(&self) -> Vec<StyleDecl> {
        vec![
            ("opacity", "1".to_owned()),
            ("transform", "translateY(0)".to_owned()),
        ]
    }
}

/// What to do with one visibility report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Apply the revealed style and stop observing the item.
    Reveal,
    /// Nothing to do.
    Skip,
}

/// One-shot bookkeeping keyed by item index.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: HashSet<usize>,
}

impl RevealTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a visibility report for `index`.
    pub fn report(&mut self, index: usize, intersecting: bool) -> RevealAction {
        if intersecting && self.revealed.insert(index) {
            tracing::trace!(index, "portfolio item revealed");
            RevealAction::Reveal
        } else {
            RevealAction::Skip
        }
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn initial_style_staggers_by_index() {
        let style = RevealStyle::new(&RevealConfig::default());
        assert_eq!(
            style.initial(3),
            vec![
                ("opacity", "0".to_owned()),
                ("transform", "translateY(20px)".to_owned()),
                (
                    "transition",
                    "opacity 600ms ease, transform 600ms ease".to_owned()
                ),
                ("transition-delay", "300ms".to_owned()),
            ]
        );
        assert_eq!(style.initial(0)[3].1, "0ms");
    }

    #[test]
    fn custom_timing_flows_through() {
        let style = RevealStyle::new(&RevealConfig {
            duration: Duration::from_millis(250),
            stagger: Duration::from_millis(40),
            offset_px: 12.5,
            ..RevealConfig::default()
        });
        let initial = style.initial(2);
        assert_eq!(initial[1].1, "translateY(12.5px)");
        assert_eq!(initial[2].1, "opacity 250ms ease, transform 250ms ease");
        assert_eq!(initial[3].1, "80ms");
    }

    #[test]
    fn each_item_reveals_once() {
        let mut tracker = RevealTracker::new();
        assert_eq!(tracker.report(0, false), RevealAction::Skip);
        assert_eq!(tracker.report(0, true), RevealAction::Reveal);
        assert_eq!(tracker.report(0, true), RevealAction::Skip);
        assert_eq!(tracker.report(1, true), RevealAction::Reveal);
        assert_eq!(tracker.report(0, false), RevealAction::Skip);
        assert!(tracker.is_revealed(0));
        assert_eq!(tracker.revealed_count(), 2);
    }
}
