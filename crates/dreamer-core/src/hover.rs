#![forbid(unsafe_code)]

//! Hover-to-play previews on portfolio items.
//!
//! Each item's own (muted) preview video is independent of the modal's
//! surface: it plays while the pointer is over the item and pauses on the
//! current frame when the pointer leaves.

use crate::media::MediaSurface;

/// Pointer transitions over one portfolio item.
pub struct HoverPreview;

impl HoverPreview {
    /// Put a freshly mounted preview into its resting state.
    pub fn mount<S: MediaSurface>(surface: &mut S) {
        surface.pause();
    }

    /// Pointer entered: rewind if the clip ran out, then play.
    pub fn enter<S: MediaSurface>(surface: &mut S) {
        if surface.ended() {
            surface.set_current_time(0.0);
        }
        surface.play().detach();
    }

    /// Pointer left: pause on the current frame.
    pub fn leave<S: MediaSurface>(surface: &mut S) {
        surface.pause();
    }
}
