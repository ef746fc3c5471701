#![forbid(unsafe_code)]

//! Media locators, playback surfaces and the shared modal binding.
//!
//! A [`MediaSurface`] is whatever can play a video: an `HTMLMediaElement` in
//! the browser, [`MemorySurface`](crate::headless::MemorySurface) in tests.
//! [`MediaBinding`] wraps the one surface owned by the modal and exposes the
//! three operations the controller needs.

use crate::error::PlaybackRejected;

/// Address of a playable media resource.
///
/// The empty locator is a valid value meaning "no media configured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MediaLocator(Box<str>);

impl MediaLocator {
    /// The "no media" locator.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(locator: impl Into<Box<str>>) -> Self {
        Self(locator.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MediaLocator {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Option<String>> for MediaLocator {
    fn from(s: Option<String>) -> Self {
        s.map_or_else(Self::empty, Self::new)
    }
}

impl core::fmt::Display for MediaLocator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of asking a surface to start playing.
///
/// Playback start is fire-and-forget: nothing in this crate waits for it,
/// and callers finish with [`PlaybackStart::detach`]. A rejection (typically
/// an autoplay policy) is not actionable by the visitor and must never
/// change page state, so it is dropped there on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "finish with `.detach()` to make the ignored outcome explicit"]
pub enum PlaybackStart {
    /// Playback began synchronously.
    Started,
    /// The host accepted the request and settles it asynchronously.
    Pending,
    /// The host refused to start playback.
    Rejected(PlaybackRejected),
}

impl PlaybackStart {
    /// Drop the outcome. A `Rejected` result is intentionally ignored.
    pub fn detach(self) {
        match self {
            Self::Started | Self::Pending | Self::Rejected(_) => {}
        }
    }
}

/// A single video playback surface.
///
/// Setters take `&mut self` even where the browser API does not need it, so
/// that exclusive ownership of the surface is visible in the types.
pub trait MediaSurface {
    /// Current source, empty when none is assigned.
    fn src(&self) -> String;

    /// Replace the active source. Invalidates the playback position.
    fn set_src(&mut self, src: &str);

    fn set_muted(&mut self, muted: bool);

    /// Request playback from the current position.
    fn play(&mut self) -> PlaybackStart;

    fn pause(&mut self);

    fn set_current_time(&mut self, seconds: f64);

    /// Whether playback reached the end of the media.
    fn ended(&self) -> bool;
}

/// The modal's exclusively owned playback surface.
#[derive(Debug)]
pub struct MediaBinding<S> {
    surface: S,
}

impl<S: MediaSurface> MediaBinding<S> {
    #[must_use]
    pub const fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Point the surface at `locator`.
    pub fn assign(&mut self, locator: &MediaLocator) {
        self.surface.set_src(locator.as_str());
    }

    /// Unmute, then start playback. The start outcome is detached.
    pub fn play_with_sound(&mut self) {
        self.surface.set_muted(false);
        self.surface.play().detach();
    }

    /// Pause, rewind and release the source so nothing buffers while hidden.
    pub fn stop_and_reset(&mut self) {
        self.surface.pause();
        self.surface.set_current_time(0.0);
        self.surface.set_src("");
    }

    /// Currently assigned locator.
    #[must_use]
    pub fn assigned(&self) -> MediaLocator {
        MediaLocator::new(self.surface.src())
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{MemorySurface, SurfaceOp};
    use pretty_assertions::assert_eq;

    #[test]
    fn locator_from_missing_attribute_is_empty() {
        assert!(MediaLocator::from(None).is_empty());
        assert!(MediaLocator::from(Some(String::new())).is_empty());
        assert_eq!(
            MediaLocator::from(Some("videos/a.mp4".to_owned())).as_str(),
            "videos/a.mp4"
        );
    }

    #[test]
    fn play_with_sound_unmutes_before_playing() {
        let mut binding = MediaBinding::new(MemorySurface::new());
        binding.assign(&"videos/a.mp4".into());
        binding.play_with_sound();

        assert_eq!(
            binding.surface().ops(),
            &[
                SurfaceOp::SetSrc("videos/a.mp4".to_owned()),
                SurfaceOp::SetMuted(false),
                SurfaceOp::Play,
            ]
        );
        assert!(binding.surface().is_playing());
    }

    #[test]
    fn rejected_playback_is_swallowed() {
        let mut binding = MediaBinding::new(MemorySurface::new().rejecting_play());
        binding.assign(&"videos/a.mp4".into());
        binding.play_with_sound();

        assert!(!binding.surface().is_playing());
        assert_eq!(binding.assigned().as_str(), "videos/a.mp4");
    }

    #[test]
    fn stop_and_reset_releases_the_source() {
        let mut binding = MediaBinding::new(MemorySurface::new());
        binding.assign(&"videos/a.mp4".into());
        binding.play_with_sound();
        binding.surface_mut().advance(12.5);
        binding.stop_and_reset();

        let surface = binding.surface();
        assert!(!surface.is_playing());
        assert_eq!(surface.current_time(), 0.0);
        assert!(binding.assigned().is_empty());
    }
}
