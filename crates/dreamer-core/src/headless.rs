#![forbid(unsafe_code)]

//! In-memory hosts.
//!
//! Deterministic stand-ins for the DOM pieces the core drives: a playback
//! surface, an overlay, triggers and a scene renderer. Each records what was
//! done to it so a caller can assert on exact side effects, including the
//! absence of any. Used by the test suites and by native replay tools.

use std::collections::BTreeSet;

use crate::error::{PlaybackRejected, SceneError};
use crate::media::{MediaSurface, PlaybackStart};
use crate::modal::Overlay;
use crate::scene::SceneRenderer;
use crate::trigger::MediaSource;

/// A mutation applied to a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    SetSrc(String),
    SetMuted(bool),
    Play,
    Pause,
    Seek(f64),
}

/// Playback surface with browser-like semantics.
///
/// Assigning a source rewinds and pauses, like a media element reload.
/// `play()` is rejected when no source is assigned, or always when built
/// with [`rejecting_play`](Self::rejecting_play).
#[derive(Debug, Clone)]
pub struct MemorySurface {
    src: String,
    muted: bool,
    playing: bool,
    ended: bool,
    current_time: f64,
    reject_play: bool,
    ops: Vec<SurfaceOp>,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// An empty, muted, paused surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            src: String::new(),
            muted: true,
            playing: false,
            ended: false,
            current_time: 0.0,
            reject_play: false,
            ops: Vec::new(),
        }
    }

    /// Refuse every `play()` request, as under a strict autoplay policy.
    #[must_use]
    pub fn rejecting_play(mut self) -> Self {
        self.reject_play = true;
        self
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub const fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Every mutation so far, oldest first.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Let `seconds` of media time pass if playing.
    pub fn advance(&mut self, seconds: f64) {
        if self.playing {
            self.current_time += seconds;
        }
    }

    /// Run playback to the end of the media.
    pub fn finish(&mut self) {
        self.playing = false;
        self.ended = true;
    }
}

impl MediaSurface for MemorySurface {
    fn src(&self) -> String {
        self.src.clone()
    }

    fn set_src(&mut self, src: &str) {
        self.ops.push(SurfaceOp::SetSrc(src.to_owned()));
        src.clone_into(&mut self.src);
        self.playing = false;
        self.ended = false;
        self.current_time = 0.0;
    }

    fn set_muted(&mut self, muted: bool) {
        self.ops.push(SurfaceOp::SetMuted(muted));
        self.muted = muted;
    }

    fn play(&mut self) -> PlaybackStart {
        self.ops.push(SurfaceOp::Play);
        if self.reject_play {
            return PlaybackStart::Rejected(PlaybackRejected("NotAllowedError".to_owned()));
        }
        if self.src.is_empty() {
            return PlaybackStart::Rejected(PlaybackRejected("NotSupportedError".to_owned()));
        }
        if self.ended {
            self.current_time = 0.0;
            self.ended = false;
        }
        self.playing = true;
        PlaybackStart::Started
    }

    fn pause(&mut self) {
        self.ops.push(SurfaceOp::Pause);
        self.playing = false;
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.ops.push(SurfaceOp::Seek(seconds));
        self.current_time = seconds;
        self.ended = false;
    }

    fn ended(&self) -> bool {
        self.ended
    }
}

/// Overlay that only remembers whether it is shown.
#[derive(Debug, Clone, Default)]
pub struct MemoryOverlay {
    visible: bool,
    changes: usize,
}

impl MemoryOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set_visible` calls that changed the visibility.
    #[must_use]
    pub const fn changes(&self) -> usize {
        self.changes
    }
}

impl Overlay for MemoryOverlay {
    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.changes += 1;
        }
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Trigger with a fixed (possibly absent) media descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTrigger {
    source: Option<String>,
}

impl MemoryTrigger {
    #[must_use]
    pub fn with_source(src: &str) -> Self {
        Self {
            source: Some(src.to_owned()),
        }
    }

    /// A trigger with no media descriptor at all.
    #[must_use]
    pub fn without_source() -> Self {
        Self { source: None }
    }
}

impl MediaSource for MemoryTrigger {
    fn media_source(&self) -> Option<String> {
        self.source.clone()
    }
}

/// Scene renderer that knows a fixed set of variables.
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    known: BTreeSet<String>,
    writes: Vec<(String, f64)>,
}

impl MemoryRenderer {
    /// A renderer whose scene defines `variables`.
    #[must_use]
    pub fn with_variables<'a>(variables: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            known: variables.into_iter().map(str::to_owned).collect(),
            writes: Vec::new(),
        }
    }

    /// Accepted writes, oldest first.
    #[must_use]
    pub fn writes(&self) -> &[(String, f64)] {
        &self.writes
    }
}

impl SceneRenderer for MemoryRenderer {
    fn set_variable(&mut self, name: &str, value: f64) -> Result<(), SceneError> {
        if !self.known.contains(name) {
            return Err(SceneError::UnknownVariable(name.to_owned()));
        }
        self.writes.push((name.to_owned(), value));
        Ok(())
    }
}
