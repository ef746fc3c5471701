#![forbid(unsafe_code)]

//! Video modal controller.
//!
//! Opens a full-screen overlay playing a trigger's video with sound, and
//! closes it again on any of three dismissal channels.
//!
//! # States
//!
//! ```text
//!            activate (locator non-empty)
//!   Closed ───────────────────────────────▶ Open ──┐ activate (non-empty):
//!     ▲                                      │  ◀──┘ re-assign, restart
//!     └──────────────────────────────────────┘
//!        close control | backdrop click | cancel key (overlay visible)
//! ```
//!
//! # Invariants
//!
//! 1. `Open` implies the surface has a non-empty source. Activation with an
//!    empty locator is a no-op in either state and touches nothing.
//! 2. `Closed` implies the surface is paused, rewound and has no source.
//! 3. Every dismissal channel goes through [`ModalController::close`], so the
//!    teardown runs the same way whichever channel fired.
//! 4. `close` is idempotent: repeating it leaves the same observable state.
//!
//! # Failure Modes
//!
//! - Playback start rejected: ignored, the modal stays open and silent.
//! - Close control missing from the markup: the host registers no listener
//!   for it; backdrop and cancel key still work.

use tracing::debug;

use crate::media::{MediaBinding, MediaLocator, MediaSurface};
use crate::trigger::{MediaSource, TriggerId, TriggerRegistry};

/// Container shown only while the modal is open.
pub trait Overlay {
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
}

/// Modal visibility state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// What made the modal close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissChannel {
    /// The explicit close control was clicked.
    CloseControl,
    /// The backdrop itself (not the content) was clicked.
    Backdrop,
    /// The cancel key was pressed while the overlay was visible.
    CancelKey,
    /// The host is tearing the page down.
    Host,
}

/// Where inside the overlay a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayHit {
    /// The event target is the overlay element itself.
    Backdrop,
    /// The event target is a descendant (video, close control, caption...).
    Content,
}

/// Why an event left the controller untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ignored {
    /// The activated trigger resolved to an empty locator.
    NoLocator,
    /// The click landed on overlay content, not the backdrop.
    ContentClick,
    /// A cancel key arrived while the overlay was hidden.
    OverlayHidden,
    /// Some other key.
    NotCancelKey,
}

/// Result of feeding one event to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Closed → Open with this locator.
    Opened(MediaLocator),
    /// Open → Open; the previous source was superseded.
    Replaced {
        previous: MediaLocator,
        locator: MediaLocator,
    },
    /// Open → Closed.
    Closed(DismissChannel),
    /// Teardown re-applied while already closed.
    AlreadyClosed(DismissChannel),
    /// Nothing happened.
    Ignored(Ignored),
}

/// Whether a DOM `KeyboardEvent.key` value is the cancel key.
///
/// `Esc` is the pre-standard spelling still sent by some older engines.
#[must_use]
pub fn is_cancel_key(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// The modal state machine, bound to its triggers, surface and overlay.
#[derive(Debug)]
pub struct ModalController<T, S, O> {
    state: ModalState,
    triggers: TriggerRegistry<T>,
    media: MediaBinding<S>,
    overlay: O,
}

impl<T, S, O> ModalController<T, S, O>
where
    T: MediaSource,
    S: MediaSurface,
    O: Overlay,
{
    /// Build a closed controller.
    ///
    /// The surface is expected to start without a source; the host markup
    /// ships it that way.
    #[must_use]
    pub fn new(triggers: TriggerRegistry<T>, media: MediaBinding<S>, overlay: O) -> Self {
        Self {
            state: ModalState::Closed,
            triggers,
            media,
            overlay,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ModalState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    #[must_use]
    pub const fn media(&self) -> &MediaBinding<S> {
        &self.media
    }

    #[must_use]
    pub const fn overlay(&self) -> &O {
        &self.overlay
    }

    /// A trigger was activated. Resolves its locator now and opens with it.
    pub fn activate(&mut self, id: TriggerId) -> Transition {
        let locator = self.triggers.resolve_locator(id);
        debug!(trigger = %id, locator = %locator, "modal trigger activated");
        self.open(locator)
    }

    /// Show the overlay playing `locator`, replacing whatever was playing.
    ///
    /// An empty locator is ignored without touching the surface.
    pub fn open(&mut self, locator: MediaLocator) -> Transition {
        if locator.is_empty() {
            return self.ignore(Ignored::NoLocator);
        }

        let previous = match self.state {
            ModalState::Open => Some(self.media.assigned()),
            ModalState::Closed => None,
        };

        self.media.assign(&locator);
        self.overlay.set_visible(true);
        self.media.play_with_sound();
        self.state = ModalState::Open;

        let transition = match previous {
            Some(previous) => Transition::Replaced { previous, locator },
            None => Transition::Opened(locator),
        };
        debug!(?transition, "modal opened");
        transition
    }

    /// Hide the overlay and release the surface.
    ///
    /// Runs the full teardown even when already closed.
    pub fn close(&mut self, channel: DismissChannel) -> Transition {
        let was_open = self.is_open();
        self.overlay.set_visible(false);
        self.media.stop_and_reset();
        self.state = ModalState::Closed;

        let transition = if was_open {
            Transition::Closed(channel)
        } else {
            Transition::AlreadyClosed(channel)
        };
        debug!(?transition, "modal closed");
        transition
    }

    /// The close control was clicked.
    pub fn on_close_control(&mut self) -> Transition {
        self.close(DismissChannel::CloseControl)
    }

    /// A click reached the overlay element.
    pub fn on_overlay_click(&mut self, hit: OverlayHit) -> Transition {
        match hit {
            OverlayHit::Backdrop => self.close(DismissChannel::Backdrop),
            OverlayHit::Content => self.ignore(Ignored::ContentClick),
        }
    }

    /// A key went down anywhere in the document.
    pub fn on_key(&mut self, key: &str) -> Transition {
        if !is_cancel_key(key) {
            return Transition::Ignored(Ignored::NotCancelKey);
        }
        if !self.overlay.is_visible() {
            return self.ignore(Ignored::OverlayHidden);
        }
        self.close(DismissChannel::CancelKey)
    }

    fn ignore(&self, reason: Ignored) -> Transition {
        debug!(?reason, state = ?self.state, "modal event ignored");
        Transition::Ignored(reason)
    }
}
