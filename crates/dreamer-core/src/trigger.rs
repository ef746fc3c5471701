#![forbid(unsafe_code)]

//! Trigger registry.
//!
//! A trigger is an element that opens the video modal when activated. The
//! registry is a static snapshot taken at mount; triggers added to the
//! document later are not picked up. Locators are resolved at activation
//! time and never cached, so editing a trigger's markup takes effect on the
//! next click.

use crate::media::MediaLocator;

/// Anything that can carry an embedded media descriptor.
pub trait MediaSource {
    /// Raw descriptor (`src` of the first `video source` in the DOM host),
    /// `None` when the trigger has none.
    fn media_source(&self) -> Option<String>;
}

/// Index of a trigger within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriggerId(pub usize);

impl core::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

/// Snapshot of the document's triggers, in document order.
#[derive(Debug, Clone, Default)]
pub struct TriggerRegistry<T> {
    triggers: Vec<T>,
}

impl<T: MediaSource> TriggerRegistry<T> {
    /// Take ownership of the triggers present right now.
    #[must_use]
    pub fn snapshot(triggers: impl IntoIterator<Item = T>) -> Self {
        Self {
            triggers: triggers.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: TriggerId) -> Option<&T> {
        self.triggers.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TriggerId, &T)> + '_ {
        self.triggers
            .iter()
            .enumerate()
            .map(|(idx, trigger)| (TriggerId(idx), trigger))
    }

    /// Locator for `id`; empty when the trigger is unknown or carries none.
    #[must_use]
    pub fn resolve_locator(&self, id: TriggerId) -> MediaLocator {
        self.get(id).map_or_else(MediaLocator::empty, resolve_locator)
    }
}

/// Locator embedded in `trigger`, empty when absent.
#[must_use]
pub fn resolve_locator<T: MediaSource + ?Sized>(trigger: &T) -> MediaLocator {
    MediaLocator::from(trigger.media_source())
}
