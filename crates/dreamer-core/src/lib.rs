#![forbid(unsafe_code)]

//! `dreamer-core` holds the behaviour of the Dreamer landing page, independent
//! of any browser binding.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment (the `dreamer-web` WASM crate,
//!   or a test) pushes events in and applies the returned decisions.
//! - **Deterministic**: no clocks, no threads, no I/O.
//! - **Explicit ownership**: one [`ModalController`] owns the shared playback
//!   surface; every listener is owned by a [`SubscriptionSet`].
//!
//! The DOM-facing pieces are traits ([`MediaSurface`], [`Overlay`],
//! [`MediaSource`], [`SceneRenderer`]) with in-memory implementations in
//! [`headless`].

pub mod anchor;
pub mod config;
pub mod error;
pub mod headless;
pub mod hover;
pub mod media;
pub mod modal;
pub mod reveal;
pub mod scene;
pub mod scroll;
pub mod subscription;
pub mod trigger;

pub use config::PageConfig;
pub use error::{ConfigError, PlaybackRejected, SceneError};
pub use media::{MediaBinding, MediaLocator, MediaSurface, PlaybackStart};
pub use modal::{DismissChannel, ModalController, ModalState, Overlay, OverlayHit, Transition};
pub use scene::{SceneDriver, SceneRenderer};
pub use subscription::{EventKind, SubId, Subscription, SubscriptionSet};
pub use trigger::{MediaSource, TriggerId, TriggerRegistry};
