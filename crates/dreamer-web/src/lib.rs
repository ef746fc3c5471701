#![forbid(unsafe_code)]

//! WASM frontend for the Dreamer landing page.
//!
//! Binds the behaviour in `dreamer-core` to the live document:
//! - `web-sys` adapters for the core's surface/overlay/trigger traits,
//! - DOM listeners and observers owned as explicit subscriptions,
//! - a bridge to the Spline 3D runtime,
//! - the `wasm-bindgen` exported [`DreamerPage`] handle.

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listener;
#[cfg(target_arch = "wasm32")]
mod spline;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::DreamerPage;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets. The stub still validates configuration, which
/// lets native tooling check a page config before it ships.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct DreamerPage {
    config: dreamer_core::PageConfig,
}

#[cfg(not(target_arch = "wasm32"))]
impl DreamerPage {
    pub fn new(config: Option<String>) -> Result<Self, dreamer_core::ConfigError> {
        let config = match config {
            Some(json) => dreamer_core::PageConfig::from_json(&json)?,
            None => dreamer_core::PageConfig::default(),
        };
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &dreamer_core::PageConfig {
        &self.config
    }

    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        false
    }

    pub fn destroy(&mut self) {}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stub_accepts_partial_config() {
        let page = DreamerPage::new(Some(r#"{ "modal": { "active_class": "open" } }"#.to_owned()))
            .unwrap();
        assert_eq!(page.config().modal.active_class, "open");
        assert!(!page.is_modal_open());
    }

    #[test]
    fn stub_accepts_blank_optional_selectors() {
        let page = DreamerPage::new(Some(
            r#"{ "modal": { "close_selector": "" }, "reveal": { "preview_selector": "" } }"#
                .to_owned(),
        ))
        .unwrap();
        assert_eq!(page.config().modal.close_control(), None);
        assert_eq!(page.config().reveal.preview(), None);
    }

    #[test]
    fn stub_rejects_invalid_config() {
        assert!(DreamerPage::new(Some(r#"{ "reveal": { "threshold": 2 } }"#.to_owned())).is_err());
    }
}
