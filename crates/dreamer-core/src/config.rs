#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Element ids, selectors and tuning constants live here rather than in the
//! bindings. Every field defaults to the value the live site ships with, and
//! every struct is `#[serde(default)]`, so the host may pass a partial JSON
//! object that only overrides what it names:
//!
//! ```
//! use dreamer_core::config::PageConfig;
//!
//! let cfg = PageConfig::from_json(r#"{ "nav": { "threshold_px": 80 } }"#).unwrap();
//! assert_eq!(cfg.nav.threshold_px, 80.0);
//! assert_eq!(cfg.modal.overlay_id, "video-modal");
//! ```

use core::time::Duration;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::error::ConfigError;

/// Top-level configuration for a mounted page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub scene: SceneConfig,
    pub nav: NavConfig,
    pub reveal: RevealConfig,
    pub modal: ModalConfig,
    pub anchors: AnchorConfig,
    pub log: LogConfig,
}

impl PageConfig {
    /// Parse and validate a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the bindings cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("scene.canvas_id", &self.scene.canvas_id)?;
        require_non_empty("scene.scene_url", &self.scene.scene_url)?;
        require_non_empty("scene.scroll_variable", &self.scene.scroll_variable)?;
        require_non_empty("nav.nav_id", &self.nav.nav_id)?;
        require_non_empty("reveal.item_selector", &self.reveal.item_selector)?;
        require_non_empty("modal.overlay_id", &self.modal.overlay_id)?;
        require_non_empty("modal.video_selector", &self.modal.video_selector)?;
        require_non_empty("modal.source_selector", &self.modal.source_selector)?;
        require_non_empty("modal.active_class", &self.modal.active_class)?;
        require_non_empty("anchors.selector", &self.anchors.selector)?;

        if !self.nav.threshold_px.is_finite() || self.nav.threshold_px < 0.0 {
            return Err(ConfigError::invalid(
                "nav.threshold_px",
                "must be a finite, non-negative pixel offset",
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::invalid(
                "reveal.threshold",
                "must be within 0..=1",
            ));
        }
        if !self.reveal.offset_px.is_finite() {
            return Err(ConfigError::invalid("reveal.offset_px", "must be finite"));
        }
        self.log.level_filter()?;
        Ok(())
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn optional_selector(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// External 3D scene bootstrap.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Canvas handed to the renderer. Default: `canvas3d`.
    pub canvas_id: String,
    /// Placeholder hidden once the scene has loaded. Default: `loader`.
    pub loader_id: String,
    /// Remote scene descriptor.
    pub scene_url: String,
    /// Scene variable receiving the 0..1 scroll progress. Default: `scrollProgress`.
    pub scroll_variable: String,
    /// Scene objects that act as call-to-action buttons. Default: `Button`, `CTA`.
    pub cta_objects: Vec<String>,
    /// Element id scrolled into view when a CTA object is pressed. Default: `contact`.
    pub cta_target_id: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas3d".to_owned(),
            loader_id: "loader".to_owned(),
            scene_url: "https://prod.spline.design/9aPp2nOUkM3wqAUO/scene.splinecode".to_owned(),
            scroll_variable: "scrollProgress".to_owned(),
            cta_objects: vec!["Button".to_owned(), "CTA".to_owned()],
            cta_target_id: "contact".to_owned(),
        }
    }
}

/// Navigation bar background toggle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Default: `nav`.
    pub nav_id: String,
    /// Scroll offset past which the bar turns opaque. Default: 40px.
    pub threshold_px: f64,
    /// Default: `rgba(0,0,0,.6)`.
    pub top_background: String,
    /// Default: `rgba(0,0,0,.85)`.
    pub scrolled_background: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            nav_id: "nav".to_owned(),
            threshold_px: 40.0,
            top_background: "rgba(0,0,0,.6)".to_owned(),
            scrolled_background: "rgba(0,0,0,.85)".to_owned(),
        }
    }
}

/// Fade-in of portfolio items as they scroll into view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Default: `.portfolio__item`.
    pub item_selector: String,
    /// Visible fraction that counts as "in view". Default: 0.1.
    pub threshold: f64,
    /// Vertical offset items rise from. Default: 20px.
    pub offset_px: f64,
    /// Length of the opacity/transform transition. Default: 600ms.
    #[serde(with = "millis")]
    pub duration: Duration,
    /// Extra delay per item index. Default: 100ms.
    #[serde(with = "millis")]
    pub stagger: Duration,
    /// Hover preview video inside an item. Empty disables previews.
    /// Default: `video`.
    pub preview_selector: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            item_selector: ".portfolio__item".to_owned(),
            threshold: 0.1,
            offset_px: 20.0,
            duration: Duration::from_millis(600),
            stagger: Duration::from_millis(100),
            preview_selector: "video".to_owned(),
        }
    }
}

impl RevealConfig {
    /// Preview selector, `None` when previews are disabled.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        optional_selector(&self.preview_selector)
    }
}

/// Element contracts for the video modal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModalConfig {
    /// Overlay container; also the backdrop. Default: `video-modal`.
    pub overlay_id: String,
    /// Playback surface inside the overlay. Default: `video`.
    pub video_selector: String,
    /// Optional close control; empty means there is none.
    /// Default: `.video-modal__close`.
    pub close_selector: String,
    /// Media descriptor inside each trigger. Default: `video source`.
    pub source_selector: String,
    /// Class toggled on the overlay while open. Default: `active`.
    pub active_class: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            overlay_id: "video-modal".to_owned(),
            video_selector: "video".to_owned(),
            close_selector: ".video-modal__close".to_owned(),
            source_selector: "video source".to_owned(),
            active_class: "active".to_owned(),
        }
    }
}

impl ModalConfig {
    /// Close control selector, `None` when the markup has no close control.
    #[must_use]
    pub fn close_control(&self) -> Option<&str> {
        optional_selector(&self.close_selector)
    }
}

/// Same-page link interception.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorConfig {
    /// Default: `a[href^="#"]`.
    pub selector: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            selector: r##"a[href^="#"]"##.to_owned(),
        }
    }
}

/// Console logging.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`. Default: `info`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

impl LogConfig {
    /// Parsed level filter.
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::invalid("log.level", format!("unknown level `{}`", self.level)))
    }
}

mod millis {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        u64::deserialize(de).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = PageConfig::from_json("{}").unwrap();
        assert_eq!(cfg, PageConfig::default());
        assert_eq!(cfg.reveal.stagger, Duration::from_millis(100));
        assert_eq!(cfg.scene.cta_objects, vec!["Button", "CTA"]);
    }

    #[test]
    fn partial_override_keeps_sibling_defaults() {
        let cfg = PageConfig::from_json(
            r#"{ "reveal": { "stagger": 250 }, "modal": { "active_class": "open" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.reveal.stagger, Duration::from_millis(250));
        assert_eq!(cfg.reveal.duration, Duration::from_millis(600));
        assert_eq!(cfg.modal.active_class, "open");
        assert_eq!(cfg.modal.overlay_id, "video-modal");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = PageConfig::from_json(r#"{ "modal": { "overlay": "x" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_threshold_is_invalid() {
        let err = PageConfig::from_json(r#"{ "reveal": { "threshold": 1.5 } }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::invalid("reveal.threshold", "must be within 0..=1")
        );
    }

    #[test]
    fn negative_nav_threshold_is_invalid() {
        let err = PageConfig::from_json(r#"{ "nav": { "threshold_px": -1 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "nav.threshold_px",
                ..
            }
        ));
    }

    #[test]
    fn blank_overlay_id_is_invalid() {
        let err = PageConfig::from_json(r#"{ "modal": { "overlay_id": "  " } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "modal.overlay_id",
                ..
            }
        ));
    }

    #[test]
    fn blank_optional_selectors_mean_absent() {
        let cfg = PageConfig::from_json(
            r#"{ "modal": { "close_selector": "" }, "reveal": { "preview_selector": " " } }"#,
        )
        .unwrap();
        assert_eq!(cfg.modal.close_control(), None);
        assert_eq!(cfg.reveal.preview(), None);

        let defaults = PageConfig::default();
        assert_eq!(defaults.modal.close_control(), Some(".video-modal__close"));
        assert_eq!(defaults.reveal.preview(), Some("video"));
    }

    #[test]
    fn log_level_parses_and_rejects_garbage() {
        let cfg = PageConfig::from_json(r#"{ "log": { "level": "debug" } }"#).unwrap();
        assert_eq!(cfg.log.level_filter().unwrap(), LevelFilter::DEBUG);

        let err = PageConfig::from_json(r#"{ "log": { "level": "loud" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "log.level", .. }));
    }
}
