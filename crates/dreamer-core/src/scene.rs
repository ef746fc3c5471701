#![forbid(unsafe_code)]

//! Driver for the external 3D scene renderer.
//!
//! The renderer itself is opaque. This module decides what to do with its
//! load outcome, which scroll progress to push into it, and which object
//! presses act as call-to-action buttons. Renderer failures are logged and
//! never propagate.

use tracing::{info, trace, warn};

use crate::config::SceneConfig;
use crate::error::SceneError;

/// The writable side of a loaded scene.
pub trait SceneRenderer {
    /// Set a scene variable. Fails when the scene does not define `name`.
    fn set_variable(&mut self, name: &str, value: f64) -> Result<(), SceneError>;
}

/// What the host should do to the surrounding chrome after a load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneLoad {
    /// Hide the loader and fade the canvas in.
    Reveal,
    /// Leave the loader in place; the page works without the scene.
    KeepLoader,
}

/// Scene-side behaviour of the page.
#[derive(Debug, Clone)]
pub struct SceneDriver {
    scroll_variable: String,
    cta_objects: Vec<String>,
    cta_target_id: String,
    loaded: bool,
    missing_variable_reported: bool,
}

impl SceneDriver {
    #[must_use]
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            scroll_variable: config.scroll_variable.clone(),
            cta_objects: config.cta_objects.clone(),
            cta_target_id: config.cta_target_id.clone(),
            loaded: false,
            missing_variable_reported: false,
        }
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Record the outcome of the renderer's asynchronous load.
    pub fn on_load(&mut self, result: Result<(), SceneError>) -> SceneLoad {
        match result {
            Ok(()) => {
                self.loaded = true;
                info!("3D scene loaded");
                SceneLoad::Reveal
            }
            Err(err) => {
                warn!(error = %err, "3D scene failed to load");
                SceneLoad::KeepLoader
            }
        }
    }

    /// Push scroll progress into the scene.
    ///
    /// Dropped until the scene has loaded; the host pushes the current
    /// progress once on load. A scene export without the variable is
    /// reported once at `warn`, then only traced, so scrolling does not
    /// flood the console.
    pub fn on_scroll<R: SceneRenderer + ?Sized>(&mut self, progress: f64, renderer: &mut R) {
        if !self.loaded {
            return;
        }
        match renderer.set_variable(&self.scroll_variable, progress) {
            Ok(()) => {}
            Err(err) if self.missing_variable_reported => {
                trace!(error = %err, "scene scroll update skipped");
            }
            Err(err) => {
                self.missing_variable_reported = true;
                warn!(error = %err, "scene scroll update failed");
            }
        }
    }

    /// An object in the scene was pressed. Returns the element id to scroll
    /// to when the object is a call-to-action.
    #[must_use]
    pub fn on_object_down(&self, name: &str) -> Option<&str> {
        info!(object = name, "3D object clicked");
        self.cta_objects
            .iter()
            .any(|cta| cta == name)
            .then_some(self.cta_target_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::MemoryRenderer;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_outcome_decides_loader_visibility() {
        let mut driver = SceneDriver::new(&SceneConfig::default());
        assert_eq!(
            driver.on_load(Err(SceneError::Load("404".to_owned()))),
            SceneLoad::KeepLoader
        );
        assert!(!driver.is_loaded());
        assert_eq!(driver.on_load(Ok(())), SceneLoad::Reveal);
        assert!(driver.is_loaded());
    }

    #[test]
    fn scroll_progress_reaches_the_scene_variable() {
        let mut driver = SceneDriver::new(&SceneConfig::default());
        let mut renderer = MemoryRenderer::with_variables(["scrollProgress"]);
        let _ = driver.on_load(Ok(()));
        driver.on_scroll(0.25, &mut renderer);
        driver.on_scroll(0.5, &mut renderer);
        assert_eq!(
            renderer.writes(),
            &[
                ("scrollProgress".to_owned(), 0.25),
                ("scrollProgress".to_owned(), 0.5),
            ]
        );
    }

    #[test]
    fn missing_variable_is_swallowed() {
        let mut driver = SceneDriver::new(&SceneConfig::default());
        let mut renderer = MemoryRenderer::default();
        let _ = driver.on_load(Ok(()));
        driver.on_scroll(0.1, &mut renderer);
        driver.on_scroll(0.2, &mut renderer);
        assert!(driver.missing_variable_reported);
        assert!(renderer.writes().is_empty());
    }

    #[test]
    fn scroll_before_load_is_dropped() {
        let mut driver = SceneDriver::new(&SceneConfig::default());
        let mut renderer = MemoryRenderer::with_variables(["scrollProgress"]);
        driver.on_scroll(0.3, &mut renderer);
        assert!(renderer.writes().is_empty());
        assert!(!driver.missing_variable_reported);
    }

    #[test]
    fn only_cta_objects_request_a_scroll() {
        let driver = SceneDriver::new(&SceneConfig::default());
        assert_eq!(driver.on_object_down("Button"), Some("contact"));
        assert_eq!(driver.on_object_down("CTA"), Some("contact"));
        assert_eq!(driver.on_object_down("Sphere"), None);
        assert_eq!(driver.on_object_down(""), None);
    }
}
