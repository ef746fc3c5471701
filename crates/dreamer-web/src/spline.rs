#![forbid(unsafe_code)]

//! Bridge to the Spline 3D runtime.
//!
//! The runtime is an ES module loaded straight from the CDN; the shim below
//! is the only JS this crate ships. Everything it returns is treated as an
//! opaque handle.

use dreamer_core::{EventKind, SceneError, SceneRenderer, Subscription};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::dom::js_error_string;

#[wasm_bindgen(inline_js = r#"
import { Application } from 'https://esm.sh/@splinetool/runtime';

export function createScene(canvas) {
  return new Application(canvas);
}

export function loadScene(app, url) {
  return app.load(url);
}

export function setSceneVariable(app, name, value) {
  app.setVariable(name, value);
}

export function onObjectDown(app, callback) {
  const handler = (e) => callback(e && e.target && e.target.name ? String(e.target.name) : '');
  app.addEventListener('mouseDown', handler);
  return handler;
}

export function offObjectDown(app, handler) {
  app.removeEventListener('mouseDown', handler);
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = createScene, catch)]
    fn create_scene(canvas: &HtmlCanvasElement) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = loadScene, catch)]
    fn load_scene(app: &JsValue, url: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_name = setSceneVariable, catch)]
    fn set_scene_variable(app: &JsValue, name: &str, value: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = onObjectDown)]
    fn on_object_down(app: &JsValue, callback: &Closure<dyn FnMut(String)>) -> JsValue;

    #[wasm_bindgen(js_name = offObjectDown)]
    fn off_object_down(app: &JsValue, handler: &JsValue);
}

/// A Spline `Application` bound to a canvas.
pub struct SplineScene {
    app: JsValue,
}

impl SplineScene {
    pub fn create(canvas: &HtmlCanvasElement) -> Result<Self, SceneError> {
        create_scene(canvas)
            .map(|app| Self { app })
            .map_err(|err| SceneError::Load(js_error_string(&err)))
    }

    /// Start fetching `url`. The promise settles when the scene is ready.
    pub fn load(&self, url: &str) -> Result<js_sys::Promise, SceneError> {
        load_scene(&self.app, url).map_err(|err| SceneError::Load(js_error_string(&err)))
    }

    /// Route presses on scene objects to `handler` with the object's name.
    pub fn subscribe_object_down(
        &self,
        handler: impl FnMut(String) + 'static,
    ) -> ObjectDownSubscription {
        let callback = Closure::<dyn FnMut(String)>::new(handler);
        let js_handler = on_object_down(&self.app, &callback);
        ObjectDownSubscription {
            app: self.app.clone(),
            js_handler: Some(js_handler),
            _callback: callback,
        }
    }
}

impl SceneRenderer for SplineScene {
    fn set_variable(&mut self, name: &str, value: f64) -> Result<(), SceneError> {
        set_scene_variable(&self.app, name, value)
            .map_err(|_| SceneError::UnknownVariable(name.to_owned()))
    }
}

/// Listener registered on the Spline application's event bus.
pub struct ObjectDownSubscription {
    app: JsValue,
    js_handler: Option<JsValue>,
    _callback: Closure<dyn FnMut(String)>,
}

impl Subscription for ObjectDownSubscription {
    fn kind(&self) -> EventKind {
        EventKind::SceneObjectDown
    }

    fn unsubscribe(&mut self) {
        if let Some(handler) = self.js_handler.take() {
            off_object_down(&self.app, &handler);
        }
    }
}
