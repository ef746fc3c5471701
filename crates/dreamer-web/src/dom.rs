#![forbid(unsafe_code)]

//! `web-sys` implementations of the core's host traits, plus small DOM helpers.

use std::rc::Rc;

use dreamer_core::reveal::StyleDecl;
use dreamer_core::{MediaSource, MediaSurface, Overlay, PlaybackRejected, PlaybackStart};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlElement, HtmlMediaElement, ScrollBehavior, ScrollIntoViewOptions};

/// An `HTMLMediaElement` driven as a [`MediaSurface`].
pub struct VideoElement {
    el: HtmlMediaElement,
}

impl VideoElement {
    /// `None` when `el` is not a media element.
    pub fn from_element(el: Element) -> Option<Self> {
        el.dyn_into::<HtmlMediaElement>().ok().map(|el| Self { el })
    }
}

impl MediaSurface for VideoElement {
    fn src(&self) -> String {
        // The attribute, not the `src` property: the property resolves to an
        // absolute URL and never reads back empty.
        self.el.get_attribute("src").unwrap_or_default()
    }

    fn set_src(&mut self, src: &str) {
        if src.is_empty() {
            // Dropping the attribute and reloading aborts any in-flight fetch.
            let _ = self.el.remove_attribute("src");
            self.el.load();
        } else {
            self.el.set_src(src);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.el.set_muted(muted);
    }

    fn play(&mut self) -> PlaybackStart {
        match self.el.play() {
            Ok(promise) => {
                // Settle the promise so a rejection is consumed here instead
                // of surfacing as an unhandled rejection.
                spawn_local(async move {
                    let _ = JsFuture::from(promise).await;
                });
                PlaybackStart::Pending
            }
            Err(err) => PlaybackStart::Rejected(PlaybackRejected(js_error_string(&err))),
        }
    }

    fn pause(&mut self) {
        let _ = self.el.pause();
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.el.set_current_time(seconds);
    }

    fn ended(&self) -> bool {
        self.el.ended()
    }
}

/// Overlay shown by toggling a class on its element.
pub struct ClassOverlay {
    el: Element,
    class: String,
}

impl ClassOverlay {
    pub fn new(el: Element, class: &str) -> Self {
        Self {
            el,
            class: class.to_owned(),
        }
    }
}

impl Overlay for ClassOverlay {
    fn set_visible(&mut self, visible: bool) {
        let classes = self.el.class_list();
        let _ = if visible {
            classes.add_1(&self.class)
        } else {
            classes.remove_1(&self.class)
        };
    }

    fn is_visible(&self) -> bool {
        self.el.class_list().contains(&self.class)
    }
}

/// A portfolio item acting as a modal trigger.
pub struct TriggerElement {
    el: Element,
    source_selector: Rc<str>,
}

impl TriggerElement {
    pub fn new(el: Element, source_selector: Rc<str>) -> Self {
        Self {
            el,
            source_selector,
        }
    }

    pub fn element(&self) -> &Element {
        &self.el
    }
}

impl MediaSource for TriggerElement {
    fn media_source(&self) -> Option<String> {
        self.el
            .query_selector(&self.source_selector)
            .ok()
            .flatten()
            .and_then(|source| source.get_attribute("src"))
    }
}

/// All elements matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Whether two handles refer to the same JS object.
pub fn same_object(a: &impl AsRef<JsValue>, b: &impl AsRef<JsValue>) -> bool {
    a.as_ref() == b.as_ref()
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

pub fn set_styles(el: &Element, decls: &[StyleDecl]) {
    for (property, value) in decls {
        set_style(el, property, value);
    }
}

pub fn smooth_scroll_to(el: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Best-effort human-readable form of a thrown JS value.
pub fn js_error_string(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{err:?}")
}
