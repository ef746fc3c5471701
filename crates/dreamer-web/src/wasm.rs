#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dreamer_core::anchor::{AnchorTarget, anchor_target};
use dreamer_core::config::{AnchorConfig, ModalConfig, NavConfig, RevealConfig, SceneConfig};
use dreamer_core::hover::HoverPreview;
use dreamer_core::reveal::{RevealAction, RevealStyle, RevealTracker};
use dreamer_core::scene::SceneLoad;
use dreamer_core::scroll::{NavBar, scroll_progress};
use dreamer_core::{
    DismissChannel, EventKind, MediaBinding, ModalController, OverlayHit, PageConfig, SceneDriver,
    SceneError, SubscriptionSet, TriggerRegistry,
};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, Event, HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use crate::console;
use crate::dom::{
    ClassOverlay, TriggerElement, VideoElement, js_error_string, query_all, same_object,
    set_style, set_styles, smooth_scroll_to,
};
use crate::listener::{AnimationFrame, DomListener, FrameSubscription, ObserverSubscription};
use crate::spline::SplineScene;

type WebModal = ModalController<TriggerElement, VideoElement, ClassOverlay>;

/// The enhanced page.
///
/// Constructing it mounts every behaviour onto the current document. Each
/// behaviour is optional: a missing element only disables the feature that
/// needs it. Call `destroy()` (or let JS free the handle) to detach all
/// listeners and observers.
#[wasm_bindgen]
pub struct DreamerPage {
    subscriptions: SubscriptionSet,
    modal: Option<Rc<RefCell<WebModal>>>,
}

#[wasm_bindgen]
impl DreamerPage {
    /// Mount onto `window.document`.
    ///
    /// `config` is an optional JSON object overriding any subset of the
    /// defaults. An invalid config is the only error thrown to JS.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<DreamerPage, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config {
            Some(json) => PageConfig::from_json(&json),
            None => Ok(PageConfig::default()),
        }
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
        console::init(config.log.level_filter().unwrap_or(LevelFilter::INFO));

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let mut page = Self {
            subscriptions: SubscriptionSet::new(),
            modal: None,
        };
        degrade("3D scene", page.mount_scene(&window, &document, &config.scene));
        degrade("nav bar", page.mount_nav(&window, &document, &config.nav));
        degrade("anchors", page.mount_anchors(&document, &config.anchors));
        degrade("portfolio", page.mount_portfolio(&document, &config.reveal));
        degrade(
            "video modal",
            page.mount_modal(&document, &config.modal, &config.reveal.item_selector),
        );

        info!(
            subscriptions = page.subscriptions.len(),
            modal = page.modal.is_some(),
            "page mounted"
        );
        Ok(page)
    }

    #[wasm_bindgen(js_name = isModalOpen)]
    pub fn is_modal_open(&self) -> bool {
        self.modal
            .as_ref()
            .is_some_and(|modal| modal.borrow().is_open())
    }

    /// Close the video modal from script.
    #[wasm_bindgen(js_name = closeModal)]
    pub fn close_modal(&self) {
        if let Some(modal) = &self.modal {
            modal.borrow_mut().close(DismissChannel::Host);
        }
    }

    /// Explicit teardown for JS callers. Detaches every listener and observer
    /// and releases the modal's media source.
    pub fn destroy(&mut self) {
        self.subscriptions.teardown();
        if let Some(modal) = self.modal.take() {
            modal.borrow_mut().close(DismissChannel::Host);
        }
    }
}

impl Drop for DreamerPage {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn degrade(feature: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!(feature, error = %js_error_string(&err), "feature unavailable");
    }
}

fn page_scroll_progress(window: &Window) -> f64 {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let document_height = window
        .document()
        .and_then(|d| d.body())
        .map_or(0.0, |body| f64::from(body.scroll_height()));
    scroll_progress(scroll_y, document_height, viewport)
}

impl DreamerPage {
    fn mount_scene(
        &mut self,
        window: &Window,
        document: &Document,
        config: &SceneConfig,
    ) -> Result<(), JsValue> {
        let Some(canvas) = document
            .get_element_by_id(&config.canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            debug!(canvas_id = %config.canvas_id, "no scene canvas, skipping 3D scene");
            return Ok(());
        };
        let loader = document.get_element_by_id(&config.loader_id);
        let driver = Rc::new(RefCell::new(SceneDriver::new(config)));

        let scene = match SplineScene::create(&canvas).and_then(|scene| {
            let promise = scene.load(&config.scene_url)?;
            Ok((scene, promise))
        }) {
            Ok((scene, promise)) => {
                let scene = Rc::new(RefCell::new(scene));
                let driver = Rc::clone(&driver);
                let scene_for_load = Rc::clone(&scene);
                let window = window.clone();
                spawn_local(async move {
                    let result = JsFuture::from(promise)
                        .await
                        .map(|_| ())
                        .map_err(|err| SceneError::Load(js_error_string(&err)));
                    let outcome = driver.borrow_mut().on_load(result);
                    if outcome == SceneLoad::Reveal {
                        if let Some(loader) = &loader {
                            set_style(loader, "display", "none");
                        }
                        set_style(&canvas, "opacity", "1");
                        let progress = page_scroll_progress(&window);
                        driver
                            .borrow_mut()
                            .on_scroll(progress, &mut *scene_for_load.borrow_mut());
                    }
                });
                scene
            }
            Err(err) => {
                let _ = driver.borrow_mut().on_load(Err(err));
                return Ok(());
            }
        };

        let on_scroll = {
            let window = window.clone();
            let scene = Rc::clone(&scene);
            let driver = Rc::clone(&driver);
            move |_: Event| {
                let progress = page_scroll_progress(&window);
                driver
                    .borrow_mut()
                    .on_scroll(progress, &mut *scene.borrow_mut());
            }
        };
        self.subscriptions
            .push(DomListener::attach(window, EventKind::Scroll, on_scroll)?);

        let on_object = {
            let document = document.clone();
            move |name: String| {
                let target_id = driver.borrow().on_object_down(&name).map(str::to_owned);
                if let Some(target) = target_id.and_then(|id| document.get_element_by_id(&id)) {
                    smooth_scroll_to(&target);
                }
            }
        };
        let subscription = scene.borrow().subscribe_object_down(on_object);
        self.subscriptions.push(subscription);
        Ok(())
    }

    fn mount_nav(
        &mut self,
        window: &Window,
        document: &Document,
        config: &NavConfig,
    ) -> Result<(), JsValue> {
        let Some(nav) = document.get_element_by_id(&config.nav_id) else {
            debug!(nav_id = %config.nav_id, "no nav bar");
            return Ok(());
        };
        let bar = NavBar::new(config);
        let frame = {
            let win = window.clone();
            AnimationFrame::new(window, move || {
                let scroll_y = win.scroll_y().unwrap_or(0.0);
                set_style(&nav, "background", bar.background(scroll_y));
            })
        };

        let on_scroll = {
            let frame = Rc::clone(&frame);
            move |_: Event| frame.request()
        };
        self.subscriptions
            .push(DomListener::attach(window, EventKind::Scroll, on_scroll)?);
        self.subscriptions.push(FrameSubscription(frame));
        Ok(())
    }

    fn mount_anchors(&mut self, document: &Document, config: &AnchorConfig) -> Result<(), JsValue> {
        for anchor in query_all(document, &config.selector)? {
            let on_click = {
                let document = document.clone();
                let anchor = anchor.clone();
                move |event: Event| {
                    let Some(href) = anchor.get_attribute("href") else {
                        return;
                    };
                    let AnchorTarget::Selector(selector) = anchor_target(&href) else {
                        return;
                    };
                    // An unparsable selector falls back to native navigation.
                    if let Ok(Some(target)) = document.query_selector(selector) {
                        event.prevent_default();
                        smooth_scroll_to(&target);
                    }
                }
            };
            self.subscriptions
                .push(DomListener::attach(&anchor, EventKind::Click, on_click)?);
        }
        Ok(())
    }

    fn mount_portfolio(&mut self, document: &Document, config: &RevealConfig) -> Result<(), JsValue> {
        let items = Rc::new(query_all(document, &config.item_selector)?);
        if items.is_empty() {
            return Ok(());
        }
        let style = RevealStyle::new(config);

        let callback = {
            let items = Rc::clone(&items);
            let revealed = style.revealed();
            let mut tracker = RevealTracker::new();
            Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let target = entry.target();
                        let Some(index) = items.iter().position(|el| same_object(el, &target))
                        else {
                            continue;
                        };
                        if tracker.report(index, entry.is_intersecting()) == RevealAction::Reveal {
                            set_styles(&target, &revealed);
                            observer.unobserve(&target);
                        }
                    }
                },
            )
        };
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config.threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        // Registered before any item is observed so the callback outlives
        // every observation, whatever happens to the previews below.
        self.subscriptions
            .push(ObserverSubscription::new(observer.clone(), callback));

        for (index, item) in items.iter().enumerate() {
            set_styles(item, &style.initial(index));
            observer.observe(item);
            if let Some(selector) = config.preview() {
                degrade("hover preview", self.mount_preview(item, selector));
            }
        }
        Ok(())
    }

    fn mount_preview(&mut self, item: &Element, selector: &str) -> Result<(), JsValue> {
        let Some(video) = item
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(VideoElement::from_element)
        else {
            return Ok(());
        };
        let video = Rc::new(RefCell::new(video));
        HoverPreview::mount(&mut *video.borrow_mut());

        let on_enter = {
            let video = Rc::clone(&video);
            move |_: Event| HoverPreview::enter(&mut *video.borrow_mut())
        };
        let on_leave = move |_: Event| HoverPreview::leave(&mut *video.borrow_mut());
        self.subscriptions
            .push(DomListener::attach(item, EventKind::MouseEnter, on_enter)?);
        self.subscriptions
            .push(DomListener::attach(item, EventKind::MouseLeave, on_leave)?);
        Ok(())
    }

    fn mount_modal(
        &mut self,
        document: &Document,
        config: &ModalConfig,
        trigger_selector: &str,
    ) -> Result<(), JsValue> {
        let Some(overlay) = document.get_element_by_id(&config.overlay_id) else {
            debug!(overlay_id = %config.overlay_id, "no video modal in markup");
            return Ok(());
        };
        let Some(video) = overlay
            .query_selector(&config.video_selector)
            .ok()
            .flatten()
            .and_then(VideoElement::from_element)
        else {
            warn!(overlay_id = %config.overlay_id, "video modal has no playback surface");
            return Ok(());
        };

        let source_selector: Rc<str> = Rc::from(config.source_selector.as_str());
        let registry = TriggerRegistry::snapshot(
            query_all(document, trigger_selector)?
                .into_iter()
                .map(|el| TriggerElement::new(el, Rc::clone(&source_selector))),
        );
        let trigger_elements: Vec<_> = registry
            .iter()
            .map(|(id, trigger)| (id, trigger.element().clone()))
            .collect();
        let modal = Rc::new(RefCell::new(ModalController::new(
            registry,
            MediaBinding::new(video),
            ClassOverlay::new(overlay.clone(), &config.active_class),
        )));
        // Host-side close and the always-present dismissal channels come
        // first; nothing after this point may leave an open modal unclosable.
        self.modal = Some(Rc::clone(&modal));

        let on_backdrop = {
            let modal = Rc::clone(&modal);
            let overlay = overlay.clone();
            move |event: Event| {
                let hit = match event.target() {
                    Some(target) if same_object(&target, &overlay) => OverlayHit::Backdrop,
                    _ => OverlayHit::Content,
                };
                modal.borrow_mut().on_overlay_click(hit);
            }
        };
        self.subscriptions
            .push(DomListener::attach(&overlay, EventKind::Click, on_backdrop)?);

        let on_key = {
            let modal = Rc::clone(&modal);
            move |event: Event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                    modal.borrow_mut().on_key(&key);
                }
            }
        };
        self.subscriptions
            .push(DomListener::attach(document, EventKind::KeyDown, on_key)?);

        let close = config
            .close_control()
            .and_then(|selector| document.query_selector(selector).ok().flatten());
        match close {
            Some(close) => {
                let modal = Rc::clone(&modal);
                let on_click = move |_: Event| {
                    modal.borrow_mut().on_close_control();
                };
                self.subscriptions
                    .push(DomListener::attach(&close, EventKind::Click, on_click)?);
            }
            None => debug!(selector = %config.close_selector, "no close control"),
        }

        for (id, el) in trigger_elements {
            let modal = Rc::clone(&modal);
            let on_click = move |_: Event| {
                modal.borrow_mut().activate(id);
            };
            self.subscriptions
                .push(DomListener::attach(&el, EventKind::Click, on_click)?);
        }
        Ok(())
    }
}
