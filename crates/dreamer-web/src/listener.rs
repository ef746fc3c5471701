#![forbid(unsafe_code)]

//! DOM-backed [`Subscription`]s.
//!
//! Each type keeps its JS closure alive for as long as it is registered and
//! detaches it on `unsubscribe`, so dropping the page's `SubscriptionSet`
//! leaves no callback pointing at freed Rust state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dreamer_core::scroll::FrameThrottle;
use dreamer_core::{EventKind, Subscription};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, IntersectionObserver, Window};

fn as_function<T: WasmClosure + ?Sized>(closure: &Closure<T>) -> &js_sys::Function {
    closure.as_ref().unchecked_ref()
}

/// `addEventListener` registration.
pub struct DomListener {
    target: EventTarget,
    kind: EventKind,
    closure: Closure<dyn FnMut(Event)>,
    attached: bool,
}

impl DomListener {
    pub fn attach(
        target: &EventTarget,
        kind: EventKind,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind.as_dom_str(), as_function(&closure))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
            attached: true,
        })
    }
}

impl Subscription for DomListener {
    fn kind(&self) -> EventKind {
        self.kind
    }

    fn unsubscribe(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind.as_dom_str(), as_function(&self.closure));
    }
}

/// An `IntersectionObserver` and the callback it invokes.
pub struct ObserverSubscription {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    connected: bool,
}

impl ObserverSubscription {
    pub fn new(
        observer: IntersectionObserver,
        callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    ) -> Self {
        Self {
            observer,
            _callback: callback,
            connected: true,
        }
    }
}

impl Subscription for ObserverSubscription {
    fn kind(&self) -> EventKind {
        EventKind::Intersection
    }

    fn unsubscribe(&mut self) {
        if self.connected {
            self.connected = false;
            self.observer.disconnect();
        }
    }
}

/// Runs a callback on the next animation frame, at most once per frame.
pub struct AnimationFrame {
    window: Window,
    callback: Closure<dyn FnMut()>,
    throttle: Rc<RefCell<FrameThrottle>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl AnimationFrame {
    pub fn new(window: &Window, mut render: impl FnMut() + 'static) -> Rc<Self> {
        let throttle = Rc::new(RefCell::new(FrameThrottle::default()));
        let handle = Rc::new(Cell::new(None));
        let callback = {
            let throttle = Rc::clone(&throttle);
            let handle = Rc::clone(&handle);
            Closure::<dyn FnMut()>::new(move || {
                handle.set(None);
                render();
                throttle.borrow_mut().complete();
            })
        };
        Rc::new(Self {
            window: window.clone(),
            callback,
            throttle,
            handle,
        })
    }

    /// Schedule the callback unless a frame is already pending.
    pub fn request(&self) {
        if !self.throttle.borrow_mut().request() {
            return;
        }
        match self.window.request_animation_frame(as_function(&self.callback)) {
            Ok(id) => self.handle.set(Some(id)),
            Err(_) => self.throttle.borrow_mut().complete(),
        }
    }

    /// Drop a pending frame, if any.
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
            self.throttle.borrow_mut().complete();
        }
    }
}

/// Cancels a pending frame on teardown.
pub struct FrameSubscription(pub Rc<AnimationFrame>);

impl Subscription for FrameSubscription {
    fn kind(&self) -> EventKind {
        EventKind::AnimationFrame
    }

    fn unsubscribe(&mut self) {
        self.0.cancel();
    }
}
