//! [`Host`](portal_ui::Host) implementation over `web-sys`
//!
//! Listener and timer closures are owned by a [`Callbacks`] registry. A
//! closure that stops being needed while JavaScript may still be running it
//! (a timer clearing itself, a listener removing its own element) is parked
//! and only dropped the next time a callback is entered from the event loop.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::timers::callback::{Interval, Timeout};
use portal_ui::dom::{LinkTarget, Listener, Location};
use portal_ui::{Dom, DomEvent, KeyValueStore, Scheduler, TimerId, UiError};
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlAnchorElement, HtmlDocument, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, KeyboardEvent, Window,
};

use crate::storage;
use crate::wasm_utils::EventListener;

enum ActiveTimer {
    Timeout(Timeout),
    Interval(Interval),
}

impl ActiveTimer {
    fn cancel(self) -> Closure<dyn FnMut()> {
        match self {
            Self::Timeout(timeout) => timeout.cancel(),
            Self::Interval(interval) => interval.cancel(),
        }
    }
}

#[derive(Default)]
struct Callbacks {
    /// Nesting of callbacks currently running
    depth: Cell<u32>,
    next_timer: Cell<u32>,
    timers: RefCell<HashMap<TimerId, ActiveTimer>>,
    listeners: RefCell<Vec<EventListener>>,
    parked_closures: RefCell<Vec<Closure<dyn FnMut()>>>,
    parked_listeners: RefCell<Vec<EventListener>>,
}

impl Callbacks {
    /// Run `f` as a callback entered from the event loop.
    fn enter(&self, f: impl FnOnce()) {
        if self.depth.get() == 0 {
            self.parked_closures.borrow_mut().clear();
            self.parked_listeners.borrow_mut().clear();
        }
        self.depth.set(self.depth.get() + 1);
        f();
        self.depth.set(self.depth.get() - 1);
    }

    fn allocate(&self) -> TimerId {
        let id = self.next_timer.get().wrapping_add(1);
        self.next_timer.set(id);
        TimerId(id)
    }

    fn retire_timer(&self, id: TimerId) {
        let timer = self.timers.borrow_mut().remove(&id);
        if let Some(timer) = timer {
            let closure = timer.cancel();
            self.parked_closures.borrow_mut().push(closure);
        }
    }

    /// Park the listeners registered on `root` and its descendants.
    fn retire_listeners_within(&self, root: &Element) {
        let (retired, kept): (Vec<_>, Vec<_>) = self
            .listeners
            .borrow_mut()
            .drain(..)
            .partition(|listener| listener.is_within(root));
        *self.listeners.borrow_mut() = kept;
        if !retired.is_empty() {
            debug!("Dropping {} listeners of a removed element", retired.len());
            self.parked_listeners.borrow_mut().extend(retired);
        }
    }
}

/// The live page
pub struct WebDom {
    window: Window,
    document: Document,
    root: Element,
    body: Element,
    callbacks: Rc<Callbacks>,
}

impl WebDom {
    pub fn new() -> Result<Self, UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Host("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| UiError::Host("no document".to_string()))?;
        let root = document
            .document_element()
            .ok_or_else(|| UiError::Host("no document element".to_string()))?;
        let body: Element = document
            .body()
            .ok_or_else(|| UiError::Host("no body".to_string()))?
            .into();
        Ok(Self {
            window,
            document,
            root,
            body,
            callbacks: Rc::new(Callbacks::default()),
        })
    }

    fn html(node: &Element) -> Option<&HtmlElement> {
        node.dyn_ref::<HtmlElement>()
    }

    fn register(&self, listener: EventListener) {
        self.callbacks.listeners.borrow_mut().push(listener);
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn document_element(&self) -> Element {
        self.root.clone()
    }

    fn body(&self) -> Element {
        self.body.clone()
    }

    fn query_all(&self, scope: Option<&Element>, selector: &str) -> Vec<Element> {
        let list = match scope {
            Some(scope) => scope.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        let Ok(list) = list else {
            debug!("Invalid selector {selector}");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn matches(&self, node: &Element, selector: &str) -> bool {
        node.matches(selector).unwrap_or(false)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document.create_element(tag).ok()
    }

    fn clone_deep(&self, node: &Element) -> Option<Element> {
        node.clone_node_with_deep(true)
            .ok()
            .and_then(|copy| copy.dyn_into::<Element>().ok())
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        parent.append_child(child).ok();
    }

    fn prepend_child(&self, parent: &Element, child: &Element) {
        parent.prepend_with_node_1(child).ok();
    }

    fn remove(&self, node: &Element) {
        node.remove();
        self.callbacks.retire_listeners_within(node);
    }

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn attr(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attr(&self, node: &Element, name: &str, value: &str) {
        node.set_attribute(name, value).ok();
    }

    fn remove_attr(&self, node: &Element, name: &str) {
        node.remove_attribute(name).ok();
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        node.class_list().add_1(class).ok();
    }

    fn remove_class(&self, node: &Element, class: &str) {
        node.class_list().remove_1(class).ok();
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = Self::html(node) else {
            return;
        };
        let style = element.style();
        if value.is_empty() {
            style.remove_property(property).ok();
        } else {
            style.set_property(property, value).ok();
        }
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        Self::html(node)?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn focus(&self, node: &Element) {
        if let Some(element) = Self::html(node) {
            element.focus().ok();
        }
    }

    fn select_text(&self, node: &Element) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.select();
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.select();
        }
    }

    fn copy_selection(&self) -> bool {
        self.document
            .dyn_ref::<HtmlDocument>()
            .and_then(|doc| doc.exec_command("copy").ok())
            .unwrap_or(false)
    }

    fn outer_height(&self, node: &Element) -> f64 {
        Self::html(node).map_or(0.0, |element| f64::from(element.offset_height()))
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top() + self.scroll_y()
    }

    fn viewport_width(&self) -> f64 {
        f64::from(self.root.client_width())
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn set_scroll_y(&self, y: f64) {
        let x = self.window.scroll_x().unwrap_or(0.0);
        self.window.scroll_to_with_x_and_y(x, y);
    }

    fn location(&self) -> Location {
        let location = self.window.location();
        Location {
            pathname: location.pathname().unwrap_or_default(),
            hostname: location.hostname().unwrap_or_default(),
        }
    }

    fn link_target(&self, anchor: &Element) -> Option<LinkTarget> {
        let anchor = anchor.dyn_ref::<HtmlAnchorElement>()?;
        Some(LinkTarget {
            location: Location {
                pathname: anchor.pathname(),
                hostname: anchor.hostname(),
            },
            hash: anchor.hash(),
        })
    }

    fn listen(&self, node: &Element, event: &str, listener: Listener<Element>) {
        let callbacks = Rc::downgrade(&self.callbacks);
        let handler = move |event: Event| {
            let target: Option<Element> = event.target().and_then(|t| t.dyn_into().ok());
            let dom_event = DomEvent::new(target);
            let dom_event = match event.dyn_ref::<KeyboardEvent>() {
                Some(key) => dom_event.with_key_code(key.key_code()),
                None => dom_event,
            };
            run_callback(&callbacks, || listener(&dom_event));
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        };
        self.register(EventListener::new(node, event, handler));
    }

    fn listen_window(&self, event: &str, listener: Rc<dyn Fn()>) {
        let callbacks = Rc::downgrade(&self.callbacks);
        let handler = move |_event: Event| run_callback(&callbacks, || listener());
        self.register(EventListener::new(&self.window, event, handler));
    }
}

fn run_callback(callbacks: &Weak<Callbacks>, f: impl FnOnce()) {
    match callbacks.upgrade() {
        Some(callbacks) => callbacks.enter(f),
        None => f(),
    }
}

impl Scheduler for WebDom {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.callbacks.allocate();
        let weak = Rc::downgrade(&self.callbacks);
        let timeout = Timeout::new(delay_ms, move || {
            run_callback(&weak, callback);
            if let Some(callbacks) = weak.upgrade() {
                callbacks.retire_timer(id);
            }
        });
        self.callbacks
            .timers
            .borrow_mut()
            .insert(id, ActiveTimer::Timeout(timeout));
        id
    }

    fn set_interval(&self, period_ms: u32, callback: Rc<dyn Fn()>) -> TimerId {
        let id = self.callbacks.allocate();
        let weak = Rc::downgrade(&self.callbacks);
        let interval = Interval::new(period_ms, move || run_callback(&weak, || callback()));
        self.callbacks
            .timers
            .borrow_mut()
            .insert(id, ActiveTimer::Interval(interval));
        id
    }

    fn clear_timer(&self, id: TimerId) {
        self.callbacks.retire_timer(id);
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map_or_else(js_sys::Date::now, |performance| performance.now())
    }
}

impl KeyValueStore for WebDom {
    fn get(&self, key: &str) -> Option<String> {
        storage::get_string(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), UiError> {
        storage::set_string(key, value)
    }
}
