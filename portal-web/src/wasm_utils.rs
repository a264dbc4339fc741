//! Browser event listeners tied to Rust ownership
//!
//! A listener is attached when [`EventListener`] is created and removed when
//! it is dropped, so the closure lives exactly as long as the registration.

use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, Node};

pub struct EventListener {
    target: EventTarget,
    /// Set when the target is an element, for pruning listeners on removal
    element: Option<Element>,
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event_name: &str,
        callback: impl FnMut(Event) + 'static,
    ) -> Self {
        let callback: Closure<dyn FnMut(Event)> = Closure::wrap(Box::new(callback));

        target
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
            .ok();

        Self {
            target: target.clone(),
            element: target.dyn_ref::<Element>().cloned(),
            event_name: event_name.to_string(),
            callback,
        }
    }

    /// Whether the listener sits on `root` or one of its descendants
    pub fn is_within(&self, root: &Element) -> bool {
        self.element.as_ref().is_some_and(|element| {
            let node: &Node = element;
            root.contains(Some(node))
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}
