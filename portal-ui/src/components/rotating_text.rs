//! Rotating hero text
//!
//! An element whose text is `"A, B, C"` shows one phrase at a time, each
//! wrapped in `<span class="animated {animation}">`, switching on a fixed
//! interval.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use portal_common::PhraseCycle;
use tracing::debug;

use crate::config::RotatingConfig;
use crate::dom::{Host, NodeOf, TimerId};

/// Class added to every rotating element
pub const ROTATING_CLASS: &str = "morphext";

/// Settings for one rotating element
#[derive(Clone)]
pub struct RotatingTextOptions {
    pub animation: String,
    pub separator: String,
    pub speed_ms: u32,
    /// Called with the shown index after every update
    pub on_complete: Option<Rc<dyn Fn(usize)>>,
}

impl Default for RotatingTextOptions {
    fn default() -> Self {
        Self {
            animation: "bounceIn".to_string(),
            separator: ",".to_string(),
            speed_ms: 2000,
            on_complete: None,
        }
    }
}

impl From<&RotatingConfig> for RotatingTextOptions {
    fn from(config: &RotatingConfig) -> Self {
        Self {
            animation: config.animation.clone(),
            separator: config.separator.clone(),
            speed_ms: config.speed_ms,
            on_complete: None,
        }
    }
}

impl RotatingTextOptions {
    pub fn on_complete(mut self, callback: impl Fn(usize) + 'static) -> Self {
        self.on_complete = Some(Rc::new(callback));
        self
    }
}

struct WidgetState<H: Host> {
    host: Rc<H>,
    element: NodeOf<H>,
    cycle: PhraseCycle,
    options: RotatingTextOptions,
    timer: Option<TimerId>,
}

pub struct RotatingText<H: Host> {
    state: Rc<RefCell<WidgetState<H>>>,
}

impl<H: Host> Clone for RotatingText<H> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<H: Host> RotatingText<H> {
    /// Read the phrases from `element`, show the first one and start rotating.
    /// `None` when the element already rotates.
    pub fn attach(host: Rc<H>, element: NodeOf<H>, options: RotatingTextOptions) -> Option<Self> {
        if host.has_class(&element, ROTATING_CLASS) {
            debug!("Element already rotates, not attaching again");
            return None;
        }
        host.add_class(&element, ROTATING_CLASS);
        let cycle = PhraseCycle::parse(&host.text(&element), &options.separator);
        debug!("Rotating text with {} phrases", cycle.len());
        let widget = Self {
            state: Rc::new(RefCell::new(WidgetState {
                host,
                element,
                cycle,
                options,
                timer: None,
            })),
        };
        widget.animate();
        widget.start();
        Some(widget)
    }

    fn from_weak(weak: &Weak<RefCell<WidgetState<H>>>) -> Option<Self> {
        weak.upgrade().map(|state| Self { state })
    }

    /// Show the next phrase.
    pub fn animate(&self) {
        let (callback, index) = {
            let mut state = self.state.borrow_mut();
            let Some(phrase) = state.cycle.advance().map(str::to_string) else {
                return;
            };
            let host = state.host.clone();
            let Some(span) = host.create_element("span") else {
                return;
            };
            host.add_class(&span, "animated");
            host.add_classes(&span, &state.options.animation);
            host.set_text(&span, &phrase);
            host.set_text(&state.element, "");
            host.append_child(&state.element, &span);
            (state.options.on_complete.clone(), state.cycle.index())
        };
        if let (Some(callback), Some(index)) = (callback, index) {
            callback(index);
        }
    }

    /// Start the interval, replacing one that is already running.
    pub fn start(&self) {
        self.stop();
        let weak = Rc::downgrade(&self.state);
        let mut state = self.state.borrow_mut();
        let id = state.host.set_interval(
            state.options.speed_ms,
            Rc::new(move || {
                if let Some(widget) = Self::from_weak(&weak) {
                    widget.animate();
                }
            }),
        );
        state.timer = Some(id);
    }

    pub fn stop(&self) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.timer.take() {
            state.host.clear_timer(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().timer.is_some()
    }

    pub fn current_phrase(&self) -> Option<String> {
        self.state.borrow().cycle.current().map(str::to_string)
    }

    pub fn element(&self) -> NodeOf<H> {
        self.state.borrow().element.clone()
    }
}

/// Rotating widgets on the page, at most one per element
pub struct RotatingTextRegistry<H: Host> {
    host: Rc<H>,
    widgets: Vec<RotatingText<H>>,
}

impl<H: Host> RotatingTextRegistry<H> {
    pub fn new(host: Rc<H>) -> Self {
        Self {
            host,
            widgets: Vec::new(),
        }
    }

    /// Attach a widget to every element matching `selector` that does not
    /// have one yet. Returns how many were attached.
    pub fn bind(&mut self, selector: &str, options: &RotatingTextOptions) -> usize {
        let mut attached = 0;
        for element in self.host.query_all(None, selector) {
            if self.get(&element).is_some() {
                continue;
            }
            if let Some(widget) = RotatingText::attach(self.host.clone(), element, options.clone()) {
                self.widgets.push(widget);
                attached += 1;
            }
        }
        attached
    }

    pub fn get(&self, element: &NodeOf<H>) -> Option<&RotatingText<H>> {
        self.widgets.iter().find(|w| w.element() == *element)
    }

    pub fn widgets(&self) -> &[RotatingText<H>] {
        &self.widgets
    }

    pub fn stop_all(&self) {
        for widget in &self.widgets {
            widget.stop();
        }
    }
}
