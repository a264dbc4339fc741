//! Host surface the controllers run against
//!
//! [`Dom`] is a select-then-act facade over the page: every lookup returns an
//! `Option` or a `Vec`, so callers degrade to a no-op when the template lacks
//! an element. [`Scheduler`] and [`KeyValueStore`] cover timers and
//! `localStorage`. A type implementing all three is a [`Host`].
//!
//! Everything runs on the UI thread. Listeners and timer callbacks are
//! `'static` closures that hold `Weak` references back into their controller,
//! so the host never keeps a controller alive on its own.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::error::UiError;

/// Handle returned by [`Scheduler`] for cancelling a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u32);

/// Key code the table filter ignores
pub const KEY_TAB: u32 = 9;

/// An event delivered to a listener registered with [`Dom::listen`]
pub struct DomEvent<N> {
    /// Element the event was dispatched at
    pub target: Option<N>,
    /// `keyCode` for keyboard events
    pub key_code: Option<u32>,
    default_prevented: Cell<bool>,
}

impl<N> DomEvent<N> {
    pub fn new(target: Option<N>) -> Self {
        Self {
            target,
            key_code: None,
            default_prevented: Cell::new(false),
        }
    }

    pub fn with_key_code(mut self, key_code: u32) -> Self {
        self.key_code = Some(key_code);
        self
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Listener<N> = Rc<dyn Fn(&DomEvent<N>)>;

/// `pathname` and `hostname` of a URL
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub pathname: String,
    pub hostname: String,
}

/// Resolved destination of an anchor element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkTarget {
    pub location: Location,
    /// Fragment including the leading `#`, or empty
    pub hash: String,
}

pub trait Dom {
    type Node: Clone + PartialEq + Debug + 'static;

    /// The `<html>` element
    fn document_element(&self) -> Self::Node;
    fn body(&self) -> Self::Node;

    /// Elements under `scope` (or the whole document) matching a CSS selector,
    /// in document order.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;

    fn query(&self, scope: Option<&Self::Node>, selector: &str) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn matches(&self, node: &Self::Node, selector: &str) -> bool;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// `None` when the host refuses to create the element
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    /// Detached deep copy. Listeners are not copied.
    fn clone_deep(&self, node: &Self::Node) -> Option<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    /// Element children in order
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn prepend_child(&self, parent: &Self::Node, child: &Self::Node);
    /// Detach `node` from its parent. No-op when already detached.
    fn remove(&self, node: &Self::Node);

    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node> {
        let siblings = self.children(&self.parent(node)?);
        let pos = siblings.iter().position(|s| s == node)?;
        siblings.get(pos + 1).cloned()
    }

    fn prev_sibling(&self, node: &Self::Node) -> Option<Self::Node> {
        let siblings = self.children(&self.parent(node)?);
        let pos = siblings.iter().position(|s| s == node)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p).cloned())
    }

    /// `node` itself or its nearest ancestor matching `selector`
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node> {
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if self.matches(&n, selector) {
                return Some(n);
            }
            current = self.parent(&n);
        }
        None
    }

    /// Whether `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool {
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if &n == ancestor {
                return true;
            }
            current = self.parent(&n);
        }
        false
    }

    fn tag_name(&self, node: &Self::Node) -> String;
    /// Concatenated text of the node and its descendants
    fn text(&self, node: &Self::Node) -> String;
    /// Replace all content with a single text node
    fn set_text(&self, node: &Self::Node, text: &str);

    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attr(&self, node: &Self::Node, name: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Add every whitespace-separated class in `classes`
    fn add_classes(&self, node: &Self::Node, classes: &str) {
        for class in classes.split_whitespace() {
            self.add_class(node, class);
        }
    }

    fn remove_classes(&self, node: &Self::Node, classes: &str) {
        for class in classes.split_whitespace() {
            self.remove_class(node, class);
        }
    }

    fn toggle_class(&self, node: &Self::Node, class: &str) {
        if self.has_class(node, class) {
            self.remove_class(node, class);
        } else {
            self.add_class(node, class);
        }
    }

    /// Set an inline style property. An empty value removes it.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    fn set_visible(&self, node: &Self::Node, visible: bool) {
        self.set_style(node, "display", if visible { "" } else { "none" });
    }

    fn is_visible(&self, node: &Self::Node) -> bool {
        self.style(node, "display").as_deref() != Some("none")
    }

    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);

    fn is_disabled(&self, node: &Self::Node) -> bool {
        self.attr(node, "disabled").is_some()
    }

    fn set_disabled(&self, node: &Self::Node, disabled: bool) {
        if disabled {
            self.set_attr(node, "disabled", "");
        } else {
            self.remove_attr(node, "disabled");
        }
    }

    fn focus(&self, node: &Self::Node);
    /// Select the text of an input or textarea
    fn select_text(&self, node: &Self::Node);
    /// Copy the current selection to the system clipboard
    fn copy_selection(&self) -> bool;

    fn outer_height(&self, node: &Self::Node) -> f64;
    /// Distance from the top of the document
    fn offset_top(&self, node: &Self::Node) -> f64;
    fn viewport_width(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn set_scroll_y(&self, y: f64);

    fn location(&self) -> Location;
    /// Destination of an anchor, resolved against the page URL
    fn link_target(&self, anchor: &Self::Node) -> Option<LinkTarget>;

    fn listen(&self, node: &Self::Node, event: &str, listener: Listener<Self::Node>);
    /// Listen for `resize`, `load` or `scroll` on the window
    fn listen_window(&self, event: &str, listener: Rc<dyn Fn()>);
}

pub trait Scheduler {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId;
    fn set_interval(&self, period_ms: u32, callback: Rc<dyn Fn()>) -> TimerId;
    /// Cancel a timer. Unknown or already-fired ids are ignored.
    fn clear_timer(&self, id: TimerId);
    /// Monotonic milliseconds
    fn now_ms(&self) -> f64;
}

/// Opaque string storage that outlives the page
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), UiError>;
}

/// Everything a controller needs from its environment
pub trait Host: Dom + Scheduler + KeyValueStore + 'static {}

impl<T: Dom + Scheduler + KeyValueStore + 'static> Host for T {}

/// Node type of a host
pub type NodeOf<H> = <H as Dom>::Node;
