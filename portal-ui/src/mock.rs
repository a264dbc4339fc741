//! In-memory page for driving controllers in tests
//!
//! `MockPage` implements [`Host`](crate::dom::Host) with an element arena, a
//! small CSS selector engine, a manual clock and synthetic event dispatch.
//! Markup is built with [`el`]:
//!
//! ```ignore
//! let page = MockPage::new();
//! let nav = page.mount(&page.body(), el("ul.nav").child(el("li").text("Home")));
//! ```
//!
//! Supported selectors: `tag`, `*`, `#id`, `.class`, `[attr]`, `[attr=v]`,
//! `[attr*=v]`, `:not(compound)`, descendant and `>` combinators, and
//! comma-separated lists.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::{
    Dom, DomEvent, KeyValueStore, LinkTarget, Listener, Location, Scheduler, TimerId,
};
use crate::error::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    text: String,
    value: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    outer_height: f64,
    offset_top: f64,
}

struct PageState {
    nodes: Vec<Element>,
    root: NodeId,
    body: NodeId,
    viewport_width: f64,
    scroll_y: f64,
    location: Location,
    focused: Option<NodeId>,
    selected: Option<NodeId>,
    clipboard_available: bool,
    clipboard: Vec<String>,
}

enum TimerCallback {
    Once(Box<dyn FnOnce()>),
    Repeat(Rc<dyn Fn()>),
}

struct Timer {
    id: TimerId,
    due: f64,
    period: f64,
    callback: TimerCallback,
}

#[derive(Default)]
struct TimerQueue {
    next_id: u32,
    now: f64,
    timers: Vec<Timer>,
}

pub struct MockPage {
    state: RefCell<PageState>,
    listeners: RefCell<Vec<(NodeId, String, Listener<NodeId>)>>,
    window_listeners: RefCell<Vec<(String, Rc<dyn Fn()>)>>,
    timers: RefCell<TimerQueue>,
    storage: RefCell<HashMap<String, String>>,
}

impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPage {
    /// Empty `<html><body></body></html>` at `https://portal.test/`, 1280px wide.
    pub fn new() -> Self {
        let root = Element {
            tag: "html".into(),
            children: vec![NodeId(1)],
            ..Default::default()
        };
        let body = Element {
            tag: "body".into(),
            parent: Some(NodeId(0)),
            ..Default::default()
        };
        Self {
            state: RefCell::new(PageState {
                nodes: vec![root, body],
                root: NodeId(0),
                body: NodeId(1),
                viewport_width: 1280.0,
                scroll_y: 0.0,
                location: Location {
                    pathname: "/".into(),
                    hostname: "portal.test".into(),
                },
                focused: None,
                selected: None,
                clipboard_available: true,
                clipboard: Vec::new(),
            }),
            listeners: RefCell::new(Vec::new()),
            window_listeners: RefCell::new(Vec::new()),
            timers: RefCell::new(TimerQueue::default()),
            storage: RefCell::new(HashMap::new()),
        }
    }

    // Page setup

    /// Build `markup` and append it to `parent`.
    pub fn mount(&self, parent: &NodeId, markup: Markup) -> NodeId {
        let node = self.build(markup);
        self.append_child(parent, &node);
        node
    }

    fn build(&self, markup: Markup) -> NodeId {
        let compound = parse_compound_str(&markup.spec);
        let node = self.alloc(compound.tag.as_deref().unwrap_or("div"));
        if let Some(id) = &compound.id {
            self.set_attr(&node, "id", id);
        }
        if !compound.classes.is_empty() {
            self.set_attr(&node, "class", &compound.classes.join(" "));
        }
        for test in &compound.attrs {
            let value = match &test.op {
                AttrOp::Exists => "",
                AttrOp::Equals(v) | AttrOp::Contains(v) => v.as_str(),
            };
            self.set_attr(&node, &test.name, value);
        }
        for (name, value) in &markup.attrs {
            self.set_attr(&node, name, value);
        }
        if let Some(text) = &markup.text {
            self.state.borrow_mut().nodes[node.0].text = text.clone();
        }
        for child in markup.children {
            let child = self.build(child);
            self.append_child(&node, &child);
        }
        node
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.state.borrow_mut().viewport_width = width;
    }

    pub fn set_location(&self, pathname: &str, hostname: &str) {
        self.state.borrow_mut().location = Location {
            pathname: pathname.into(),
            hostname: hostname.into(),
        };
    }

    pub fn set_geometry(&self, node: &NodeId, offset_top: f64, outer_height: f64) {
        let mut state = self.state.borrow_mut();
        let el = &mut state.nodes[node.0];
        el.offset_top = offset_top;
        el.outer_height = outer_height;
    }

    pub fn set_clipboard_available(&self, available: bool) {
        self.state.borrow_mut().clipboard_available = available;
    }

    // Inspection

    pub fn count(&self, selector: &str) -> usize {
        self.query_all(None, selector).len()
    }

    /// Text of every element matching `selector`, in document order
    pub fn texts(&self, selector: &str) -> Vec<String> {
        self.query_all(None, selector)
            .iter()
            .map(|n| self.text(n))
            .collect()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.state.borrow().focused
    }

    pub fn clipboard(&self) -> Vec<String> {
        self.state.borrow().clipboard.clone()
    }

    pub fn is_attached(&self, node: &NodeId) -> bool {
        let root = self.state.borrow().root;
        self.contains(&root, node)
    }

    pub fn listener_count(&self, node: &NodeId, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(n, e, _)| n == node && e == event)
            .count()
    }

    // Events

    /// Dispatch `event` at `node`, bubbling to its ancestors.
    /// Returns whether a listener prevented the default action.
    pub fn dispatch(&self, node: &NodeId, event: &str, key_code: Option<u32>) -> bool {
        let mut dom_event = DomEvent::new(Some(*node));
        if let Some(code) = key_code {
            dom_event = dom_event.with_key_code(code);
        }
        let mut current = Some(*node);
        while let Some(n) = current {
            let matching: Vec<Listener<NodeId>> = self
                .listeners
                .borrow()
                .iter()
                .filter(|(ln, le, _)| *ln == n && le == event)
                .map(|(_, _, l)| l.clone())
                .collect();
            for listener in matching {
                listener(&dom_event);
            }
            current = self.parent(&n);
        }
        dom_event.default_prevented()
    }

    pub fn click(&self, node: &NodeId) -> bool {
        self.dispatch(node, "click", None)
    }

    /// Type `value` into an input and fire `keyup` with `key_code`.
    pub fn type_into(&self, node: &NodeId, value: &str, key_code: u32) -> bool {
        self.set_value(node, value);
        self.dispatch(node, "keyup", Some(key_code))
    }

    pub fn fire_window(&self, event: &str) {
        let matching: Vec<Rc<dyn Fn()>> = self
            .window_listeners
            .borrow()
            .iter()
            .filter(|(e, _)| e == event)
            .map(|(_, l)| l.clone())
            .collect();
        for listener in matching {
            listener();
        }
    }

    /// Resize the viewport and fire `resize`.
    pub fn resize(&self, width: f64) {
        self.set_viewport_width(width);
        self.fire_window("resize");
    }

    /// Scroll and fire `scroll`.
    pub fn scroll_to(&self, y: f64) {
        self.set_scroll_y(y);
        self.fire_window("scroll");
    }

    // Clock

    /// Move the clock forward, running due timers in order.
    pub fn advance(&self, ms: f64) {
        let target = self.timers.borrow().now + ms;
        loop {
            let next = {
                let mut queue = self.timers.borrow_mut();
                let Some(pos) = queue
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
                    .map(|(i, _)| i)
                else {
                    break;
                };
                queue.now = queue.timers[pos].due;
                let period = queue.timers[pos].period;
                let repeat = match &queue.timers[pos].callback {
                    TimerCallback::Repeat(cb) => Some(cb.clone()),
                    TimerCallback::Once(_) => None,
                };
                match repeat {
                    Some(cb) => {
                        queue.timers[pos].due += period.max(1.0);
                        TimerCallback::Repeat(cb)
                    }
                    None => queue.timers.remove(pos).callback,
                }
            };
            match next {
                TimerCallback::Once(cb) => cb(),
                TimerCallback::Repeat(cb) => cb(),
            }
        }
        self.timers.borrow_mut().now = target;
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().timers.len()
    }

    // Internals

    fn copy_tree(&self, node: &NodeId) -> NodeId {
        let (mut copy, children) = {
            let state = self.state.borrow();
            let el = state.nodes[node.0].clone();
            let children = el.children.clone();
            (el, children)
        };
        copy.parent = None;
        copy.children = Vec::new();
        let id = {
            let mut state = self.state.borrow_mut();
            state.nodes.push(copy);
            NodeId(state.nodes.len() - 1)
        };
        for child in children {
            let child_copy = self.copy_tree(&child);
            self.append_child(&id, &child_copy);
        }
        id
    }

    fn alloc(&self, tag: &str) -> NodeId {
        let mut state = self.state.borrow_mut();
        state.nodes.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        });
        NodeId(state.nodes.len() - 1)
    }

    fn classes(&self, node: &NodeId) -> Vec<String> {
        self.attr(node, "class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn detach(&self, node: &NodeId) {
        let mut state = self.state.borrow_mut();
        if let Some(parent) = state.nodes[node.0].parent.take() {
            state.nodes[parent.0].children.retain(|c| c != node);
        }
    }

    fn descendants(&self, scope: &NodeId, out: &mut Vec<NodeId>) {
        for child in self.children(scope) {
            out.push(child);
            self.descendants(&child, out);
        }
    }

    fn matches_compound(&self, node: &NodeId, compound: &Compound) -> bool {
        if let Some(tag) = &compound.tag {
            if self.tag_name(node) != *tag {
                return false;
            }
        }
        if let Some(id) = &compound.id {
            if self.attr(node, "id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        let classes = self.classes(node);
        if !compound.classes.iter().all(|c| classes.contains(c)) {
            return false;
        }
        for test in &compound.attrs {
            let Some(value) = self.attr(node, &test.name) else {
                return false;
            };
            let ok = match &test.op {
                AttrOp::Exists => true,
                AttrOp::Equals(v) => value == *v,
                AttrOp::Contains(v) => !v.is_empty() && value.contains(v.as_str()),
            };
            if !ok {
                return false;
            }
        }
        !compound.nots.iter().any(|n| self.matches_compound(node, n))
    }

    fn matches_complex(&self, node: &NodeId, parts: &[(Combinator, Compound)]) -> bool {
        let Some(((combinator, last), rest)) = parts.split_last() else {
            return false;
        };
        if !self.matches_compound(node, last) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }
        match combinator {
            Combinator::Child => self
                .parent(node)
                .is_some_and(|p| self.matches_complex(&p, rest)),
            Combinator::Descendant => {
                let mut ancestor = self.parent(node);
                while let Some(a) = ancestor {
                    if self.matches_complex(&a, rest) {
                        return true;
                    }
                    ancestor = self.parent(&a);
                }
                false
            }
        }
    }
}

impl Dom for MockPage {
    type Node = NodeId;

    fn document_element(&self) -> NodeId {
        self.state.borrow().root
    }

    fn body(&self) -> NodeId {
        self.state.borrow().body
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
        let groups = parse_selector(selector);
        let scope = scope.copied().unwrap_or_else(|| self.document_element());
        let mut candidates = Vec::new();
        self.descendants(&scope, &mut candidates);
        candidates
            .into_iter()
            .filter(|n| groups.iter().any(|g| self.matches_complex(n, g)))
            .collect()
    }

    fn matches(&self, node: &NodeId, selector: &str) -> bool {
        parse_selector(selector)
            .iter()
            .any(|g| self.matches_complex(node, g))
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.document_element();
        let mut all = Vec::new();
        self.descendants(&root, &mut all);
        all.into_iter()
            .find(|n| self.attr(n, "id").as_deref() == Some(id))
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.alloc(tag))
    }

    fn clone_deep(&self, node: &NodeId) -> Option<NodeId> {
        Some(self.copy_tree(node))
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.state.borrow().nodes[node.0].parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.state.borrow().nodes[node.0].children.clone()
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.detach(child);
        let mut state = self.state.borrow_mut();
        state.nodes[child.0].parent = Some(*parent);
        state.nodes[parent.0].children.push(*child);
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) {
        self.detach(child);
        let mut state = self.state.borrow_mut();
        state.nodes[child.0].parent = Some(*parent);
        state.nodes[parent.0].children.insert(0, *child);
    }

    fn remove(&self, node: &NodeId) {
        self.detach(node);
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.state.borrow().nodes[node.0].tag.clone()
    }

    fn text(&self, node: &NodeId) -> String {
        let mut out = self.state.borrow().nodes[node.0].text.clone();
        for child in self.children(node) {
            out.push_str(&self.text(&child));
        }
        out
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        for child in self.children(node) {
            self.detach(&child);
        }
        self.state.borrow_mut().nodes[node.0].text = text.to_string();
    }

    fn attr(&self, node: &NodeId, name: &str) -> Option<String> {
        self.state.borrow().nodes[node.0]
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attr(&self, node: &NodeId, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        let attrs = &mut state.nodes[node.0].attrs;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attr(&self, node: &NodeId, name: &str) {
        self.state.borrow_mut().nodes[node.0]
            .attrs
            .retain(|(n, _)| n != name);
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut classes = self.classes(node);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.set_attr(node, "class", &classes.join(" "));
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let mut classes = self.classes(node);
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.set_attr(node, "class", &classes.join(" "));
        }
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        let styles = &mut state.nodes[node.0].styles;
        styles.retain(|(p, _)| p != property);
        if !value.is_empty() {
            styles.push((property.to_string(), value.to_string()));
        }
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.state.borrow().nodes[node.0]
            .styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    }

    fn value(&self, node: &NodeId) -> String {
        self.state.borrow().nodes[node.0].value.clone()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.state.borrow_mut().nodes[node.0].value = value.to_string();
    }

    fn focus(&self, node: &NodeId) {
        self.state.borrow_mut().focused = Some(*node);
    }

    fn select_text(&self, node: &NodeId) {
        self.state.borrow_mut().selected = Some(*node);
    }

    fn copy_selection(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.clipboard_available {
            return false;
        }
        let Some(selected) = state.selected else {
            return false;
        };
        let value = state.nodes[selected.0].value.clone();
        state.clipboard.push(value);
        true
    }

    fn outer_height(&self, node: &NodeId) -> f64 {
        self.state.borrow().nodes[node.0].outer_height
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.state.borrow().nodes[node.0].offset_top
    }

    fn viewport_width(&self) -> f64 {
        self.state.borrow().viewport_width
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn set_scroll_y(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y.max(0.0);
    }

    fn location(&self) -> Location {
        self.state.borrow().location.clone()
    }

    fn link_target(&self, anchor: &NodeId) -> Option<LinkTarget> {
        let href = self.attr(anchor, "href")?;
        Some(resolve_href(&self.location(), &href))
    }

    fn listen(&self, node: &NodeId, event: &str, listener: Listener<NodeId>) {
        self.listeners
            .borrow_mut()
            .push((*node, event.to_string(), listener));
    }

    fn listen_window(&self, event: &str, listener: Rc<dyn Fn()>) {
        self.window_listeners
            .borrow_mut()
            .push((event.to_string(), listener));
    }
}

impl Scheduler for MockPage {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let mut queue = self.timers.borrow_mut();
        queue.next_id += 1;
        let id = TimerId(queue.next_id);
        let due = queue.now + f64::from(delay_ms);
        queue.timers.push(Timer {
            id,
            due,
            period: 0.0,
            callback: TimerCallback::Once(callback),
        });
        id
    }

    fn set_interval(&self, period_ms: u32, callback: Rc<dyn Fn()>) -> TimerId {
        let mut queue = self.timers.borrow_mut();
        queue.next_id += 1;
        let id = TimerId(queue.next_id);
        let period = f64::from(period_ms);
        let due = queue.now + period.max(1.0);
        queue.timers.push(Timer {
            id,
            due,
            period,
            callback: TimerCallback::Repeat(callback),
        });
        id
    }

    fn clear_timer(&self, id: TimerId) {
        self.timers.borrow_mut().timers.retain(|t| t.id != id);
    }

    fn now_ms(&self) -> f64 {
        self.timers.borrow().now
    }
}

impl KeyValueStore for MockPage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), UiError> {
        self.storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolve `href` the way an anchor's `pathname`/`hostname`/`hash` would.
fn resolve_href(page: &Location, href: &str) -> LinkTarget {
    let (before_hash, hash) = match href.find('#') {
        Some(i) => (&href[..i], &href[i..]),
        None => (href, ""),
    };
    let hash = if hash == "#" { "" } else { hash };
    let before_query = before_hash.split('?').next().unwrap_or("");

    let location = if let Some(rest) = before_query
        .strip_prefix("https://")
        .or_else(|| before_query.strip_prefix("http://"))
        .or_else(|| before_query.strip_prefix("//"))
    {
        let (host, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };
        Location {
            pathname: path.to_string(),
            hostname: host.to_string(),
        }
    } else if before_query.is_empty() {
        page.clone()
    } else if before_query.starts_with('/') {
        Location {
            pathname: before_query.to_string(),
            hostname: page.hostname.clone(),
        }
    } else {
        let base = match page.pathname.rfind('/') {
            Some(i) => &page.pathname[..=i],
            None => "/",
        };
        Location {
            pathname: format!("{base}{before_query}"),
            hostname: page.hostname.clone(),
        }
    };
    LinkTarget {
        location,
        hash: hash.to_string(),
    }
}

/// Declarative markup for [`MockPage::mount`]
#[derive(Debug, Clone)]
pub struct Markup {
    spec: String,
    text: Option<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Markup>,
}

/// Element from a compound selector such as `li.menu-active#home[data-x=1]`.
/// The tag defaults to `div`.
pub fn el(spec: &str) -> Markup {
    Markup {
        spec: spec.to_string(),
        text: None,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl Markup {
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Attribute whose value does not fit in the spec syntax
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }
}

// Selector parsing

#[derive(Debug, Clone, Copy, PartialEq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone)]
enum AttrOp {
    Exists,
    Equals(String),
    Contains(String),
}

#[derive(Debug, Clone)]
struct AttrTest {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
    nots: Vec<Compound>,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

/// Read up to the `close` that balances an already-consumed opener.
fn read_balanced(chars: &[char], pos: &mut usize, open: char, close: char) -> String {
    let start = *pos;
    let mut depth = 1;
    while *pos < chars.len() {
        let c = chars[*pos];
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                let inner: String = chars[start..*pos].iter().collect();
                *pos += 1;
                return inner;
            }
        }
        *pos += 1;
    }
    chars[start..].iter().collect()
}

fn parse_attr(body: &str) -> AttrTest {
    let unquote = |v: &str| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
    if let Some((name, value)) = body.split_once("*=") {
        AttrTest {
            name: name.trim().to_string(),
            op: AttrOp::Contains(unquote(value)),
        }
    } else if let Some((name, value)) = body.split_once('=') {
        AttrTest {
            name: name.trim().to_string(),
            op: AttrOp::Equals(unquote(value)),
        }
    } else {
        AttrTest {
            name: body.trim().to_string(),
            op: AttrOp::Exists,
        }
    }
}

fn parse_compound(chars: &[char], pos: &mut usize) -> Compound {
    let mut compound = Compound::default();
    while *pos < chars.len() {
        match chars[*pos] {
            '*' => *pos += 1,
            '#' => {
                *pos += 1;
                compound.id = Some(read_ident(chars, pos));
            }
            '.' => {
                *pos += 1;
                compound.classes.push(read_ident(chars, pos));
            }
            '[' => {
                *pos += 1;
                let body = read_balanced(chars, pos, '[', ']');
                compound.attrs.push(parse_attr(&body));
            }
            ':' => {
                *pos += 1;
                let pseudo = read_ident(chars, pos);
                if pseudo == "not" && chars.get(*pos) == Some(&'(') {
                    *pos += 1;
                    let inner = read_balanced(chars, pos, '(', ')');
                    compound.nots.push(parse_compound_str(&inner));
                }
            }
            c if is_ident_char(c) => {
                compound.tag = Some(read_ident(chars, pos).to_ascii_lowercase());
            }
            _ => break,
        }
    }
    compound
}

fn parse_compound_str(spec: &str) -> Compound {
    let chars: Vec<char> = spec.trim().chars().collect();
    let mut pos = 0;
    parse_compound(&chars, &mut pos)
}

fn parse_complex(group: &str) -> Vec<(Combinator, Compound)> {
    let chars: Vec<char> = group.trim().chars().collect();
    let mut pos = 0;
    let mut parts = Vec::new();
    let mut combinator = Combinator::Descendant;
    while pos < chars.len() {
        let start = pos;
        let compound = parse_compound(&chars, &mut pos);
        if pos == start {
            // Unsupported syntax; skip the character rather than loop forever.
            pos += 1;
            continue;
        }
        parts.push((combinator, compound));
        let mut saw_space = false;
        while pos < chars.len() && chars[pos].is_whitespace() {
            saw_space = true;
            pos += 1;
        }
        if pos < chars.len() && chars[pos] == '>' {
            combinator = Combinator::Child;
            pos += 1;
            while pos < chars.len() && chars[pos].is_whitespace() {
                pos += 1;
            }
        } else if saw_space {
            combinator = Combinator::Descendant;
        }
    }
    parts
}

fn parse_selector(selector: &str) -> Vec<Vec<(Combinator, Compound)>> {
    let mut groups = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for c in selector.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                groups.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    groups.push(current);
    groups
        .iter()
        .filter(|g| !g.trim().is_empty())
        .map(|g| parse_complex(g))
        .collect()
}
