//! Guided tour popovers
//!
//! Progress and the "seen" flag are saved under one storage key so the tour
//! survives page changes and never replays once finished.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use portal_common::{Placement, RenderedStep, TourState, TourStep};
use tracing::{debug, info, warn};

use crate::dom::{DomEvent, Host, NodeOf};
use crate::storage::{load_tour_record, save_tour_record, TourRecord};

pub const POPOVER_CLASS: &str = "tour-popover";
/// Class on the element the current step points at
pub const TARGET_CLASS: &str = "tour-step-target";
/// Elements that restart the tour when clicked
pub const RESTART_SELECTOR: &str = "[data-tour-start]";

pub(crate) struct TourInner<H: Host> {
    host: Rc<H>,
    state: TourState,
    storage_key: String,
    popover: Option<NodeOf<H>>,
    highlighted: Option<NodeOf<H>>,
}

pub struct Tour<H: Host> {
    inner: Rc<RefCell<TourInner<H>>>,
}

impl<H: Host> Clone for Tour<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: Host> Tour<H> {
    pub fn new(host: Rc<H>, steps: Vec<TourStep>, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let mut state = TourState::new(steps);
        if let Some(name) = load_tour_record(&*host, &storage_key).name {
            state.set_name(&name);
        }
        Self {
            inner: Rc::new(RefCell::new(TourInner {
                host,
                state,
                storage_key,
                popover: None,
                highlighted: None,
            })),
        }
    }

    fn from_weak(weak: &Weak<RefCell<TourInner<H>>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Hook `[data-tour-start]` controls to [`Tour::restart`].
    pub fn bind(&self) {
        let host = self.inner.borrow().host.clone();
        for control in host.query_all(None, RESTART_SELECTOR) {
            let weak = Rc::downgrade(&self.inner);
            host.listen(
                &control,
                "click",
                Rc::new(move |event: &DomEvent<NodeOf<H>>| {
                    if let Some(tour) = Self::from_weak(&weak) {
                        tour.restart();
                        event.prevent_default();
                    }
                }),
            );
        }
    }

    pub fn record(&self) -> TourRecord {
        let inner = self.inner.borrow();
        load_tour_record(&*inner.host, &inner.storage_key)
    }

    pub fn has_been_seen(&self) -> bool {
        self.record().seen
    }

    /// Show the tour unless it has been seen, resuming a saved step.
    /// Returns whether a step is now visible.
    pub fn start(&self) -> bool {
        let record = self.record();
        if record.seen {
            debug!("Tour already seen, not starting");
            return false;
        }
        self.show_from(record.step.unwrap_or(0))
    }

    /// Forget earlier progress and show the tour from the beginning.
    pub fn restart(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            inner.state.set_name("");
            persist(&inner, TourRecord::default());
        }
        info!("Restarting tour");
        self.show_from(0)
    }

    fn show_from(&self, from: usize) -> bool {
        let weak = Rc::downgrade(&self.inner);
        let mut inner = self.inner.borrow_mut();
        let path = inner.host.location().pathname;
        match inner.state.first_step_on(from, &path) {
            Some(index) => {
                inner.state.start_at(index);
                render(&mut inner, weak);
                true
            }
            None => {
                hide(&mut inner);
                false
            }
        }
    }

    /// Run the current step's capture, then move on. Past the last step the
    /// tour ends. A step on another page is saved and shown there.
    pub fn next(&self) {
        let weak = Rc::downgrade(&self.inner);
        let mut inner = self.inner.borrow_mut();
        let Some(current) = inner.state.current_index() else {
            return;
        };
        capture_name(&mut inner);

        let next = current + 1;
        if next >= inner.state.steps().len() {
            finish(&mut inner);
            return;
        }
        inner.state.start_at(next);
        let path = inner.host.location().pathname;
        if inner.state.steps()[next].shows_on(&path) {
            render(&mut inner, weak);
        } else {
            debug!("Tour step {next} belongs to another page");
            hide(&mut inner);
            let record = TourRecord {
                seen: false,
                step: Some(next),
                name: inner.state.name().map(str::to_string),
            };
            persist(&inner, record);
        }
    }

    pub fn prev(&self) {
        let weak = Rc::downgrade(&self.inner);
        let mut inner = self.inner.borrow_mut();
        if inner.state.current_index().is_none() {
            return;
        }
        inner.state.prev();
        render(&mut inner, weak);
    }

    /// Close the tour and mark it as seen.
    pub fn end(&self) {
        let mut inner = self.inner.borrow_mut();
        capture_name(&mut inner);
        finish(&mut inner);
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().popover.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.inner.borrow().state.current_index()
    }

    pub fn name(&self) -> Option<String> {
        self.inner.borrow().state.name().map(str::to_string)
    }

    pub fn current_step(&self) -> Option<RenderedStep> {
        self.inner.borrow().state.render_current()
    }
}

fn persist<H: Host>(inner: &TourInner<H>, record: TourRecord) {
    if let Err(e) = save_tour_record(&*inner.host, &inner.storage_key, &record) {
        warn!("Could not save tour progress: {e}");
    }
}

fn finish<H: Host>(inner: &mut TourInner<H>) {
    inner.state.end();
    hide(inner);
    let record = TourRecord {
        seen: true,
        step: None,
        name: inner.state.name().map(str::to_string),
    };
    persist(inner, record);
    info!("Tour finished");
}

/// Take the visitor name from the popover input if the current step asks for it.
fn capture_name<H: Host>(inner: &mut TourInner<H>) {
    let asks_name = inner.state.current_step().is_some_and(|s| s.asks_name);
    let Some(popover) = inner.popover.clone().filter(|_| asks_name) else {
        return;
    };
    if let Some(input) = inner.host.query(Some(&popover), ".tour-input") {
        let value = inner.host.value(&input);
        inner.state.set_name(&value);
    }
}

fn hide<H: Host>(inner: &mut TourInner<H>) {
    let host = inner.host.clone();
    if let Some(popover) = inner.popover.take() {
        host.remove(&popover);
    }
    if let Some(target) = inner.highlighted.take() {
        host.remove_class(&target, TARGET_CLASS);
    }
}

fn render<H: Host>(inner: &mut TourInner<H>, weak: Weak<RefCell<TourInner<H>>>) {
    hide(inner);
    let Some(step) = inner.state.render_current() else {
        return;
    };
    let host = inner.host.clone();
    let Some(popover) = build_popover(&host, &step, inner.state.name(), &weak) else {
        warn!("Could not build the tour popover");
        return;
    };

    if let Some(target) = step.target.as_deref().and_then(|s| host.query(None, s)) {
        host.add_class(&target, TARGET_CLASS);
        let top = match step.placement {
            Placement::Bottom => host.offset_top(&target) + host.outer_height(&target),
            _ => host.offset_top(&target),
        };
        host.set_style(&popover, "top", &format!("{top}px"));
        inner.highlighted = Some(target);
    }

    host.append_child(&host.body(), &popover);
    inner.popover = Some(popover);
    persist(
        inner,
        TourRecord {
            seen: false,
            step: Some(step.index),
            name: inner.state.name().map(str::to_string),
        },
    );
    debug!("Showing tour step {} of {}", step.index + 1, step.total);
}

/// `div.tour-popover` with title, content, the optional name input and the
/// prev/next/end buttons
fn build_popover<H: Host>(
    host: &Rc<H>,
    step: &RenderedStep,
    name: Option<&str>,
    weak: &Weak<RefCell<TourInner<H>>>,
) -> Option<NodeOf<H>> {
    let popover = host.create_element("div")?;
    host.add_class(&popover, POPOVER_CLASS);
    host.set_attr(&popover, "data-placement", step.placement.as_str());
    host.set_attr(&popover, "data-step", &step.index.to_string());

    let title = host.create_element("h3")?;
    host.add_class(&title, "tour-title");
    host.set_text(&title, &step.title);
    host.append_child(&popover, &title);

    let content = host.create_element("div")?;
    host.add_class(&content, "tour-content");
    host.set_text(&content, &step.content);
    host.append_child(&popover, &content);

    if step.asks_name {
        let input = host.create_element("input")?;
        host.add_classes(&input, "tour-input form-control");
        host.set_attr(&input, "type", "text");
        host.set_value(&input, name.unwrap_or(""));
        host.append_child(&popover, &input);
    }

    let controls = host.create_element("div")?;
    host.add_class(&controls, "tour-nav");
    if !step.is_first() {
        add_button(host, &controls, "tour-prev", "Prev", weak, Tour::prev)?;
    }
    let next_label = if step.is_last() { "Done" } else { "Next" };
    add_button(host, &controls, "tour-next", next_label, weak, Tour::next)?;
    add_button(host, &controls, "tour-end", "End tour", weak, Tour::end)?;
    host.append_child(&popover, &controls);
    Some(popover)
}

fn add_button<H: Host>(
    host: &Rc<H>,
    parent: &NodeOf<H>,
    class: &str,
    label: &str,
    weak: &Weak<RefCell<TourInner<H>>>,
    action: fn(&Tour<H>),
) -> Option<()> {
    let button = host.create_element("button")?;
    host.add_classes(&button, &format!("btn btn-default {class}"));
    host.set_attr(&button, "type", "button");
    host.set_text(&button, label);
    host.append_child(parent, &button);
    let weak = weak.clone();
    host.listen(
        &button,
        "click",
        Rc::new(move |_event: &DomEvent<NodeOf<H>>| {
            if let Some(tour) = Tour::from_weak(&weak) {
                action(&tour);
            }
        }),
    );
    Some(())
}
