//! Animated in-page anchor scrolling and the back-to-top control

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use portal_common::{
    anchor_scroll_top, back_to_top_visible, is_same_document, ScrollAnimation,
};
use tracing::debug;

use crate::components::responsive_nav::ResponsiveNav;
use crate::config::PortalConfig;
use crate::dom::{DomEvent, Host, NodeOf, TimerId};

pub const ANCHOR_SELECTOR: &str = r##"a[href*="#"]:not([href="#"])"##;
pub const TAB_TOGGLE_SELECTOR: &str = r#"[data-toggle="tab"]"#;
pub const BACK_TO_TOP_SELECTOR: &str = ".back-to-top";
pub const HEADER_ID: &str = "header";
/// Class marking the nav item of the section scrolled to
pub const MENU_ACTIVE_CLASS: &str = "menu-active";
/// Animation frame period
pub const FRAME_MS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOptions {
    pub duration_ms: u32,
    pub back_to_top_threshold: f64,
}

impl From<&PortalConfig> for ScrollOptions {
    fn from(config: &PortalConfig) -> Self {
        Self {
            duration_ms: config.scroll_duration_ms,
            back_to_top_threshold: config.back_to_top_threshold,
        }
    }
}

struct ScrollState<H: Host> {
    host: Rc<H>,
    options: ScrollOptions,
    nav: Option<ResponsiveNav<H>>,
    animation: Option<TimerId>,
}

pub struct ScrollHelper<H: Host> {
    state: Rc<RefCell<ScrollState<H>>>,
}

impl<H: Host> Clone for ScrollHelper<H> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<H: Host> ScrollHelper<H> {
    /// `nav` is closed after an anchor scroll when it is open.
    pub fn new(host: Rc<H>, options: ScrollOptions, nav: Option<ResponsiveNav<H>>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ScrollState {
                host,
                options,
                nav,
                animation: None,
            })),
        }
    }

    fn from_weak(weak: &Weak<RefCell<ScrollState<H>>>) -> Option<Self> {
        weak.upgrade().map(|state| Self { state })
    }

    fn host(&self) -> Rc<H> {
        self.state.borrow().host.clone()
    }

    /// Hook anchors, back-to-top controls and the window scroll event.
    pub fn bind(&self) {
        let host = self.host();
        let anchors = self.bind_anchors(None);
        debug!("Smooth scrolling bound to {anchors} anchors");

        for button in host.query_all(None, BACK_TO_TOP_SELECTOR) {
            let weak = Rc::downgrade(&self.state);
            host.listen(
                &button,
                "click",
                Rc::new(move |event: &DomEvent<NodeOf<H>>| {
                    if let Some(helper) = Self::from_weak(&weak) {
                        helper.back_to_top();
                        event.prevent_default();
                    }
                }),
            );
        }

        let weak = Rc::downgrade(&self.state);
        host.listen_window(
            "scroll",
            Rc::new(move || {
                if let Some(helper) = Self::from_weak(&weak) {
                    helper.on_scroll();
                }
            }),
        );
        self.on_scroll();
    }

    /// Hook the in-page anchors under `scope`, or the whole page. Returns how
    /// many were hooked.
    pub fn bind_anchors(&self, scope: Option<&NodeOf<H>>) -> usize {
        let host = self.host();
        let anchors = host.query_all(scope, ANCHOR_SELECTOR);
        for anchor in &anchors {
            let weak = Rc::downgrade(&self.state);
            let link = anchor.clone();
            host.listen(
                anchor,
                "click",
                Rc::new(move |event: &DomEvent<NodeOf<H>>| {
                    if let Some(helper) = Self::from_weak(&weak) {
                        if helper.on_anchor_click(&link) {
                            event.prevent_default();
                        }
                    }
                }),
            );
        }
        anchors.len()
    }

    /// Hook the anchors of `nav`'s panel when it is built after [`bind`].
    ///
    /// [`bind`]: ScrollHelper::bind
    pub fn watch_panel(&self, nav: &ResponsiveNav<H>) {
        let weak = Rc::downgrade(&self.state);
        nav.on_build(move |panel| {
            if let Some(helper) = Self::from_weak(&weak) {
                let anchors = helper.bind_anchors(Some(panel));
                debug!("Smooth scrolling bound to {anchors} panel anchors");
            }
        });
    }

    /// Handle a click on an in-page anchor. Returns true when the click was
    /// turned into an animated scroll and default navigation should be
    /// prevented.
    pub fn on_anchor_click(&self, anchor: &NodeOf<H>) -> bool {
        let (host, nav) = {
            let state = self.state.borrow();
            (state.host.clone(), state.nav.clone())
        };
        if host.matches(anchor, TAB_TOGGLE_SELECTOR) {
            return false;
        }
        let Some(link) = host.link_target(anchor) else {
            return false;
        };
        let Some(id) = link.hash.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return false;
        };
        let page = host.location();
        if !is_same_document(
            &page.pathname,
            &page.hostname,
            &link.location.pathname,
            &link.location.hostname,
        ) {
            return false;
        }
        let Some(target) = host.element_by_id(id) else {
            debug!("Anchor target #{id} not on this page");
            return false;
        };

        let header_height = host
            .element_by_id(HEADER_ID)
            .map(|header| host.outer_height(&header))
            .unwrap_or(0.0);
        self.animate_to(anchor_scroll_top(host.offset_top(&target), header_height));

        if host.closest(anchor, ".nav-menu").is_some() {
            for active in host.query_all(None, ".nav-menu .menu-active") {
                host.remove_class(&active, MENU_ACTIVE_CLASS);
            }
            if let Some(item) = host.closest(anchor, "li") {
                host.add_class(&item, MENU_ACTIVE_CLASS);
            }
        }

        if let Some(nav) = nav {
            nav.close();
        }
        true
    }

    /// Animate the window scroll position to `y`, cancelling any running scroll.
    pub fn animate_to(&self, y: f64) {
        self.cancel();
        let weak = Rc::downgrade(&self.state);
        let mut state = self.state.borrow_mut();
        let host = state.host.clone();
        let animation = ScrollAnimation::new(
            host.scroll_y(),
            y,
            f64::from(state.options.duration_ms),
        );
        if animation.is_finished(0.0) {
            host.set_scroll_y(y);
            return;
        }
        let started = host.now_ms();
        let weak_host = Rc::downgrade(&host);
        let id = host.set_interval(
            FRAME_MS,
            Rc::new(move || {
                let (Some(helper), Some(host)) = (Self::from_weak(&weak), weak_host.upgrade())
                else {
                    return;
                };
                let elapsed = host.now_ms() - started;
                host.set_scroll_y(animation.position_at(elapsed));
                if animation.is_finished(elapsed) {
                    helper.cancel();
                }
            }),
        );
        state.animation = Some(id);
    }

    pub fn back_to_top(&self) {
        self.animate_to(0.0);
    }

    /// Stop a running scroll animation where it is.
    pub fn cancel(&self) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.animation.take() {
            state.host.clear_timer(id);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().animation.is_some()
    }

    /// Show the back-to-top controls once scrolled past the threshold.
    pub fn on_scroll(&self) {
        let state = self.state.borrow();
        let host = &state.host;
        let visible = back_to_top_visible(host.scroll_y(), state.options.back_to_top_threshold);
        for button in host.query_all(None, BACK_TO_TOP_SELECTOR) {
            host.set_visible(&button, visible);
        }
    }
}
