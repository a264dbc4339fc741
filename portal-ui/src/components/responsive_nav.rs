//! Off-canvas navigation for narrow viewports
//!
//! The desktop navbar and the sidebar stay untouched. On first need a deep
//! copy of the navbar's collapsible content is rebuilt into a single panel:
//!
//! ```text
//! div.navbar-collapse[data-color]      (appended to <body>)
//!   .logo                              (copied from the sidebar)
//!   div.sidebar-wrapper
//!     ul.nav.navbar-nav                (navbar lists, then sidebar .nav)
//! ```
//!
//! The panel is built at most once per page. `maybe_initialize` can be
//! called from every `resize` event and does nothing after the first build.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use portal_common::Breakpoint;
use tracing::{debug, info};

use crate::config::PortalConfig;
use crate::dom::{DomEvent, Host, NodeOf, TimerId};

/// Class on `<html>` while the panel is open
pub const OPEN_CLASS: &str = "nav-open";
/// Id of the full-page element that closes the panel when clicked
pub const CATCHER_ID: &str = "bodyClick";
pub const TOGGLE_SELECTOR: &str = ".navbar-toggle";
/// Icon animation class on the toggle controls
pub const TOGGLED_CLASS: &str = "toggled";

const NAVBAR_SELECTOR: &str = "nav .navbar-collapse";
const SIDEBAR_SELECTOR: &str = ".sidebar";
const SUBMENU_SELECTOR: &str = "li.menu-has-children, li.dropdown";
const ANCHOR_THEME_CLASSES: &str = "btn btn-round btn-default";
const BUTTON_THEME_CLASSES: &str =
    "btn-round btn-fill btn-info btn-primary btn-success btn-danger btn-warning btn-neutral";
const BUTTON_MOBILE_CLASSES: &str = "btn-simple btn-block";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOptions {
    pub breakpoint: Breakpoint,
    /// Delay before the toggle icon switches to its open state
    pub open_delay_ms: u32,
    pub close_delay_ms: u32,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self::from(&PortalConfig::default())
    }
}

impl From<&PortalConfig> for NavOptions {
    fn from(config: &PortalConfig) -> Self {
        Self {
            breakpoint: Breakpoint::new(config.breakpoint),
            open_delay_ms: config.toggle_open_delay_ms,
            close_delay_ms: config.toggle_close_delay_ms,
        }
    }
}

pub(crate) struct NavState<H: Host> {
    host: Rc<H>,
    options: NavOptions,
    panel: Option<NodeOf<H>>,
    catcher: Option<NodeOf<H>>,
    open: bool,
    icon_timer: Option<TimerId>,
    /// Run once with the panel after it is built
    build_hooks: Vec<Rc<dyn Fn(&NodeOf<H>)>>,
}

/// Controller owning the mobile panel and its open/closed state
pub struct ResponsiveNav<H: Host> {
    state: Rc<RefCell<NavState<H>>>,
}

impl<H: Host> Clone for ResponsiveNav<H> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<H: Host> ResponsiveNav<H> {
    pub fn new(host: Rc<H>, options: NavOptions) -> Self {
        Self {
            state: Rc::new(RefCell::new(NavState {
                host,
                options,
                panel: None,
                catcher: None,
                open: false,
                icon_timer: None,
                build_hooks: Vec::new(),
            })),
        }
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<NavState<H>>> {
        Rc::downgrade(&self.state)
    }

    pub(crate) fn from_weak(weak: &Weak<RefCell<NavState<H>>>) -> Option<Self> {
        weak.upgrade().map(|state| Self { state })
    }

    /// Hook the `.navbar-toggle` controls. The panel is built on the first click
    /// if no resize has built it yet.
    pub fn bind(&self) {
        let host = self.host();
        for toggle in host.query_all(None, TOGGLE_SELECTOR) {
            let weak = self.downgrade();
            host.listen(
                &toggle,
                "click",
                Rc::new(move |_event: &DomEvent<NodeOf<H>>| {
                    if let Some(nav) = Self::from_weak(&weak) {
                        nav.toggle();
                    }
                }),
            );
        }
    }

    fn host(&self) -> Rc<H> {
        self.state.borrow().host.clone()
    }

    /// Call `hook` with the panel once it has been built. Copies carry no
    /// listeners, so this is where other controllers wire the panel's links.
    pub fn on_build(&self, hook: impl Fn(&NodeOf<H>) + 'static) {
        self.state.borrow_mut().build_hooks.push(Rc::new(hook));
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().panel.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    pub fn panel(&self) -> Option<NodeOf<H>> {
        self.state.borrow().panel.clone()
    }

    /// Build the panel if the viewport is at or below the breakpoint and it
    /// has not been built yet. Returns true only on the call that built it.
    pub fn maybe_initialize(&self) -> bool {
        let (host, breakpoint) = {
            let state = self.state.borrow();
            (state.host.clone(), state.options.breakpoint)
        };
        if self.is_initialized() || !breakpoint.is_mobile(host.viewport_width()) {
            return false;
        }
        self.build_panel()
    }

    fn build_panel(&self) -> bool {
        let host = self.host();

        let navbar = host.query(None, NAVBAR_SELECTOR);
        let panel = match navbar.and_then(|navbar| host.clone_deep(&navbar)) {
            Some(panel) => panel,
            None => {
                debug!("No desktop navbar found, mobile panel starts empty");
                let Some(panel) = host.create_element("div") else {
                    return false;
                };
                host.add_class(&panel, "navbar-collapse");
                panel
            }
        };

        let sidebar = host.query(None, SIDEBAR_SELECTOR);
        if sidebar.is_none() {
            debug!("No sidebar found, mobile panel has navbar items only");
        }
        if let Some(color) = sidebar.as_ref().and_then(|s| host.attr(s, "data-color")) {
            host.set_attr(&panel, "data-color", &color);
        }
        let logo = sidebar
            .as_ref()
            .and_then(|s| host.query(Some(s), ".logo"))
            .and_then(|logo| host.clone_deep(&logo));

        // Navbar lists first, then the sidebar menu
        let mut items = Vec::new();
        for list in host.children(&panel) {
            if host.tag_name(&list) == "ul" {
                items.extend(host.children(&list));
            }
        }
        if let Some(nav) = sidebar.as_ref().and_then(|s| host.query(Some(s), ".nav")) {
            items.extend(host.children(&nav).iter().filter_map(|item| host.clone_deep(item)));
        }

        let (Some(wrapper), Some(menu)) = (host.create_element("div"), host.create_element("ul"))
        else {
            return false;
        };
        host.set_text(&panel, "");
        if let Some(logo) = &logo {
            host.append_child(&panel, logo);
        }
        host.add_class(&wrapper, "sidebar-wrapper");
        host.add_classes(&menu, "nav navbar-nav");
        for item in &items {
            host.append_child(&menu, item);
        }
        host.append_child(&wrapper, &menu);
        host.append_child(&panel, &wrapper);

        if let Some(image) = sidebar.as_ref().and_then(|s| host.attr(s, "data-image")) {
            host.set_style(&panel, "background", &format!("url('{image}')"));
            host.remove_attr(&panel, "data-nav-image");
            host.add_class(&panel, "has-image");
        }

        for anchor in host.query_all(Some(&panel), "a") {
            host.remove_classes(&anchor, ANCHOR_THEME_CLASSES);
        }
        for button in host.query_all(Some(&panel), "button") {
            host.remove_classes(&button, BUTTON_THEME_CLASSES);
            host.add_classes(&button, BUTTON_MOBILE_CLASSES);
        }

        add_submenu_chevrons(&host, &panel);

        host.append_child(&host.body(), &panel);
        let hooks = {
            let mut state = self.state.borrow_mut();
            state.panel = Some(panel.clone());
            state.build_hooks.clone()
        };
        info!("Mobile navigation panel built with {} items", items.len());
        for hook in hooks {
            hook(&panel);
        }
        true
    }

    pub fn toggle(&self) {
        if !self.is_initialized() {
            self.build_panel();
        }
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open(&self) {
        let weak = self.downgrade();
        let mut state = self.state.borrow_mut();
        if state.open {
            return;
        }
        let host = state.host.clone();
        host.add_class(&host.document_element(), OPEN_CLASS);

        let catcher = host.create_element("div");
        if let Some(catcher) = &catcher {
            host.set_attr(catcher, "id", CATCHER_ID);
            host.append_child(&host.body(), catcher);
            host.listen(
                catcher,
                "click",
                Rc::new(move |_event: &DomEvent<NodeOf<H>>| {
                    if let Some(nav) = Self::from_weak(&weak) {
                        nav.close();
                    }
                }),
            );
        }

        state.catcher = catcher;
        state.open = true;
        schedule_icon(&mut state, true);
        debug!("Mobile navigation opened");
    }

    /// Close the panel. No-op when already closed.
    pub fn close(&self) {
        let mut state = self.state.borrow_mut();
        if !state.open {
            return;
        }
        let host = state.host.clone();
        host.remove_class(&host.document_element(), OPEN_CLASS);
        if let Some(catcher) = state.catcher.take() {
            host.remove(&catcher);
        }
        state.open = false;
        schedule_icon(&mut state, false);
        debug!("Mobile navigation closed");
    }
}

/// Flip the toggle icon after the panel transition, replacing any pending flip.
fn schedule_icon<H: Host>(state: &mut NavState<H>, toggled: bool) {
    let host = state.host.clone();
    if let Some(pending) = state.icon_timer.take() {
        host.clear_timer(pending);
    }
    let delay = if toggled {
        state.options.open_delay_ms
    } else {
        state.options.close_delay_ms
    };
    let weak_host = Rc::downgrade(&host);
    let id = host.set_timeout(
        delay,
        Box::new(move || {
            let Some(host) = weak_host.upgrade() else {
                return;
            };
            for toggle in host.query_all(None, TOGGLE_SELECTOR) {
                if toggled {
                    host.add_class(&toggle, TOGGLED_CLASS);
                } else {
                    host.remove_class(&toggle, TOGGLED_CLASS);
                }
            }
        }),
    );
    state.icon_timer = Some(id);
}

/// Give each nested menu a chevron that expands and collapses it.
fn add_submenu_chevrons<H: Host>(host: &Rc<H>, panel: &NodeOf<H>) {
    for item in host.query_all(Some(panel), SUBMENU_SELECTOR) {
        let Some(chevron) = host.create_element("i") else {
            continue;
        };
        host.add_classes(&chevron, "fa fa-chevron-down");
        host.prepend_child(&item, &chevron);

        let weak_host = Rc::downgrade(host);
        let icon = chevron.clone();
        host.listen(
            &chevron,
            "click",
            Rc::new(move |_event: &DomEvent<NodeOf<H>>| {
                let Some(host) = weak_host.upgrade() else {
                    return;
                };
                if let Some(label) = host.next_sibling(&icon) {
                    host.toggle_class(&label, "menu-item-active");
                }
                if let Some(item) = host.parent(&icon) {
                    if let Some(submenu) = host.query(Some(&item), "ul") {
                        let visible = host.is_visible(&submenu);
                        host.set_visible(&submenu, !visible);
                    }
                }
                host.toggle_class(&icon, "fa-chevron-up");
                host.toggle_class(&icon, "fa-chevron-down");
            }),
        );
    }
}
