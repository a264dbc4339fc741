//! Page start-up: read the config and wire every controller

use std::cell::RefCell;
use std::rc::Rc;

use portal_common::default_steps;
use tracing::info;

use crate::components::auto_select::{bind_auto_select, bind_modal_focus};
use crate::components::char_counter::{bind_char_counters, CharCounterOptions};
use crate::components::clipboard::bind_copy_buttons;
use crate::components::preloader::dismiss_preloader;
use crate::components::tabs::bind_responsive_tabs;
use crate::components::view_toggle::bind_view_toggle;
use crate::components::{
    NavOptions, ResponsiveNav, RotatingTextOptions, RotatingTextRegistry, ScrollHelper,
    ScrollOptions, TableFilter, Tour,
};
use crate::config::{PortalConfig, CONFIG_ELEMENT_ID};
use crate::dom::Host;

/// Read `#portal-config`, using defaults when it is absent or invalid.
pub fn read_config<H: Host>(host: &H) -> PortalConfig {
    let text = host
        .element_by_id(CONFIG_ELEMENT_ID)
        .map(|element| host.text(&element));
    PortalConfig::from_json_or_default(text.as_deref())
}

/// Every controller running on the page
pub struct Portal<H: Host> {
    host: Rc<H>,
    config: PortalConfig,
    pub nav: ResponsiveNav<H>,
    pub rotating: Rc<RefCell<RotatingTextRegistry<H>>>,
    pub scroll: ScrollHelper<H>,
    pub filters: Vec<Rc<TableFilter<H>>>,
    pub tour: Tour<H>,
}

impl<H: Host> Portal<H> {
    pub fn boot(host: Rc<H>, config: PortalConfig) -> Self {
        let nav = ResponsiveNav::new(host.clone(), NavOptions::from(&config));
        nav.bind();
        nav.maybe_initialize();
        for event in ["resize", "load"] {
            let weak = nav.downgrade();
            host.listen_window(
                event,
                Rc::new(move || {
                    if let Some(nav) = ResponsiveNav::from_weak(&weak) {
                        nav.maybe_initialize();
                    }
                }),
            );
        }

        let mut rotating = RotatingTextRegistry::new(host.clone());
        let rotating_options = RotatingTextOptions::from(&config.rotating);
        let widgets = rotating.bind(&config.rotating.selector, &rotating_options);

        let scroll = ScrollHelper::new(
            host.clone(),
            ScrollOptions::from(&config),
            Some(nav.clone()),
        );
        scroll.bind();
        scroll.watch_panel(&nav);

        let filters = TableFilter::bind_all(&host);

        let tour = Tour::new(host.clone(), default_steps(), config.tour_storage_key.clone());
        tour.bind();
        if config.tour_autostart {
            tour.start();
        }

        bind_copy_buttons(&host);
        bind_char_counters(&host, &CharCounterOptions::from(&config));
        bind_view_toggle(&host);
        bind_responsive_tabs(&host);
        bind_modal_focus(&host);
        bind_auto_select(&host);

        let weak = Rc::downgrade(&host);
        let delay = config.preloader_delay_ms;
        host.listen_window(
            "load",
            Rc::new(move || {
                if let Some(host) = weak.upgrade() {
                    dismiss_preloader(&host, delay);
                }
            }),
        );

        info!(
            "Portal ready: {widgets} rotating widgets, {} filterable tables",
            filters.len()
        );
        Self {
            host,
            config,
            nav,
            rotating: Rc::new(RefCell::new(rotating)),
            scroll,
            filters,
            tour,
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }
}
