#![cfg(feature = "test-utils")]
mod support;

use portal_ui::boot::read_config;
use portal_ui::mock::el;
use portal_ui::{Dom, Portal, PortalConfig};
use support::{dashboard_page, filterable_table, tracing_init};

#[test]
fn test_config_script_overrides_defaults() {
    let page = dashboard_page();
    page.mount(
        &page.body(),
        el("script#portal-config")
            .attr("type", "application/json")
            .text(r#"{"breakpoint": 767, "rotating": {"speed_ms": 500}}"#),
    );

    let config = read_config(&*page);
    assert_eq!(config.breakpoint, 767);
    assert_eq!(config.rotating.speed_ms, 500);
    assert_eq!(config.rotating.animation, "flipInX");
    assert_eq!(config.scroll_duration_ms, 1500);
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let page = dashboard_page();
    page.mount(&page.body(), el("script#portal-config").text("{breakpoint:"));

    assert_eq!(read_config(&*page), PortalConfig::default());
}

#[test]
fn test_boot_on_narrow_viewport_builds_panel() {
    let page = dashboard_page();
    page.set_viewport_width(375.0);
    let portal = Portal::boot(page.clone(), PortalConfig::default());

    assert!(portal.nav.is_initialized());
    page.resize(320.0);
    assert_eq!(page.count("body > .navbar-collapse"), 1);
}

#[test]
fn test_boot_wires_widgets() {
    tracing_init();
    let page = dashboard_page();
    let body = page.body();
    page.mount(
        &body,
        el("section#hero").child(el("h2.rotating").text("Compute, Storage, Support")),
    );
    filterable_table(&page, &["Name"], &[&["alpha"], &["beta"]]);
    let preloader = page.mount(&body, el("#preloader"));

    let portal = Portal::boot(page.clone(), PortalConfig::default());
    assert_eq!(portal.rotating.borrow().widgets().len(), 1);
    assert_eq!(portal.filters.len(), 1);
    assert!(!portal.tour.is_active());
    assert_eq!(page.texts("#hero .morphext"), vec!["Compute"]);

    page.advance(3000.0);
    assert_eq!(page.texts("#hero .morphext"), vec!["Storage"]);

    page.fire_window("load");
    page.advance(100.0);
    assert!(!page.is_attached(&preloader));
}

#[test]
fn test_autostart_shows_tour_for_new_visitor() {
    let page = dashboard_page();
    let config = PortalConfig {
        tour_autostart: true,
        ..Default::default()
    };
    let portal = Portal::boot(page.clone(), config);

    assert!(portal.tour.is_active());
    assert_eq!(page.count(".tour-popover"), 1);
}
