#![cfg(feature = "test-utils")]

use std::rc::Rc;

use portal_common::{default_steps, Placement, TourStep};
use portal_ui::components::tour::{POPOVER_CLASS, TARGET_CLASS};
use portal_ui::components::Tour;
use portal_ui::mock::{el, MockPage};
use portal_ui::storage::load_tour_record;
use portal_ui::{Dom, KeyValueStore};

const KEY: &str = "portal_tour";

fn portal_page() -> Rc<MockPage> {
    let page = Rc::new(MockPage::new());
    let body = page.body();
    page.mount(&body, el(".sidebar").child(el("ul.nav").child(el("li").text("Projects"))));
    let profile = page.mount(&body, el("a#nav-profile").text("Profile"));
    page.set_geometry(&profile, 50.0, 30.0);
    page.mount(&body, el("a.help").attr("data-tour-start", "").text("Take the tour"));
    page
}

fn title(page: &MockPage) -> String {
    page.texts(".tour-popover .tour-title").join("")
}

fn click(page: &MockPage, selector: &str) {
    let button = page.query(None, selector).unwrap();
    page.click(&button);
}

#[test]
fn test_name_is_captured_and_interpolated() {
    let page = portal_page();
    let tour = Tour::new(page.clone(), default_steps(), KEY);
    assert!(tour.start());
    assert_eq!(title(&page), "Welcome to the portal");
    assert_eq!(page.count(".tour-prev"), 0);

    let input = page.query(None, ".tour-popover .tour-input").unwrap();
    page.set_value(&input, "  Ada ");
    click(&page, ".tour-next");

    assert_eq!(tour.current_index(), Some(1));
    assert_eq!(title(&page), "Nice to meet you, Ada");
    assert_eq!(tour.name().as_deref(), Some("Ada"));
    assert_eq!(page.count(&format!(".{POPOVER_CLASS}")), 1);
}

#[test]
fn test_blank_name_falls_back_to_default() {
    let page = portal_page();
    let tour = Tour::new(page.clone(), default_steps(), KEY);
    tour.start();
    tour.next();

    assert_eq!(title(&page), "Nice to meet you, friend");
}

#[test]
fn test_finished_tour_does_not_replay() {
    let page = portal_page();
    let tour = Tour::new(page.clone(), default_steps(), KEY);
    tour.start();
    for _ in 0..3 {
        tour.next();
    }
    assert_eq!(page.texts(".tour-next"), vec!["Done"]);
    click(&page, ".tour-next");

    assert!(!tour.is_active());
    assert!(tour.has_been_seen());
    assert_eq!(page.count(".tour-popover"), 0);

    let reloaded = Tour::new(page.clone(), default_steps(), KEY);
    assert!(!reloaded.start());
    assert_eq!(page.count(".tour-popover"), 0);
}

#[test]
fn test_end_marks_seen_and_clears_highlight() {
    let page = portal_page();
    let tour = Tour::new(page.clone(), default_steps(), KEY);
    tour.start();
    tour.next();
    assert_eq!(page.count(&format!(".{TARGET_CLASS}")), 1);

    click(&page, ".tour-end");
    assert!(load_tour_record(&*page, KEY).seen);
    assert_eq!(page.count(&format!(".{TARGET_CLASS}")), 0);
}

#[test]
fn test_popover_is_placed_below_target() {
    let page = portal_page();
    let tour = Tour::new(page.clone(), default_steps(), KEY);
    tour.start();
    tour.next();
    tour.next();

    let popover = page.query(None, ".tour-popover").unwrap();
    assert_eq!(page.attr(&popover, "data-placement").as_deref(), Some("bottom"));
    assert_eq!(page.style(&popover, "top").as_deref(), Some("80px"));
    let profile = page.element_by_id("nav-profile").unwrap();
    assert!(page.has_class(&profile, TARGET_CLASS));
}

#[test]
fn test_prev_returns_to_previous_step() {
    let page = portal_page();
    let tour = Tour::new(page.clone(), default_steps(), KEY);
    tour.start();
    tour.next();
    click(&page, ".tour-prev");

    assert_eq!(tour.current_index(), Some(0));
    assert_eq!(title(&page), "Welcome to the portal");
}

#[test]
fn test_step_on_other_page_resumes_there() {
    let steps = vec![
        TourStep::new("Hello", "Start here"),
        TourStep::new("Your profile", "Edit it here, {name}")
            .on_path("/profile")
            .at("#nav-profile", Placement::Left),
    ];
    let page = portal_page();
    let tour = Tour::new(page.clone(), steps.clone(), KEY);
    tour.start();
    tour.next();

    assert!(!tour.is_active());
    let record = load_tour_record(&*page, KEY);
    assert!(!record.seen);
    assert_eq!(record.step, Some(1));

    page.set_location("/profile", "portal.test");
    let resumed = Tour::new(page.clone(), steps, KEY);
    assert!(resumed.start());
    assert_eq!(resumed.current_index(), Some(1));
    assert_eq!(title(&page), "Your profile");
}

#[test]
fn test_restart_control_replays_seen_tour() {
    let page = portal_page();
    let tour = Tour::new(page.clone(), default_steps(), KEY);
    tour.bind();
    tour.end();
    assert!(!tour.start());

    let help = page.query(None, "[data-tour-start]").unwrap();
    assert!(page.click(&help));

    assert!(tour.is_active());
    assert_eq!(tour.current_index(), Some(0));
    assert!(!tour.has_been_seen());
}

#[test]
fn test_saved_name_survives_reload() {
    let page = portal_page();
    let tour = Tour::new(page.clone(), default_steps(), KEY);
    tour.start();
    let input = page.query(None, ".tour-input").unwrap();
    page.set_value(&input, "Grace");
    tour.next();

    let reloaded = Tour::new(page.clone(), default_steps(), KEY);
    assert_eq!(reloaded.name().as_deref(), Some("Grace"));
}

#[test]
fn test_unreadable_record_starts_fresh() {
    let page = portal_page();
    page.set(KEY, "{not json").unwrap();
    let tour = Tour::new(page.clone(), default_steps(), KEY);

    assert!(tour.start());
    assert_eq!(tour.current_index(), Some(0));
}
