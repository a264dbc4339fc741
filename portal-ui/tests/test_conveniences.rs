#![cfg(feature = "test-utils")]

use std::rc::Rc;

use portal_ui::components::auto_select::{auto_select, bind_auto_select, bind_modal_focus};
use portal_ui::components::char_counter::{bind_char_counters, update_counter, CharCounterOptions};
use portal_ui::components::clipboard::{bind_copy_buttons, copy_text};
use portal_ui::components::preloader::dismiss_preloader;
use portal_ui::components::tabs::{bind_responsive_tabs, TAB_SHOWN_EVENT};
use portal_ui::components::view_toggle::{apply_view_mode, bind_view_toggle};
use portal_ui::components::ViewMode;
use portal_ui::mock::{el, MockPage};
use portal_ui::{Dom, UiError};

fn counter_options() -> CharCounterOptions {
    CharCounterOptions {
        warn_at: 10,
        warn_class: "text-danger".to_string(),
    }
}

#[test]
fn test_copy_button_copies_target_text_and_cleans_up() {
    let page = Rc::new(MockPage::new());
    let body = page.body();
    page.mount(&body, el("code#api-token").text(" abc123 "));
    let button = page.mount(&body, el("button").attr("data-copy-target", "#api-token"));
    assert_eq!(bind_copy_buttons(&page), 1);
    let before = page.count("*");

    assert!(page.click(&button));
    assert_eq!(page.clipboard(), vec!["abc123"]);
    assert_eq!(page.count("input"), 0);
    assert_eq!(page.count("*"), before);
}

#[test]
fn test_rejected_copy_still_removes_input() {
    let page = MockPage::new();
    page.set_clipboard_available(false);

    assert!(!copy_text(&page, "secret"));
    assert_eq!(page.count("input"), 0);
    assert!(page.clipboard().is_empty());
}

#[test]
fn test_counter_shows_remaining_and_warns() {
    let page = Rc::new(MockPage::new());
    let group = page.mount(
        &page.body(),
        el(".form-group")
            .child(el("textarea#bio").attr("data-max-chars", "20"))
            .child(el("small.char-counter")),
    );
    assert_eq!(bind_char_counters(&page, &counter_options()), 1);
    let counter = page.query(Some(&group), ".char-counter").unwrap();
    assert_eq!(page.text(&counter), "20 characters remaining");

    let field = page.element_by_id("bio").unwrap();
    page.type_into(&field, "Hello", 72);
    assert_eq!(page.text(&counter), "15 characters remaining");
    assert!(!page.has_class(&counter, "text-danger"));

    page.type_into(&field, "Hello, wonderful", 72);
    assert_eq!(page.text(&counter), "4 characters remaining");
    assert!(page.has_class(&counter, "text-danger"));
}

#[test]
fn test_counter_saturates_at_zero() {
    let page = MockPage::new();
    let group = page.mount(
        &page.body(),
        el("div")
            .child(el("input#title").attr("data-max-chars", "3"))
            .child(el("span.char-counter")),
    );
    let field = page.query(Some(&group), "input").unwrap();
    page.set_value(&field, "héllo");

    let budget = update_counter(&page, &field, &counter_options()).unwrap();
    assert_eq!(budget.remaining, 0);
    assert_eq!(page.texts(".char-counter"), vec!["0 characters remaining"]);
}

#[test]
fn test_counter_without_valid_limit_is_skipped() {
    let page = MockPage::new();
    let group = page.mount(
        &page.body(),
        el("div")
            .child(el("input").attr("data-max-chars", "lots"))
            .child(el("span.char-counter").text("untouched")),
    );
    let field = page.query(Some(&group), "input").unwrap();

    assert_eq!(update_counter(&page, &field, &counter_options()), None);
    assert_eq!(page.texts(".char-counter"), vec!["untouched"]);
}

#[test]
fn test_view_toggle_switches_item_classes() {
    let page = Rc::new(MockPage::new());
    let body = page.body();
    let list = page.mount(&body, el("a#list"));
    let grid = page.mount(&body, el("a#grid"));
    for _ in 0..3 {
        page.mount(&body, el(".item.grid-group-item"));
    }
    bind_view_toggle(&page);

    page.click(&list);
    assert_eq!(page.count(".item.list-group-item"), 3);
    assert_eq!(page.count(".grid-group-item"), 0);

    page.click(&grid);
    assert_eq!(page.count(".item.grid-group-item"), 3);
    assert_eq!(page.count(".list-group-item"), 0);
}

#[test]
fn test_view_mode_without_items_is_noop() {
    let page = MockPage::new();
    apply_view_mode(&page, ViewMode::List);
    assert_eq!(page.count("*"), 1);
}

#[test]
fn test_shown_tab_marks_neighbours() {
    let page = Rc::new(MockPage::new());
    let strip = page.mount(
        &page.body(),
        el("ul.nav.nav-tabs.nav-tabs-responsive")
            .child(el("li#t1").child(el("a").attr("data-toggle", "tab").text("One")))
            .child(el("li#t2").child(el("a").attr("data-toggle", "tab").text("Two")))
            .child(
                el("li#t3.dropdown")
                    .child(el("a").text("More"))
                    .child(el("ul.dropdown-menu").child(
                        el("li").child(el("a#deep").attr("data-toggle", "tab").text("Deep")),
                    )),
            )
            .child(el("li#t4").child(el("a").attr("data-toggle", "tab").text("Four"))),
    );
    assert_eq!(bind_responsive_tabs(&page), 4);

    let two = page.query(Some(&strip), "#t2 a").unwrap();
    page.dispatch(&two, TAB_SHOWN_EVENT, None);
    assert_eq!(page.texts("li.prev"), vec!["One"]);
    assert!(page.has_class(&page.element_by_id("t3").unwrap(), "next"));
    assert_eq!(page.count(".dropdown-menu.pull-xs-right"), 1);

    let deep = page.element_by_id("deep").unwrap();
    page.dispatch(&deep, TAB_SHOWN_EVENT, None);
    assert_eq!(page.texts("li.prev"), vec!["Two"]);
    assert_eq!(page.texts("li.next"), vec!["Four"]);
    assert_eq!(page.count(".pull-xs-right"), 0);
    assert_eq!(page.count(".dropdown-menu.pull-xs-center"), 1);
}

#[test]
fn test_preloader_hides_then_detaches() {
    let page = Rc::new(MockPage::new());
    let preloader = page.mount(&page.body(), el("#preloader"));

    assert!(dismiss_preloader(&page, 100));
    assert!(!page.is_visible(&preloader));
    assert!(page.is_attached(&preloader));

    page.advance(100.0);
    assert!(!page.is_attached(&preloader));
}

#[test]
fn test_preloader_absent() {
    let page = Rc::new(MockPage::new());
    assert!(!dismiss_preloader(&page, 100));
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn test_modal_shown_focuses_input() {
    let page = Rc::new(MockPage::new());
    let modal = page.mount(&page.body(), el("#myModal").child(el("input#myInput")));
    assert!(bind_modal_focus(&page));

    page.dispatch(&modal, "shown.bs.modal", None);
    assert_eq!(page.focused(), page.element_by_id("myInput"));
}

#[test]
fn test_auto_select_focuses_existing_field() {
    let page = MockPage::new();
    let field = page.mount(&page.body(), el("input#share-url"));

    assert_eq!(auto_select(&page, "share-url"), Ok(()));
    assert_eq!(page.focused(), Some(field));
}

#[test]
fn test_auto_select_missing_field_is_an_error() {
    let page = MockPage::new();
    assert_eq!(
        auto_select(&page, "ghost"),
        Err(UiError::MissingElement {
            selector: "#ghost".to_string()
        })
    );
    assert_eq!(page.focused(), None);
}

#[test]
fn test_auto_select_control_targets_named_field() {
    let page = Rc::new(MockPage::new());
    let body = page.body();
    let field = page.mount(&body, el("input#share-url"));
    let control = page.mount(&body, el("button").attr("data-auto-select", "#share-url"));
    let broken = page.mount(&body, el("button").attr("data-auto-select", "ghost"));
    assert_eq!(bind_auto_select(&page), 2);

    page.click(&broken);
    assert_eq!(page.focused(), None);
    page.click(&control);
    assert_eq!(page.focused(), Some(field));
}
