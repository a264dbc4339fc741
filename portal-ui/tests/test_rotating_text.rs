#![cfg(feature = "test-utils")]

use std::cell::RefCell;
use std::rc::Rc;

use portal_ui::components::rotating_text::ROTATING_CLASS;
use portal_ui::components::{RotatingText, RotatingTextOptions, RotatingTextRegistry};
use portal_ui::mock::{el, MockPage, NodeId};
use portal_ui::Dom;

fn hero(text: &str) -> (Rc<MockPage>, NodeId) {
    let page = Rc::new(MockPage::new());
    let element = page.mount(
        &page.body(),
        el("section#hero").child(el("span.rotating").text(text)),
    );
    let span = page.query(Some(&element), ".rotating").unwrap();
    (page, span)
}

#[test]
fn test_cycle_shows_phrases_in_order_and_wraps() {
    let (page, span) = hero("One,Two,Three");
    let widget = RotatingText::attach(page.clone(), span, RotatingTextOptions::default()).unwrap();
    assert_eq!(page.text(&span), "One");

    let mut shown = Vec::new();
    for _ in 0..4 {
        widget.animate();
        shown.push(page.text(&span));
    }
    assert_eq!(shown, vec!["Two", "Three", "One", "Two"]);
}

#[test]
fn test_phrase_is_wrapped_in_animated_span() {
    let (page, span) = hero("Fast, Simple");
    let options = RotatingTextOptions {
        animation: "flipInX".to_string(),
        ..Default::default()
    };
    RotatingText::attach(page.clone(), span, options).unwrap();

    assert!(page.has_class(&span, ROTATING_CLASS));
    let inner = page.children(&span);
    assert_eq!(inner.len(), 1);
    assert!(page.has_class(&inner[0], "animated"));
    assert!(page.has_class(&inner[0], "flipInX"));
    assert_eq!(page.text(&inner[0]), "Fast");
}

#[test]
fn test_interval_advances_phrase() {
    let (page, span) = hero("A|B|C");
    let options = RotatingTextOptions {
        separator: "|".to_string(),
        speed_ms: 1000,
        ..Default::default()
    };
    let widget = RotatingText::attach(page.clone(), span, options).unwrap();

    page.advance(999.0);
    assert_eq!(widget.current_phrase().as_deref(), Some("A"));
    page.advance(1.0);
    assert_eq!(widget.current_phrase().as_deref(), Some("B"));
    page.advance(2000.0);
    assert_eq!(widget.current_phrase().as_deref(), Some("A"));
}

#[test]
fn test_stop_and_start_keep_one_timer() {
    let (page, span) = hero("One,Two");
    let widget = RotatingText::attach(page.clone(), span, RotatingTextOptions::default()).unwrap();
    assert_eq!(page.pending_timers(), 1);

    for _ in 0..3 {
        widget.start();
    }
    assert_eq!(page.pending_timers(), 1);

    widget.stop();
    widget.stop();
    assert!(!widget.is_running());
    assert_eq!(page.pending_timers(), 0);

    page.advance(10_000.0);
    assert_eq!(widget.current_phrase().as_deref(), Some("One"));
}

#[test]
fn test_on_complete_reports_index() {
    let (page, span) = hero("One,Two,Three");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let options = RotatingTextOptions::default().on_complete(move |i| sink.borrow_mut().push(i));
    let widget = RotatingText::attach(page.clone(), span, options).unwrap();
    widget.animate();
    widget.animate();
    widget.animate();

    assert_eq!(*seen.borrow(), vec![0, 1, 2, 0]);
}

#[test]
fn test_registry_attaches_once_per_element() {
    let (page, _) = hero("One,Two");
    page.mount(&page.body(), el("h2.rotating").text("X,Y"));
    let mut registry = RotatingTextRegistry::new(page.clone());

    assert_eq!(registry.bind(".rotating", &RotatingTextOptions::default()), 2);
    assert_eq!(registry.bind(".rotating", &RotatingTextOptions::default()), 0);
    assert_eq!(registry.widgets().len(), 2);

    registry.stop_all();
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn test_empty_text_shows_nothing() {
    let (page, span) = hero("");
    let widget = RotatingText::attach(page.clone(), span, RotatingTextOptions::default()).unwrap();
    widget.animate();
    assert_eq!(page.text(&span), "");
}

#[test]
fn test_second_attach_on_same_element_is_refused() {
    let (page, span) = hero("One,Two");
    let widget = RotatingText::attach(page.clone(), span, RotatingTextOptions::default());
    assert!(widget.is_some());

    assert!(RotatingText::attach(page.clone(), span, RotatingTextOptions::default()).is_none());
    assert_eq!(page.pending_timers(), 1);
    assert_eq!(page.text(&span), "One");
}
