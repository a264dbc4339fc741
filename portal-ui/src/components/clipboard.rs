//! Copy-to-clipboard buttons
//!
//! `<button data-copy-target="#api-token">` copies the text of the element
//! matched by the selector.

use std::rc::Rc;

use tracing::warn;

use crate::dom::{Dom, DomEvent, Host, NodeOf};

pub const COPY_SELECTOR: &str = "[data-copy-target]";

/// Copy `text` through an off-screen input that is removed afterwards.
pub fn copy_text<D: Dom>(host: &D, text: &str) -> bool {
    let Some(input) = host.create_element("input") else {
        return false;
    };
    host.set_attr(&input, "type", "text");
    host.set_attr(&input, "readonly", "");
    host.set_style(&input, "position", "absolute");
    host.set_style(&input, "left", "-9999px");
    host.set_value(&input, text);
    host.append_child(&host.body(), &input);
    host.select_text(&input);
    let copied = host.copy_selection();
    host.remove(&input);
    if !copied {
        warn!("Clipboard copy was rejected");
    }
    copied
}

pub fn copy_element_text<D: Dom>(host: &D, target: &D::Node) -> bool {
    copy_text(host, host.text(target).trim())
}

/// Hook every copy button on the page. Returns how many were bound.
pub fn bind_copy_buttons<H: Host>(host: &Rc<H>) -> usize {
    let buttons = host.query_all(None, COPY_SELECTOR);
    for button in &buttons {
        let weak = Rc::downgrade(host);
        let source = button.clone();
        host.listen(
            button,
            "click",
            Rc::new(move |event: &DomEvent<NodeOf<H>>| {
                let Some(host) = weak.upgrade() else {
                    return;
                };
                let Some(selector) = host.attr(&source, "data-copy-target") else {
                    return;
                };
                if let Some(target) = host.query(None, &selector) {
                    copy_element_text(host.as_ref(), &target);
                    event.prevent_default();
                }
            }),
        );
    }
    buttons.len()
}
