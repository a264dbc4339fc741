//! Focus and select helpers for modals and read-only fields

use std::rc::Rc;

use tracing::error;

use crate::dom::{Dom, DomEvent, Host, NodeOf};
use crate::error::UiError;

pub const MODAL_ID: &str = "myModal";
pub const MODAL_INPUT_ID: &str = "myInput";
/// Fired by the modal plugin once the modal is visible
pub const MODAL_SHOWN_EVENT: &str = "shown.bs.modal";
/// Fields whose text is selected on focus. The value is the id to select.
pub const AUTO_SELECT_SELECTOR: &str = "[data-auto-select]";

/// Focus `#id` and select its text.
pub fn auto_select<D: Dom>(host: &D, id: &str) -> Result<(), UiError> {
    let field = host.element_by_id(id).ok_or_else(|| UiError::MissingElement {
        selector: format!("#{id}"),
    })?;
    host.focus(&field);
    host.select_text(&field);
    Ok(())
}

/// Focus `#myInput` whenever `#myModal` is shown.
pub fn bind_modal_focus<H: Host>(host: &Rc<H>) -> bool {
    let Some(modal) = host.element_by_id(MODAL_ID) else {
        return false;
    };
    let weak = Rc::downgrade(host);
    host.listen(
        &modal,
        MODAL_SHOWN_EVENT,
        Rc::new(move |_event: &DomEvent<NodeOf<H>>| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            if let Some(input) = host.element_by_id(MODAL_INPUT_ID) {
                host.focus(&input);
            }
        }),
    );
    true
}

/// Hook every `[data-auto-select]` control. A control naming a missing
/// element logs an error when clicked.
pub fn bind_auto_select<H: Host>(host: &Rc<H>) -> usize {
    let controls = host.query_all(None, AUTO_SELECT_SELECTOR);
    for control in &controls {
        let weak = Rc::downgrade(host);
        let source = control.clone();
        host.listen(
            control,
            "click",
            Rc::new(move |_event: &DomEvent<NodeOf<H>>| {
                let Some(host) = weak.upgrade() else {
                    return;
                };
                let id = host.attr(&source, "data-auto-select").unwrap_or_default();
                if let Err(e) = auto_select(host.as_ref(), id.trim_start_matches('#')) {
                    error!("Auto-select failed: {e}");
                }
            }),
        );
    }
    controls.len()
}
