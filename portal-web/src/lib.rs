//! portal-web - Browser entry point for the portal UI
//!
//! Boots [`portal_ui::Portal`] against the live page when the wasm module
//! loads, and exposes a few calls for inline page scripts.

pub mod storage;
pub mod wasm_utils;
pub mod web_dom;

use std::cell::RefCell;
use std::rc::Rc;

use portal_ui::boot::read_config;
use portal_ui::components::auto_select;
use portal_ui::Portal;
use tracing::info;
use wasm_bindgen::prelude::*;

pub use web_dom::WebDom;

thread_local! {
    static PORTAL: RefCell<Option<Portal<WebDom>>> = const { RefCell::new(None) };
}

/// Read the page config and wire every controller.
pub fn boot() -> Result<(), portal_ui::UiError> {
    let host = Rc::new(WebDom::new()?);
    let config = read_config(&*host);
    let portal = Portal::boot(host, config);
    PORTAL.with(|slot| *slot.borrow_mut() = Some(portal));
    info!("Portal UI started");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    if let Err(e) = boot() {
        tracing::error!("Portal UI failed to start: {e}");
    }
}

/// Focus `#id` and select its text. Throws when the element is missing.
#[wasm_bindgen(js_name = autoSelect)]
pub fn auto_select_js(id: &str) -> Result<(), JsValue> {
    let host = WebDom::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    auto_select::auto_select(&host, id).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Show the guided tour from the first step, even if it was seen before.
#[wasm_bindgen(js_name = startTour)]
pub fn start_tour() -> bool {
    PORTAL.with(|slot| {
        slot.borrow()
            .as_ref()
            .is_some_and(|portal| portal.tour.restart())
    })
}
