//! Page preloader overlay

use std::rc::Rc;

use tracing::debug;

use crate::dom::Host;

pub const PRELOADER_ID: &str = "preloader";

/// Hide `#preloader` now and detach it after `delay_ms`. Returns false when
/// the page has no preloader.
pub fn dismiss_preloader<H: Host>(host: &Rc<H>, delay_ms: u32) -> bool {
    let Some(preloader) = host.element_by_id(PRELOADER_ID) else {
        return false;
    };
    host.set_visible(&preloader, false);
    let weak = Rc::downgrade(host);
    host.set_timeout(
        delay_ms,
        Box::new(move || {
            if let Some(host) = weak.upgrade() {
                host.remove(&preloader);
                debug!("Preloader removed");
            }
        }),
    );
    true
}
