//! "N characters remaining" counters for length-limited fields
//!
//! A field with `data-max-chars` updates the `.char-counter` element that
//! shares its parent.

use std::rc::Rc;

use portal_common::CharBudget;

use crate::config::PortalConfig;
use crate::dom::{Dom, DomEvent, Host, NodeOf};

pub const FIELD_SELECTOR: &str = "[data-max-chars]";
pub const COUNTER_SELECTOR: &str = ".char-counter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharCounterOptions {
    pub warn_at: usize,
    /// Class added to the counter once `warn_at` or fewer characters remain
    pub warn_class: String,
}

impl From<&PortalConfig> for CharCounterOptions {
    fn from(config: &PortalConfig) -> Self {
        Self {
            warn_at: config.char_warn_at,
            warn_class: config.char_warn_class.clone(),
        }
    }
}

/// Refresh the counter for `field`. `None` when the field has no valid
/// limit or no counter element.
pub fn update_counter<D: Dom>(
    host: &D,
    field: &D::Node,
    options: &CharCounterOptions,
) -> Option<CharBudget> {
    let max_chars = host.attr(field, "data-max-chars")?.trim().parse::<usize>().ok()?;
    let budget = CharBudget::measure(&host.value(field), max_chars, options.warn_at);
    let counter = host.query(Some(&host.parent(field)?), COUNTER_SELECTOR)?;
    host.set_text(&counter, &budget.label());
    if budget.warning {
        host.add_class(&counter, &options.warn_class);
    } else {
        host.remove_class(&counter, &options.warn_class);
    }
    Some(budget)
}

/// Hook every limited field and render its initial count.
pub fn bind_char_counters<H: Host>(host: &Rc<H>, options: &CharCounterOptions) -> usize {
    let fields = host.query_all(None, FIELD_SELECTOR);
    for field in &fields {
        update_counter(host.as_ref(), field, options);
        for event in ["keyup", "input"] {
            let weak = Rc::downgrade(host);
            let source = field.clone();
            let options = options.clone();
            host.listen(
                field,
                event,
                Rc::new(move |_event: &DomEvent<NodeOf<H>>| {
                    if let Some(host) = weak.upgrade() {
                        update_counter(host.as_ref(), &source, &options);
                    }
                }),
            );
        }
    }
    fields.len()
}
