//! List/grid switch for `.item` collections

use std::rc::Rc;

use tracing::debug;

use crate::dom::{Dom, DomEvent, Host, NodeOf};

pub const ITEM_SELECTOR: &str = ".item";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Grid,
}

impl ViewMode {
    pub fn item_class(&self) -> &'static str {
        match self {
            Self::List => "list-group-item",
            Self::Grid => "grid-group-item",
        }
    }

    /// Id of the control that selects this mode
    pub fn control_id(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Grid => "grid",
        }
    }

    fn other(&self) -> Self {
        match self {
            Self::List => Self::Grid,
            Self::Grid => Self::List,
        }
    }
}

pub fn apply_view_mode<D: Dom>(host: &D, mode: ViewMode) {
    for item in host.query_all(None, ITEM_SELECTOR) {
        host.remove_class(&item, mode.other().item_class());
        host.add_class(&item, mode.item_class());
    }
    debug!("Switched items to {mode:?} view");
}

/// Hook `#list` and `#grid` when present.
pub fn bind_view_toggle<H: Host>(host: &Rc<H>) {
    for mode in [ViewMode::List, ViewMode::Grid] {
        let Some(control) = host.element_by_id(mode.control_id()) else {
            continue;
        };
        let weak = Rc::downgrade(host);
        host.listen(
            &control,
            "click",
            Rc::new(move |event: &DomEvent<NodeOf<H>>| {
                if let Some(host) = weak.upgrade() {
                    apply_view_mode(host.as_ref(), mode);
                    event.prevent_default();
                }
            }),
        );
    }
}
