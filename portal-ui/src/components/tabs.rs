//! Neighbour classes for collapsing `.nav-tabs-responsive` tab strips

use std::rc::Rc;

use crate::dom::{Dom, DomEvent, Host, NodeOf};

/// Fired by the tab plugin when a tab is about to be shown
pub const TAB_SHOWN_EVENT: &str = "show.bs.tab";
pub const RESPONSIVE_TAB_SELECTOR: &str = r#".nav-tabs-responsive [data-toggle="tab"]"#;

const PULL_CLASSES: &str = "pull-xs-left pull-xs-center pull-xs-right";

/// Mark the items around the shown `tab` as `prev`/`next` and pull their
/// dropdown menus left, center and right.
pub fn position_tab_neighbours<D: Dom>(host: &D, tab: &D::Node) {
    let Some(item) = host.closest(tab, "li") else {
        return;
    };
    let current = host.closest(&item, "li.dropdown").unwrap_or(item);

    if let Some(strip) = host.parent(&current) {
        for li in host.children(&strip) {
            host.remove_classes(&li, "prev next");
        }
    }
    let prev = host.prev_sibling(&current);
    let next = host.next_sibling(&current);
    if let Some(prev) = &prev {
        host.add_class(prev, "prev");
    }
    if let Some(next) = &next {
        host.add_class(next, "next");
    }

    for (li, side) in [
        (prev.as_ref(), "left"),
        (Some(&current), "center"),
        (next.as_ref(), "right"),
    ] {
        let Some(li) = li else {
            continue;
        };
        for menu in host.query_all(Some(li), ".dropdown-menu") {
            host.remove_classes(&menu, PULL_CLASSES);
            host.add_class(&menu, &format!("pull-xs-{side}"));
        }
    }
}

pub fn bind_responsive_tabs<H: Host>(host: &Rc<H>) -> usize {
    let tabs = host.query_all(None, RESPONSIVE_TAB_SELECTOR);
    for tab in &tabs {
        let weak = Rc::downgrade(host);
        let shown = tab.clone();
        host.listen(
            tab,
            TAB_SHOWN_EVENT,
            Rc::new(move |_event: &DomEvent<NodeOf<H>>| {
                if let Some(host) = weak.upgrade() {
                    position_tab_neighbours(host.as_ref(), &shown);
                }
            }),
        );
    }
    tabs.len()
}
