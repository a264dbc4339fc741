//! Per-column live filtering for `.filterable` table panels
//!
//! Expected markup:
//!
//! ```text
//! .filterable
//!   button.btn-filter
//!   table.table
//!     thead > tr.filters > th > input   (one per filterable column)
//!     tbody > tr > td ...
//! ```
//!
//! Each keystroke filters on the typed column only. Other columns' inputs
//! are not combined with it.

use std::rc::{Rc, Weak};

use portal_common::{filter_rows, FilterOutcome};
use tracing::debug;

use crate::dom::{DomEvent, Host, NodeOf, KEY_TAB};

pub const PANEL_SELECTOR: &str = ".filterable";
pub const NO_RESULT_CLASS: &str = "no-result";
pub const NO_RESULT_TEXT: &str = "No result found";

pub struct TableFilter<H: Host> {
    host: Rc<H>,
    panel: NodeOf<H>,
}

impl<H: Host> TableFilter<H> {
    pub fn new(host: Rc<H>, panel: NodeOf<H>) -> Rc<Self> {
        Rc::new(Self { host, panel })
    }

    /// Create and bind a filter for every `.filterable` panel on the page.
    pub fn bind_all(host: &Rc<H>) -> Vec<Rc<Self>> {
        host.query_all(None, PANEL_SELECTOR)
            .into_iter()
            .map(|panel| {
                let filter = Self::new(host.clone(), panel);
                filter.bind();
                filter
            })
            .collect()
    }

    pub fn bind(self: &Rc<Self>) {
        let host = &self.host;
        for button in host.query_all(Some(&self.panel), ".btn-filter") {
            let weak: Weak<Self> = Rc::downgrade(self);
            host.listen(
                &button,
                "click",
                Rc::new(move |_event: &DomEvent<NodeOf<H>>| {
                    if let Some(filter) = weak.upgrade() {
                        filter.toggle_enabled();
                    }
                }),
            );
        }
        for input in self.inputs() {
            let weak: Weak<Self> = Rc::downgrade(self);
            let field = input.clone();
            host.listen(
                &input,
                "keyup",
                Rc::new(move |event: &DomEvent<NodeOf<H>>| {
                    if let Some(filter) = weak.upgrade() {
                        filter.on_keyup(&field, event.key_code);
                    }
                }),
            );
        }
    }

    pub fn panel(&self) -> &NodeOf<H> {
        &self.panel
    }

    pub fn inputs(&self) -> Vec<NodeOf<H>> {
        self.host.query_all(Some(&self.panel), ".filters input")
    }

    pub fn is_enabled(&self) -> bool {
        self.inputs()
            .first()
            .is_some_and(|first| !self.host.is_disabled(first))
    }

    /// Enable the inputs and focus the first, or clear, disable and reset.
    pub fn toggle_enabled(&self) {
        let host = &self.host;
        let inputs = self.inputs();
        let Some(first) = inputs.first() else {
            return;
        };
        if host.is_disabled(first) {
            for input in &inputs {
                host.set_disabled(input, false);
            }
            host.focus(first);
        } else {
            for input in &inputs {
                host.set_value(input, "");
                host.set_disabled(input, true);
            }
            if let Some(tbody) = self.tbody() {
                self.remove_no_result(&tbody);
                for row in host.query_all(Some(&tbody), "tr") {
                    host.set_visible(&row, true);
                }
            }
        }
    }

    /// Filter rows on the column of `input`. Tab presses are ignored.
    pub fn on_keyup(&self, input: &NodeOf<H>, key_code: Option<u32>) -> Option<FilterOutcome> {
        if key_code == Some(KEY_TAB) {
            return None;
        }
        let host = &self.host;
        let headers = host.query_all(Some(&self.panel), ".filters th");
        let header = host.closest(input, "th")?;
        let column = headers.iter().position(|h| *h == header)?;
        let tbody = self.tbody()?;

        self.remove_no_result(&tbody);
        let rows = host.query_all(Some(&tbody), "tr");
        let cells = rows.iter().map(|row| {
            host.query_all(Some(row), "td")
                .get(column)
                .map(|cell| host.text(cell))
        });
        let outcome = filter_rows(cells, &host.value(input));

        for (i, row) in rows.iter().enumerate() {
            host.set_visible(row, !outcome.is_hidden(i));
        }
        if outcome.nothing_matches() {
            self.insert_no_result(&tbody, headers.len());
        }
        debug!(
            "Filter on column {column} hid {} of {} rows",
            outcome.hidden.len(),
            outcome.total
        );
        Some(outcome)
    }

    fn tbody(&self) -> Option<NodeOf<H>> {
        let table = self.host.query(Some(&self.panel), ".table")?;
        self.host.query(Some(&table), "tbody")
    }

    fn remove_no_result(&self, tbody: &NodeOf<H>) {
        for row in self
            .host
            .query_all(Some(tbody), &format!(".{NO_RESULT_CLASS}"))
        {
            self.host.remove(&row);
        }
    }

    fn insert_no_result(&self, tbody: &NodeOf<H>, columns: usize) {
        let host = &self.host;
        let (Some(row), Some(cell)) = (host.create_element("tr"), host.create_element("td"))
        else {
            return;
        };
        host.add_classes(&row, "no-result text-center");
        host.set_attr(&cell, "colspan", &columns.to_string());
        host.set_text(&cell, NO_RESULT_TEXT);
        host.append_child(&row, &cell);
        host.prepend_child(tbody, &row);
    }
}
