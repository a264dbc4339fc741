#![allow(dead_code)]

use std::rc::Rc;

use portal_ui::mock::{el, MockPage, NodeId};
use portal_ui::Dom;

pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Template page with a sidebar and a desktop navbar
pub fn dashboard_page() -> Rc<MockPage> {
    let page = Rc::new(MockPage::new());
    let body = page.body();
    page.mount(
        &body,
        el(".sidebar")
            .attr("data-color", "azure")
            .attr("data-image", "/static/img/sidebar.jpg")
            .child(el(".logo").child(el("a.simple-text").text("Portal")))
            .child(el("ul.nav").child(el("li").child(el("a").attr("href", "/dashboard").text("Dashboard")))),
    );
    page.mount(
        &body,
        el("nav.navbar")
            .child(el("button.navbar-toggle"))
            .child(
                el(".navbar-collapse").child(
                    el("ul.nav.navbar-nav")
                        .child(el("li").child(el("a.btn.btn-round.btn-default").attr("href", "/").text("Home")))
                        .child(el("li").child(el("a").attr("href", "/about").text("About"))),
                ),
            ),
    );
    page
}

/// Top-level item texts of the mobile panel menu
pub fn panel_items(page: &MockPage, panel: &NodeId) -> Vec<String> {
    page.query(Some(panel), ".sidebar-wrapper > ul.nav")
        .map(|menu| page.children(&menu).iter().map(|li| page.text(li)).collect())
        .unwrap_or_default()
}

/// `.filterable` panel with `columns` filter inputs and the given body rows
pub fn filterable_table(page: &MockPage, columns: &[&str], rows: &[&[&str]]) -> NodeId {
    let header = el("tr.filters").children(columns.iter().map(|c| {
        el("th").child(el("input.form-control").attr("placeholder", c).attr("disabled", ""))
    }));
    let body = el("tbody").children(
        rows.iter()
            .map(|row| el("tr").children(row.iter().map(|cell| el("td").text(cell)))),
    );
    page.mount(
        &page.body(),
        el(".panel.filterable")
            .child(el("button.btn.btn-filter").text("Filter"))
            .child(el("table.table").child(el("thead").child(header)).child(body)),
    )
}
