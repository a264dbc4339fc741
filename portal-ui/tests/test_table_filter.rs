#![cfg(feature = "test-utils")]
mod support;

use std::rc::Rc;

use portal_ui::components::table_filter::{NO_RESULT_CLASS, NO_RESULT_TEXT};
use portal_ui::components::TableFilter;
use portal_ui::dom::KEY_TAB;
use portal_ui::mock::{MockPage, NodeId};
use portal_ui::Dom;
use support::{filterable_table, tracing_init};

const KEY_A: u32 = 65;

fn projects() -> (Rc<MockPage>, Rc<TableFilter<MockPage>>) {
    let page = Rc::new(MockPage::new());
    filterable_table(
        &page,
        &["#", "Project", "Owner"],
        &[
            &["1", "Climate model", "Ada"],
            &["2", "Genome assembly", "Grace"],
            &["3", "Climate reanalysis", "Linus"],
        ],
    );
    let mut filters = TableFilter::bind_all(&page);
    assert_eq!(filters.len(), 1);
    (page, filters.remove(0))
}

fn visible_rows(page: &MockPage) -> Vec<String> {
    page.query_all(None, "tbody tr")
        .iter()
        .filter(|row| page.is_visible(row))
        .map(|row| page.text(row))
        .collect()
}

fn input(page: &MockPage, column: usize) -> NodeId {
    page.query_all(None, ".filters input")[column]
}

#[test]
fn test_filters_on_typed_column_case_insensitively() {
    tracing_init();
    let (page, _filter) = projects();
    page.type_into(&input(&page, 1), "CLIMATE", KEY_A);

    assert_eq!(
        visible_rows(&page),
        vec!["1Climate modelAda", "3Climate reanalysisLinus"]
    );
}

#[test]
fn test_no_match_inserts_single_result_row() {
    let (page, _filter) = projects();
    let field = input(&page, 2);
    page.type_into(&field, "zz", KEY_A);
    page.type_into(&field, "zzz", KEY_A);

    let rows = page.query_all(None, &format!("tbody tr.{NO_RESULT_CLASS}"));
    assert_eq!(rows.len(), 1);
    let cell = page.query(Some(&rows[0]), "td").unwrap();
    assert_eq!(page.attr(&cell, "colspan").as_deref(), Some("3"));
    assert_eq!(page.text(&cell), NO_RESULT_TEXT);
    assert_eq!(page.children(&page.query(None, "tbody").unwrap())[0], rows[0]);
}

#[test]
fn test_matching_filter_removes_no_result_row() {
    let (page, _filter) = projects();
    let field = input(&page, 1);
    page.type_into(&field, "nothing like this", KEY_A);
    assert_eq!(page.count(".no-result"), 1);

    page.type_into(&field, "", KEY_A);
    assert_eq!(page.count(".no-result"), 0);
    assert_eq!(visible_rows(&page).len(), 3);
}

#[test]
fn test_tab_key_is_ignored() {
    let (page, filter) = projects();
    let field = input(&page, 1);
    page.set_value(&field, "genome");

    assert_eq!(filter.on_keyup(&field, Some(KEY_TAB)), None);
    assert_eq!(visible_rows(&page).len(), 3);
}

#[test]
fn test_columns_do_not_compose() {
    let (page, _filter) = projects();
    page.type_into(&input(&page, 1), "climate", KEY_A);
    page.type_into(&input(&page, 2), "grace", KEY_A);

    assert_eq!(visible_rows(&page), vec!["2Genome assemblyGrace"]);
}

#[test]
fn test_filter_button_toggles_inputs() {
    let (page, filter) = projects();
    let button = page.query(None, ".btn-filter").unwrap();
    assert!(!filter.is_enabled());

    page.click(&button);
    assert!(filter.is_enabled());
    assert_eq!(page.focused(), Some(input(&page, 0)));

    page.type_into(&input(&page, 1), "nope", KEY_A);
    page.click(&button);

    assert!(!filter.is_enabled());
    assert!(filter.inputs().iter().all(|i| page.value(i).is_empty()));
    assert_eq!(page.count(".no-result"), 0);
    assert_eq!(visible_rows(&page).len(), 3);
}

#[test]
fn test_empty_table_reports_no_result() {
    let page = Rc::new(MockPage::new());
    filterable_table(&page, &["Name"], &[]);
    let filter = TableFilter::bind_all(&page).remove(0);

    let outcome = filter.on_keyup(&input(&page, 0), Some(KEY_A)).unwrap();
    assert!(outcome.nothing_matches());
    assert_eq!(page.count(".no-result"), 1);
}
