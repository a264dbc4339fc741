/// Result of filtering table rows on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    /// Indices of rows whose cell does not contain the query
    pub hidden: Vec<usize>,
    /// Total number of rows considered
    pub total: usize,
}

impl FilterOutcome {
    /// True when every row is hidden, including the degenerate empty table.
    pub fn nothing_matches(&self) -> bool {
        self.hidden.len() == self.total
    }

    pub fn is_hidden(&self, row: usize) -> bool {
        self.hidden.binary_search(&row).is_ok()
    }
}

/// Case-insensitive substring test used by the table filter.
pub fn cell_matches(cell: &str, query: &str) -> bool {
    cell.to_lowercase().contains(&query.to_lowercase())
}

/// Decide which rows to hide for `query`.
///
/// Each item is the text of the filtered column for one row, or `None` when
/// the row has no such cell. Missing cells count as empty text.
pub fn filter_rows<I, S>(cells: I, query: &str) -> FilterOutcome
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let query = query.to_lowercase();
    let mut outcome = FilterOutcome::default();
    for (i, cell) in cells.into_iter().enumerate() {
        outcome.total += 1;
        let text = cell.as_ref().map(|c| c.as_ref()).unwrap_or("");
        if !cell_matches(text, &query) {
            outcome.hidden.push(i);
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hides_non_matching_rows() {
        let outcome = filter_rows(
            vec![Some("Alice"), Some("Bob"), Some("alicia")],
            "ALI",
        );
        assert_eq!(outcome.hidden, vec![1]);
        assert!(!outcome.nothing_matches());
        assert!(outcome.is_hidden(1));
        assert!(!outcome.is_hidden(0));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let outcome = filter_rows(vec![Some("a"), Some(""), None::<&str>], "");
        assert!(outcome.hidden.is_empty());
        assert_eq!(outcome.total, 3);
    }

    #[test]
    fn test_missing_cell_is_hidden_for_non_empty_query() {
        let outcome = filter_rows(vec![Some("x"), None], "x");
        assert_eq!(outcome.hidden, vec![1]);
    }

    #[test]
    fn test_nothing_matches() {
        let outcome = filter_rows(vec![Some("a"), Some("b"), Some("c")], "zzz");
        assert_eq!(outcome.hidden, vec![0, 1, 2]);
        assert!(outcome.nothing_matches());
    }

    #[test]
    fn test_empty_table_counts_as_no_match() {
        let outcome = filter_rows(Vec::<Option<String>>::new(), "a");
        assert!(outcome.nothing_matches());
    }
}
