//! Composable filter predicates for record lookups.
//!
//! Column names are `'static` identifiers chosen by the code; user input only
//! ever reaches SQL as bound values.

use crate::db::{fold_case, FOLD_FUNCTION};
use crate::model::RecordId;
use rusqlite::types::Value;

/// Conjunction of predicates applied to a record lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    clauses: Vec<String>,
    binds: Vec<Value>,
}

impl RecordFilter {
    /// Empty filter matching every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact text match.
    pub fn eq_text(mut self, column: &'static str, value: &str) -> Self {
        self.clauses.push(format!("{column} = ?"));
        self.binds.push(Value::Text(value.to_string()));
        self
    }

    /// Exact id match.
    pub fn eq_id(mut self, column: &'static str, value: RecordId) -> Self {
        self.clauses.push(format!("{column} = ?"));
        self.binds.push(Value::Integer(value));
        self
    }

    /// Case-insensitive substring match; `%` and `_` in `needle` are literal.
    ///
    /// Both sides are folded with Unicode lowercase mapping, so `área`
    /// matches `Área`. Requires a connection opened through `crate::db`.
    pub fn contains_ignore_case(mut self, column: &'static str, needle: &str) -> Self {
        self.clauses
            .push(format!("{FOLD_FUNCTION}({column}) LIKE ? ESCAPE '\\'"));
        self.binds.push(Value::Text(format!(
            "%{}%",
            escape_like(&fold_case(needle))
        )));
        self
    }

    /// Restricts to rows whose `enable` flag equals `enabled`.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.clauses.push("enable = ?".to_string());
        self.binds.push(Value::Integer(i64::from(enabled)));
        self
    }

    pub(crate) fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub(crate) fn binds(&self) -> &[Value] {
        &self.binds
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_like, RecordFilter};
    use rusqlite::types::Value;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let filter = RecordFilter::new();
        assert_eq!(filter.where_clause(), "");
        assert!(filter.binds().is_empty());
    }

    #[test]
    fn predicates_are_joined_with_and_in_order() {
        let filter = RecordFilter::new()
            .eq_text("profile", "FARMER")
            .eq_id("app_id", 3)
            .enabled(true);
        assert_eq!(
            filter.where_clause(),
            " WHERE profile = ? AND app_id = ? AND enable = ?"
        );
        assert_eq!(
            filter.binds(),
            &[
                Value::Text("FARMER".to_string()),
                Value::Integer(3),
                Value::Integer(1)
            ]
        );
    }

    #[test]
    fn like_wildcards_in_needle_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        let filter = RecordFilter::new().contains_ignore_case("name", "est");
        assert_eq!(filter.binds(), &[Value::Text("%est%".to_string())]);
    }

    #[test]
    fn contains_ignore_case_folds_column_and_needle() {
        let filter = RecordFilter::new().contains_ignore_case("name", "ÁREA_1");
        assert_eq!(
            filter.where_clause(),
            " WHERE aclimate_fold(name) LIKE ? ESCAPE '\\'"
        );
        assert_eq!(filter.binds(), &[Value::Text("%área\\_1%".to_string())]);
    }
}
