//! SQL scalar functions installed on every core connection.
//!
//! # Invariants
//! - `aclimate_fold(text)` lowercases with full Unicode case mapping and
//!   passes `NULL` through.
//! - Folding in SQL and in Rust (`fold_case`) yields identical strings.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

pub(crate) const FOLD_FUNCTION: &str = "aclimate_fold";

/// Case fold shared by SQL predicates and their bound needles.
pub(crate) fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

pub(crate) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|value| fold_case(&value)))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::{fold_case, register_functions};
    use rusqlite::Connection;

    #[test]
    fn fold_lowercases_accented_letters() {
        let conn = Connection::open_in_memory().unwrap();
        register_functions(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT aclimate_fold('Clima ÁREA Ñuble');", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "clima área ñuble");
        assert_eq!(folded, fold_case("Clima ÁREA Ñuble"));

        let null: Option<String> = conn
            .query_row("SELECT aclimate_fold(NULL);", [], |row| row.get(0))
            .unwrap();
        assert!(null.is_none());
    }
}
