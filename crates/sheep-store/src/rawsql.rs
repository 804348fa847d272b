//! Ad-hoc SQL execution for operator-supplied query strings.
//!
//! The table/column extraction below is a first-match heuristic kept for the
//! query page's header display: it only understands single-table queries with
//! bare identifiers. Joins, subqueries, quoting, comments and multi-statement
//! input all fall through to empty headers. The query itself runs verbatim,
//! so this path must only ever see text from a trusted operator.

use crate::storage::store::Store;
use anyhow::Context;
use regex::Regex;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::sync::OnceLock;

fn table_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bfrom\s+(\w+)").expect("hard-coded pattern"))
}

fn column_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bselect\s+([\w*,\s]+?)\s+from\b").expect("hard-coded pattern"))
}

/// Best-effort extraction of the queried table and column list. No match
/// yields `(None, [])` rather than an error; callers showing headers must
/// treat empty output defensively.
pub fn get_table_and_columns(query: &str) -> (Option<String>, Vec<String>) {
    let table = table_regex()
        .captures(query)
        .map(|caps| caps[1].to_string());
    let columns = column_regex()
        .captures(query)
        .map(|caps| {
            caps[1]
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect()
        })
        .unwrap_or_default();
    (table, columns)
}

impl Store {
    /// Execute a free-text query verbatim, returning `(headers, rows)`.
    ///
    /// When the query selects `*` (or no column list could be extracted) the
    /// headers are recovered from `PRAGMA table_info` on the extracted table.
    pub fn execute_raw(&self, query: &str) -> anyhow::Result<(Vec<String>, Vec<Vec<Value>>)> {
        let (table, mut columns) = get_table_and_columns(query);
        let conn = self.conn.lock().unwrap();

        if let Some(table) = table {
            if columns.is_empty() || columns[0] == "*" {
                columns = table_columns(&conn, &table).unwrap_or_default();
            }
        }

        let mut stmt = conn
            .prepare(query)
            .with_context(|| format!("failed to prepare query: {}", query))?;
        let column_count = stmt.column_count();
        let mut rows = stmt.query([])?;

        let mut output = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(row.get::<_, Value>(i)?);
            }
            output.push(values);
        }
        Ok((columns, output))
    }
}

/// Ordered column names of a table, via `PRAGMA table_info`. An unknown
/// table produces no rows, hence an empty list.
fn table_columns(conn: &Connection, table: &str) -> anyhow::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::get_table_and_columns;

    #[test]
    fn extracts_table_and_star() {
        let (table, columns) = get_table_and_columns("SELECT * FROM benchmarks");
        assert_eq!(table.as_deref(), Some("benchmarks"));
        assert_eq!(columns, vec!["*"]);
    }

    #[test]
    fn extracts_explicit_columns() {
        let (table, columns) =
            get_table_and_columns("select context_name,gate_name from benchmarks where depth > 2");
        assert_eq!(table.as_deref(), Some("benchmarks"));
        assert_eq!(columns, vec!["context_name", "gate_name"]);
    }

    #[test]
    fn trims_spaced_column_lists() {
        let (_, columns) = get_table_and_columns("SELECT context_name, gate_name FROM benchmarks");
        assert_eq!(columns, vec!["context_name", "gate_name"]);
    }

    #[test]
    fn no_from_clause_yields_nothing() {
        let (table, columns) = get_table_and_columns("PRAGMA user_version");
        assert_eq!(table, None);
        assert!(columns.is_empty());
    }

    #[test]
    fn first_match_wins_on_joins() {
        // Known limitation: only the first FROM target is captured.
        let (table, _) = get_table_and_columns(
            "SELECT a.id FROM benchmarks a JOIN mid_level_benchmarks b ON a.id = b.id",
        );
        assert_eq!(table.as_deref(), Some("benchmarks"));
    }
}
