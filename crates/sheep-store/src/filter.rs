//! Translation of web-form selections into a predicate over the
//! `benchmarks` table.

use std::collections::HashMap;

/// Recognized form fields and the benchmark column each one constrains.
/// Iterated in this order so the generated SQL is deterministic regardless
/// of map ordering.
const FIELD_COLUMNS: [(&str, &str); 4] = [
    ("context_selections", "context_name"),
    ("gate_selections", "gate_name"),
    ("input_type_width", "input_bitwidth"),
    ("input_type_signed", "input_signed"),
];

/// A conjunction of per-field `IN` disjunctions, carried as a parameterized
/// SQL fragment plus owned bind values. The empty filter matches every row.
///
/// Values bind as text; SQLite's column affinity covers the integer and
/// boolean columns, matching how the form submits everything as strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<String>,
    params: Vec<String>,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// SQL fragment to append to a SELECT on benchmarks, including the
    /// leading ` WHERE`. Empty string for the identity filter.
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn params(&self) -> impl Iterator<Item = &String> {
        self.params.iter()
    }
}

/// Convert the PlotsForm selections into a [`Filter`]. Unrecognized field
/// names are skipped, not an error; so are recognized fields with no
/// selected values.
pub fn build_filter(selections: &HashMap<String, Vec<String>>) -> Filter {
    let mut filter = Filter::default();
    for (field, column) in FIELD_COLUMNS {
        let Some(values) = selections.get(field) else {
            continue;
        };
        if values.is_empty() {
            continue;
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        filter
            .clauses
            .push(format!("{} IN ({})", column, placeholders));
        filter.params.extend(values.iter().cloned());
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selections(pairs: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn empty_selections_yield_identity() {
        let filter = build_filter(&HashMap::new());
        assert!(filter.is_empty());
        assert_eq!(filter.where_clause(), "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let filter = build_filter(&selections(&[("unknown_field", &["x"])]));
        assert_eq!(filter, build_filter(&HashMap::new()));
    }

    #[test]
    fn one_field_becomes_an_in_clause() {
        let filter = build_filter(&selections(&[("context_selections", &["HElib", "SEAL"])]));
        assert_eq!(filter.where_clause(), " WHERE context_name IN (?, ?)");
        assert_eq!(
            filter.params().collect::<Vec<_>>(),
            ["HElib", "SEAL"]
        );
    }

    #[test]
    fn fields_combine_with_and_in_fixed_order() {
        let filter = build_filter(&selections(&[
            ("input_type_width", &["8"]),
            ("context_selections", &["HElib"]),
        ]));
        assert_eq!(
            filter.where_clause(),
            " WHERE context_name IN (?) AND input_bitwidth IN (?)"
        );
    }

    #[test]
    fn empty_value_list_is_skipped() {
        let filter = build_filter(&selections(&[("gate_selections", &[])]));
        assert!(filter.is_empty());
    }
}
