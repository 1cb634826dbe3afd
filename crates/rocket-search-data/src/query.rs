//! Structured row queries.
//!
//! A [`RowQuery`] describes what the search engine wants from a table: a
//! substring filter over some text columns and a set of ids to leave out.
//! Stores evaluate it either row by row ([`TextFilter::matches`]) or by
//! translating it into polars expressions ([`RowQuery::predicate`]). Query
//! text only ever travels as a literal value, never as part of an expression
//! string.

use ahash::AHashSet;
use polars::prelude::*;

use crate::row::{Row, TextField};

pub const ID_COLUMN: &str = "id";

/// Substring match of one needle against any of several text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFilter {
    needle: String,
    fields: Vec<TextField>,
    case_sensitive: bool,
}

impl TextFilter {
    /// Case-insensitive filter for `query` over `fields`.
    pub fn new(query: &str, fields: &[TextField]) -> Self {
        Self {
            needle: query.to_owned(),
            fields: fields.to_vec(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    fn normalized_needle(&self) -> String {
        if self.case_sensitive {
            self.needle.clone()
        } else {
            self.needle.to_lowercase()
        }
    }

    /// An empty needle matches every row.
    pub fn is_match_all(&self) -> bool {
        self.needle.is_empty()
    }

    /// True when any listed field contains the needle.
    ///
    /// With no fields and a non-empty needle nothing matches.
    pub fn matches(&self, row: &Row) -> bool {
        if self.is_match_all() {
            return true;
        }
        let needle = self.normalized_needle();
        self.fields.iter().any(|&field| {
            row.text(field).is_some_and(|value| {
                if self.case_sensitive {
                    value.contains(needle.as_str())
                } else {
                    value.to_lowercase().contains(needle.as_str())
                }
            })
        })
    }

    /// Polars predicate for this filter, `None` when every row matches.
    pub fn to_expr(&self) -> Option<Expr> {
        if self.is_match_all() {
            return None;
        }
        let needle = self.normalized_needle();
        let expr = self
            .fields
            .iter()
            .map(|field| {
                let column = col(field.column_name());
                let haystack = if self.case_sensitive {
                    column
                } else {
                    column.str().to_lowercase()
                };
                haystack
                    .str()
                    .contains_literal(lit(needle.clone()))
                    .fill_null(lit(false))
            })
            .reduce(|acc, expr| acc.or(expr))
            .unwrap_or_else(|| lit(false));
        Some(expr)
    }
}

/// A read against one table of the storage collaborator.
#[derive(Debug, Clone)]
pub struct RowQuery<'a> {
    pub table: &'a str,
    pub text: TextFilter,
    pub exclude_ids: &'a AHashSet<String>,
}

impl<'a> RowQuery<'a> {
    pub fn new(table: &'a str, text: TextFilter, exclude_ids: &'a AHashSet<String>) -> Self {
        Self {
            table,
            text,
            exclude_ids,
        }
    }

    pub fn is_excluded(&self, row: &Row) -> bool {
        self.exclude_ids.contains(&row.id)
    }

    /// Row-by-row evaluation used by in-memory stores.
    pub fn accepts(&self, row: &Row) -> bool {
        !self.is_excluded(row) && self.text.matches(row)
    }

    /// Combined text and exclusion predicate, `None` when nothing is filtered.
    pub fn predicate(&self) -> Option<Expr> {
        let exclusion = self.exclusion_expr();
        match (self.text.to_expr(), exclusion) {
            (Some(text), Some(exclusion)) => Some(text.and(exclusion)),
            (text, exclusion) => text.or(exclusion),
        }
    }

    fn exclusion_expr(&self) -> Option<Expr> {
        if self.exclude_ids.is_empty() {
            return None;
        }
        let ids: Vec<&str> = self.exclude_ids.iter().map(String::as_str).collect();
        Some(
            col(ID_COLUMN)
                .is_in(lit(Series::new("exclude_ids".into(), ids)).implode(), false)
                .not(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slc() -> Row {
        Row::new("slc", "Salt Lake City", 40.7765868, -111.9905245).with_country("United States")
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let filter = TextFilter::new("", &[TextField::Name]);
        assert!(filter.is_match_all());
        assert!(filter.matches(&slc()));
        assert!(filter.to_expr().is_none());
    }

    #[test]
    fn test_substring_is_case_insensitive_by_default() {
        let filter = TextFilter::new("lake", &[TextField::Name]);
        assert!(filter.matches(&slc()));

        let strict = TextFilter::new("lake", &[TextField::Name]).case_sensitive(true);
        assert!(!strict.matches(&slc()));
        assert!(strict.case_sensitive(false).matches(&slc()));
    }

    #[test]
    fn test_matches_any_field() {
        let filter = TextFilter::new("states", &[TextField::Name, TextField::Country]);
        assert!(filter.matches(&slc()));

        let name_only = TextFilter::new("states", &[TextField::Name]);
        assert!(!name_only.matches(&slc()));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let starport = Row::new("s1", "Thames Orbital", 51.5, 0.05);
        let filter = TextFilter::new("uk", &[TextField::Country]);
        assert!(!filter.matches(&starport));
    }

    #[test]
    fn test_no_fields_matches_nothing() {
        let filter = TextFilter::new("salt", &[]);
        assert!(!filter.matches(&slc()));
        assert!(filter.to_expr().is_some());
    }

    #[test]
    fn test_exclusion_wins_over_text_match() {
        let excluded: AHashSet<String> = ["slc".to_string()].into_iter().collect();
        let query = RowQuery::new("cities", TextFilter::new("salt", &[TextField::Name]), &excluded);
        assert!(!query.accepts(&slc()));

        let nothing = AHashSet::new();
        let query = RowQuery::new("cities", TextFilter::new("salt", &[TextField::Name]), &nothing);
        assert!(query.accepts(&slc()));
    }

    #[test]
    fn test_predicate_presence() {
        let nothing = AHashSet::new();
        let query = RowQuery::new("cities", TextFilter::new("", &[TextField::Name]), &nothing);
        assert!(query.predicate().is_none());

        let excluded: AHashSet<String> = ["slc".to_string()].into_iter().collect();
        let query = RowQuery::new("cities", TextFilter::new("", &[TextField::Name]), &excluded);
        assert!(query.predicate().is_some());
    }
}
