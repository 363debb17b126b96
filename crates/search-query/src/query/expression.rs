//! Parsed query values and filter expression nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fields::{SearchField, SEARCH_FIELDS};

/// How the operands of a parsed query combine into a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Containment of the single operand.
    #[serde(rename = "SIMPLE")]
    Simple,
    /// Union of the containment of both operands (`a|b`).
    #[serde(rename = "OR_OPERATION")]
    Or,
    /// Containment of the left operand minus containment of the right (`a-b`).
    #[serde(rename = "NOT_OPERATION")]
    Not,
}

impl SearchStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Or => "OR_OPERATION",
            Self::Not => "NOT_OPERATION",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable, classified query.
///
/// Values produced by [`QueryParser`](super::QueryParser) always satisfy:
/// `normalized` is trimmed, lowercased and non-empty; `right` is present iff
/// the strategy is OR or NOT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    normalized: String,
    left: String,
    right: Option<String>,
    strategy: SearchStrategy,
}

impl ParsedQuery {
    pub(crate) fn simple(normalized: String) -> Self {
        Self {
            left: normalized.clone(),
            normalized,
            right: None,
            strategy: SearchStrategy::Simple,
        }
    }

    pub(crate) fn binary(
        normalized: String,
        left: String,
        right: String,
        strategy: SearchStrategy,
    ) -> Self {
        Self {
            normalized,
            left,
            right: Some(right),
            strategy,
        }
    }

    /// Assembles a parsed query from raw parts without validating them.
    ///
    /// Intended for queries built outside the parser (stored searches, tests).
    /// The compiler tolerates empty operands in values built this way.
    pub fn from_parts(
        normalized: impl Into<String>,
        left: impl Into<String>,
        right: Option<String>,
        strategy: SearchStrategy,
    ) -> Self {
        Self {
            normalized: normalized.into(),
            left: left.into(),
            right,
            strategy,
        }
    }

    /// The normalized query text; this is the value popularity is tracked under.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> Option<&str> {
        self.right.as_deref()
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }
}

/// A composable boolean filter over the searchable record fields (AST node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterExpression {
    /// Matches every record.
    Always,
    /// Matches no record.
    Never,
    /// Case-insensitive substring test on one field; a missing field reads as "".
    Contains {
        field: SearchField,
        /// Already lowercased.
        needle: String,
    },
    Not(Box<FilterExpression>),
    And(Vec<FilterExpression>),
    Or(Vec<FilterExpression>),
}

impl FilterExpression {
    /// Builds the union of per-field containment atoms for `term`.
    ///
    /// Callers decide what an empty term means; this only builds atoms.
    pub(crate) fn any_field_contains(term: &str) -> Self {
        let needle = term.to_lowercase();
        Self::Or(
            SEARCH_FIELDS
                .iter()
                .map(|field| Self::Contains {
                    field: *field,
                    needle: needle.clone(),
                })
                .collect(),
        )
    }

    /// Returns true if evaluating this expression cannot match any record.
    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("TRUE"),
            Self::Never => f.write_str("FALSE"),
            Self::Contains { field, needle } => write!(f, "{}~{:?}", field.as_str(), needle),
            Self::Not(inner) => write!(f, "NOT {inner}"),
            Self::And(parts) => write_joined(f, parts, " AND "),
            Self::Or(parts) => write_joined(f, parts, " OR "),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    parts: &[FilterExpression],
    separator: &str,
) -> fmt::Result {
    f.write_str("(")?;
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{part}")?;
    }
    f.write_str(")")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_span_every_field_in_order() {
        let FilterExpression::Or(atoms) = FilterExpression::any_field_contains("Rust") else {
            panic!("expected a union of atoms");
        };
        let fields = atoms
            .iter()
            .map(|atom| match atom {
                FilterExpression::Contains { field, needle } => {
                    assert_eq!(needle, "rust");
                    *field
                }
                other => panic!("unexpected node {other:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(fields, SEARCH_FIELDS.to_vec());
    }

    #[test]
    fn strategy_uses_wire_names() {
        assert_eq!(SearchStrategy::Or.to_string(), "OR_OPERATION");
        assert_eq!(SearchStrategy::Not.as_str(), "NOT_OPERATION");
        assert_eq!(SearchStrategy::Simple.as_str(), "SIMPLE");
    }

    #[test]
    fn displays_compact_form() {
        let expression = FilterExpression::And(vec![
            FilterExpression::Contains {
                field: SearchField::Title,
                needle: "tdd".to_string(),
            },
            FilterExpression::Not(Box::new(FilterExpression::Never)),
        ]);
        assert_eq!(expression.to_string(), "(title~\"tdd\" AND NOT FALSE)");
    }
}
