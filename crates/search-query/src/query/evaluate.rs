//! Filter evaluation against records.

use super::expression::FilterExpression;
use super::fields::FieldSource;

impl FilterExpression {
    /// Evaluates the expression against a single record.
    ///
    /// An empty AND matches; an empty OR does not.
    pub fn matches<R: FieldSource + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Contains { field, needle } => {
                let value = record.field(*field).unwrap_or_default();
                field_contains(value, needle)
            }
            Self::Not(inner) => !inner.matches(record),
            Self::And(parts) => parts.iter().all(|part| part.matches(record)),
            Self::Or(parts) => parts.iter().any(|part| part.matches(record)),
        }
    }
}

/// `needle` is expected to be lowercased already.
fn field_contains(value: &str, needle: &str) -> bool {
    if value.is_empty() {
        return needle.is_empty();
    }
    value.to_lowercase().contains(needle)
}
