//! Query text normalization.

use crate::error::{QueryError, Result};

pub(crate) const OR_OPERATOR: char = '|';
pub(crate) const NOT_OPERATOR: char = '-';

/// Normalizes raw query text: trims and lowercases it.
///
/// Lowercasing uses Unicode default case mapping, which does not depend on
/// the process locale. Absent or blank input is rejected.
pub fn normalize_query<'a>(raw: impl Into<Option<&'a str>>) -> Result<String> {
    let Some(raw) = raw.into() else {
        return Err(QueryError::invalid("search query must not be null"));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QueryError::invalid("search query must not be blank"));
    }
    Ok(trimmed.to_lowercase())
}

/// Removes whitespace directly around operator symbols: `"a | b"` becomes `"a|b"`.
pub(crate) fn collapse_operator_whitespace(input: &str) -> String {
    let mut collapsed = String::with_capacity(input.len());
    let mut after_operator = false;

    for ch in input.chars() {
        if is_operator(ch) {
            let kept = collapsed.trim_end().len();
            collapsed.truncate(kept);
            collapsed.push(ch);
            after_operator = true;
            continue;
        }
        if after_operator && ch.is_whitespace() {
            continue;
        }
        after_operator = false;
        collapsed.push(ch);
    }

    collapsed
}

fn is_operator(ch: char) -> bool {
    ch == OR_OPERATOR || ch == NOT_OPERATOR
}
