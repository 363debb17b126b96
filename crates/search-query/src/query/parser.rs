//! Query classifier and parser.

use crate::error::{QueryError, Result};

use super::expression::{ParsedQuery, SearchStrategy};
use super::normalize::{collapse_operator_whitespace, normalize_query, NOT_OPERATOR, OR_OPERATOR};

// ---------------------------------------------------------------------------
// Query parser
// ---------------------------------------------------------------------------

/// Entry points that classify raw query text into a [`ParsedQuery`].
pub struct QueryParser;

impl QueryParser {
    /// Parses a keyword literally: operator symbols are ordinary text.
    pub fn parse_literal<'a>(raw: impl Into<Option<&'a str>>) -> Result<ParsedQuery> {
        Self::parse_internal(raw.into(), false)
    }

    /// Parses a query that may use one operator: `a|b` (OR) or `a-b` (NOT).
    ///
    /// Whitespace around the operator is insignificant. Mixing both operators,
    /// repeating one, or leaving an operand empty is rejected.
    pub fn parse_with_operators<'a>(raw: impl Into<Option<&'a str>>) -> Result<ParsedQuery> {
        Self::parse_internal(raw.into(), true)
    }

    fn parse_internal(raw: Option<&str>, allow_operators: bool) -> Result<ParsedQuery> {
        let normalized = normalize_query(raw)?;
        if !allow_operators {
            return Ok(ParsedQuery::simple(normalized));
        }

        let collapsed = collapse_operator_whitespace(&normalized);
        let has_or = collapsed.contains(OR_OPERATOR);
        let has_not = collapsed.contains(NOT_OPERATOR);

        if has_or && has_not {
            return Err(QueryError::invalid(
                "use only one operator: '|' or '-' with up to 2 keywords",
            ));
        }

        let parsed = if has_or {
            let (left, right) = split_operands(&collapsed, OR_OPERATOR)
                .ok_or_else(|| QueryError::invalid("invalid OR query, use 'a|b'"))?;
            ParsedQuery::binary(collapsed, left, right, SearchStrategy::Or)
        } else if has_not {
            let (left, right) = split_operands(&collapsed, NOT_OPERATOR)
                .ok_or_else(|| QueryError::invalid("invalid NOT query, use 'a-b'"))?;
            ParsedQuery::binary(collapsed, left, right, SearchStrategy::Not)
        } else {
            ParsedQuery::simple(normalized)
        };

        log::debug!(
            "parsed search query strategy={} normalized={:?}",
            parsed.strategy(),
            parsed.normalized()
        );
        Ok(parsed)
    }
}

// ---------------------------------------------------------------------------
// Operand splitting
// ---------------------------------------------------------------------------

/// Splits on `operator`, requiring exactly two non-blank operands.
fn split_operands(input: &str, operator: char) -> Option<(String, String)> {
    let mut parts = input.split(operator);
    let left = parts.next()?.trim();
    let right = parts.next()?.trim();
    if parts.next().is_some() || left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left.to_string(), right.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(raw: Option<&str>) {
        match QueryParser::parse_with_operators(raw) {
            Err(QueryError::InvalidQuery(_)) => {}
            other => panic!("expected InvalidQuery for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_simple_keyword() {
        let query = QueryParser::parse_with_operators("  HelloWorld  ").unwrap();
        assert_eq!(query.normalized(), "helloworld");
        assert_eq!(query.left(), "helloworld");
        assert_eq!(query.right(), None);
        assert_eq!(query.strategy(), SearchStrategy::Simple);
    }

    #[test]
    fn parses_or_operation() {
        let query = QueryParser::parse_with_operators("a|B").unwrap();
        assert_eq!(query.normalized(), "a|b");
        assert_eq!(query.left(), "a");
        assert_eq!(query.right(), Some("b"));
        assert_eq!(query.strategy(), SearchStrategy::Or);
    }

    #[test]
    fn parses_not_operation() {
        let query = QueryParser::parse_with_operators("tdd-JavaScript").unwrap();
        assert_eq!(query.normalized(), "tdd-javascript");
        assert_eq!(query.left(), "tdd");
        assert_eq!(query.right(), Some("javascript"));
        assert_eq!(query.strategy(), SearchStrategy::Not);
    }

    #[test]
    fn equivalent_or_spellings_parse_identically() {
        let expected = QueryParser::parse_with_operators("a|b").unwrap();
        for raw in ["a | b", "A|B", "  a   |   B  "] {
            assert_eq!(QueryParser::parse_with_operators(raw).unwrap(), expected);
        }
    }

    #[test]
    fn surrounding_whitespace_is_collapsed() {
        let query = QueryParser::parse_with_operators("tdd - Learn javascript").unwrap();
        assert_eq!(query.normalized(), "tdd-learn javascript");
        assert_eq!(query.left(), "tdd");
        assert_eq!(query.right(), Some("learn javascript"));
        assert_eq!(query.strategy(), SearchStrategy::Not);
    }

    #[test]
    fn rejects_blank_or_absent_input() {
        assert_invalid(None);
        assert_invalid(Some(""));
        assert_invalid(Some("   "));
    }

    #[test]
    fn rejects_malformed_or_queries() {
        assert_invalid(Some("a|"));
        assert_invalid(Some("|b"));
        assert_invalid(Some("a|b|c"));
        assert_invalid(Some(" | "));
    }

    #[test]
    fn rejects_malformed_not_queries() {
        assert_invalid(Some("a-"));
        assert_invalid(Some("-b"));
        assert_invalid(Some("a-b-c"));
    }

    #[test]
    fn rejects_mixed_operators() {
        assert_invalid(Some("a|b-c"));
        assert_invalid(Some("a-b|c"));
    }

    #[test]
    fn literal_mode_keeps_operators_as_text() {
        let query = QueryParser::parse_literal("  Mongo-Java | Spring ").unwrap();
        assert_eq!(query.normalized(), "mongo-java | spring");
        assert_eq!(query.left(), "mongo-java | spring");
        assert_eq!(query.right(), None);
        assert_eq!(query.strategy(), SearchStrategy::Simple);
    }

    #[test]
    fn literal_mode_still_rejects_blank_input() {
        assert!(QueryParser::parse_literal(None::<&str>).is_err());
        assert!(QueryParser::parse_literal(" ").is_err());
    }

    #[test]
    fn operator_mode_matches_literal_mode_without_reserved_characters() {
        for raw in ["Spring Boot", "  TDD  ", "mongodb in action", "Ünïcode Bücher"] {
            let literal = QueryParser::parse_literal(raw).unwrap();
            let parsed = QueryParser::parse_with_operators(raw).unwrap();
            assert_eq!(parsed.strategy(), SearchStrategy::Simple);
            assert_eq!(parsed.left(), literal.left());
            assert_eq!(parsed, literal);
        }
    }
}
