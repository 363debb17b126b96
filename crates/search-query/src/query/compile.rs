//! Compilation of parsed queries into filter expressions.
//!
//! Each strategy owns its empty-operand rule:
//! - SIMPLE: an empty operand compiles to [`FilterExpression::Never`], so a
//!   blank search returns nothing instead of everything.
//! - OR: an empty operand is dropped from the union; with both empty the
//!   union is `Never`.
//! - NOT: an empty right operand drops the exclusion; the left operand
//!   follows the SIMPLE rule.

use super::expression::{FilterExpression, ParsedQuery, SearchStrategy};

/// Compiles a parsed query into a filter over the searchable fields.
///
/// Compilation is pure: the same query always yields an equal expression.
pub fn compile(query: &ParsedQuery) -> FilterExpression {
    match query.strategy() {
        SearchStrategy::Simple => simple_contains(query.left()),
        SearchStrategy::Or => union_of(query.left(), query.right()),
        SearchStrategy::Not => difference_of(query.left(), query.right()),
    }
}

fn simple_contains(term: &str) -> FilterExpression {
    if term.trim().is_empty() {
        return FilterExpression::Never;
    }
    FilterExpression::any_field_contains(term)
}

fn union_of(left: &str, right: Option<&str>) -> FilterExpression {
    let mut operands = [Some(left), right]
        .into_iter()
        .flatten()
        .filter_map(union_operand)
        .collect::<Vec<_>>();

    match operands.len() {
        0 => FilterExpression::Never,
        1 => operands.remove(0),
        _ => FilterExpression::Or(operands),
    }
}

/// `None` means the operand is skipped by the union.
fn union_operand(term: &str) -> Option<FilterExpression> {
    if term.trim().is_empty() {
        None
    } else {
        Some(FilterExpression::any_field_contains(term))
    }
}

fn difference_of(left: &str, right: Option<&str>) -> FilterExpression {
    let included = simple_contains(left);
    match right.and_then(exclusion_operand) {
        Some(excluded) => {
            FilterExpression::And(vec![included, FilterExpression::Not(Box::new(excluded))])
        }
        None => included,
    }
}

/// `None` means nothing is excluded.
fn exclusion_operand(term: &str) -> Option<FilterExpression> {
    if term.trim().is_empty() {
        None
    } else {
        Some(FilterExpression::any_field_contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fields::{FieldSource, SearchField};
    use crate::query::parser::QueryParser;

    #[derive(Default)]
    struct Record {
        isbn: Option<&'static str>,
        title: Option<&'static str>,
        subtitle: Option<&'static str>,
        author: Option<&'static str>,
        publisher: Option<&'static str>,
    }

    impl FieldSource for Record {
        fn field(&self, field: SearchField) -> Option<&str> {
            match field {
                SearchField::Isbn => self.isbn,
                SearchField::Title => self.title,
                SearchField::Subtitle => self.subtitle,
                SearchField::Author => self.author,
                SearchField::Publisher => self.publisher,
            }
        }
    }

    fn titled(title: &'static str) -> Record {
        Record {
            title: Some(title),
            ..Record::default()
        }
    }

    fn catalog() -> Vec<Record> {
        vec![
            Record {
                isbn: Some("9781617291609"),
                title: Some("MongoDB in Action, 2nd Edition"),
                subtitle: Some("Covers MongoDB version 3.0"),
                author: Some("Kyle Banker"),
                publisher: Some("Manning"),
            },
            Record {
                isbn: Some("9780596806750"),
                title: Some("JavaScript Test Patterns"),
                subtitle: Some("Build better applications with coding and design patterns"),
                author: Some("Stoyan Stefanov"),
                publisher: Some("O'Reilly Media"),
            },
            Record {
                isbn: Some("9780321146533"),
                title: Some("Test-Driven Development: By Example"),
                author: Some("Kent Beck"),
                publisher: Some("Addison-Wesley"),
                ..Record::default()
            },
            Record::default(),
        ]
    }

    fn matching<'a>(filter: &FilterExpression, records: &'a [Record]) -> Vec<&'a str> {
        records
            .iter()
            .filter(|record| filter.matches(*record))
            .map(|record| record.title.unwrap_or(""))
            .collect()
    }

    #[test]
    fn simple_with_empty_operand_matches_nothing() {
        let query = ParsedQuery::from_parts("", "", None, SearchStrategy::Simple);
        let filter = compile(&query);
        assert!(filter.is_never());
        assert!(matching(&filter, &catalog()).is_empty());
    }

    #[test]
    fn or_with_one_empty_operand_equals_simple_on_the_other() {
        let records = catalog();
        let simple = compile(&QueryParser::parse_literal("mongo").unwrap());

        let empty_right = ParsedQuery::from_parts(
            "mongo|",
            "mongo",
            Some(String::new()),
            SearchStrategy::Or,
        );
        let empty_left =
            ParsedQuery::from_parts("|mongo", "", Some("mongo".to_string()), SearchStrategy::Or);
        let missing_right = ParsedQuery::from_parts("mongo", "mongo", None, SearchStrategy::Or);

        for query in [empty_right, empty_left, missing_right] {
            let filter = compile(&query);
            assert_eq!(filter, simple);
            assert_eq!(matching(&filter, &records), matching(&simple, &records));
        }
    }

    #[test]
    fn or_with_both_operands_empty_matches_nothing() {
        let query = ParsedQuery::from_parts("|", "", Some(" ".to_string()), SearchStrategy::Or);
        let filter = compile(&query);
        assert!(filter.is_never());
        assert!(matching(&filter, &catalog()).is_empty());
    }

    #[test]
    fn not_with_empty_right_equals_simple_on_left() {
        let records = catalog();
        let simple = compile(&QueryParser::parse_literal("test").unwrap());

        let empty_right =
            ParsedQuery::from_parts("test-", "test", Some(String::new()), SearchStrategy::Not);
        let missing_right = ParsedQuery::from_parts("test", "test", None, SearchStrategy::Not);

        for query in [empty_right, missing_right] {
            let filter = compile(&query);
            assert_eq!(filter, simple);
            assert_eq!(matching(&filter, &records), matching(&simple, &records));
        }
    }

    #[test]
    fn not_with_empty_left_matches_nothing() {
        let query =
            ParsedQuery::from_parts("-tdd", "", Some("tdd".to_string()), SearchStrategy::Not);
        assert!(matching(&compile(&query), &catalog()).is_empty());
    }

    #[test]
    fn or_unions_across_all_fields() {
        let query = QueryParser::parse_with_operators("test|javascript").unwrap();
        let filter = compile(&query);
        assert_eq!(
            matching(&filter, &catalog()),
            vec![
                "JavaScript Test Patterns",
                "Test-Driven Development: By Example"
            ]
        );
    }

    #[test]
    fn not_subtracts_the_right_operand() {
        let query = QueryParser::parse_with_operators("test-javascript").unwrap();
        let filter = compile(&query);
        assert_eq!(
            matching(&filter, &catalog()),
            vec!["Test-Driven Development: By Example"]
        );
    }

    #[test]
    fn not_excludes_on_any_field() {
        let query = QueryParser::parse_with_operators("a - manning").unwrap();
        let records = catalog();
        let titles = matching(&compile(&query), &records);
        assert!(!titles.contains(&"MongoDB in Action, 2nd Edition"));
        assert!(titles.contains(&"JavaScript Test Patterns"));
    }

    #[test]
    fn compiling_twice_selects_the_same_records() {
        let records = catalog();
        for raw in ["test|javascript", "test-javascript", "action", "9781617291609"] {
            let query = QueryParser::parse_with_operators(raw).unwrap();
            let first = compile(&query);
            let second = compile(&query);
            assert_eq!(first, second);
            assert_eq!(matching(&first, &records), matching(&second, &records));
        }
    }

    #[test]
    fn literal_operator_text_is_matched_verbatim() {
        let records = vec![titled("Mongo-Java Recipes"), titled("Java Basics")];
        let filter = compile(&QueryParser::parse_literal("MONGO-JAVA").unwrap());
        assert_eq!(matching(&filter, &records), vec!["Mongo-Java Recipes"]);
    }
}
