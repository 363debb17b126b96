//! Searchable record fields.

use serde::{Deserialize, Serialize};

/// A text field that filter atoms can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Isbn,
    Title,
    Subtitle,
    Author,
    Publisher,
}

/// The fixed, ordered field set every containment atom spans.
pub const SEARCH_FIELDS: [SearchField; 5] = [
    SearchField::Isbn,
    SearchField::Title,
    SearchField::Subtitle,
    SearchField::Author,
    SearchField::Publisher,
];

impl SearchField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Isbn => "isbn",
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Author => "author",
            Self::Publisher => "publisher",
        }
    }
}

/// Read access to the searchable fields of a record.
///
/// A missing value is reported as `None`; matching treats it as an empty
/// string rather than failing the whole expression.
pub trait FieldSource {
    fn field(&self, field: SearchField) -> Option<&str>;
}
