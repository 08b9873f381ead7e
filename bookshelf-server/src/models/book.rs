//! Book record and validated creation input

use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for `title` and `author`, matching the `VARCHAR(100)` columns.
pub const MAX_FIELD_LEN: usize = 100;

/// A persisted book. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
}

/// Validated input for creating a book.
///
/// Both fields are guaranteed present, non-blank and within [`MAX_FIELD_LEN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    title: String,
    author: String,
}

impl NewBook {
    /// Validate raw request fields.
    ///
    /// `title` is checked before `author`, so the first offending field is reported.
    ///
    /// # Example
    /// ```
    /// use bookshelf_server::models::NewBook;
    ///
    /// assert!(NewBook::new(Some("Dune".into()), Some("Frank Herbert".into())).is_ok());
    /// assert!(NewBook::new(Some("".into()), Some("X".into())).is_err());
    /// assert!(NewBook::new(None, Some("X".into())).is_err());
    /// ```
    pub fn new(title: Option<String>, author: Option<String>) -> Result<Self, ValidationError> {
        let title = required("title", title)?;
        let author = required("author", author)?;
        Ok(Self { title, author })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Build without validation, to exercise store-side rejection.
    #[cfg(test)]
    pub(crate) fn unchecked(title: &str, author: &str) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
        }
    }

    /// Attach a store-assigned id.
    pub fn into_book(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
        }
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.contains('\0') {
        return Err(ValidationError::InvalidCharacter { field });
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_FIELD_LEN,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn accepts_valid_fields() {
        let book = NewBook::new(s("Dune"), s("Frank Herbert")).unwrap();
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Frank Herbert");
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(
            NewBook::new(None, s("X")).unwrap_err(),
            ValidationError::Missing { field: "title" }
        );
        assert_eq!(
            NewBook::new(s("X"), None).unwrap_err(),
            ValidationError::Missing { field: "author" }
        );
    }

    #[test]
    fn rejects_empty_and_blank_fields() {
        assert_eq!(
            NewBook::new(s(""), s("X")).unwrap_err(),
            ValidationError::Empty { field: "title" }
        );
        assert_eq!(
            NewBook::new(s("X"), s("   ")).unwrap_err(),
            ValidationError::Empty { field: "author" }
        );
    }

    #[test]
    fn rejects_nul_characters() {
        assert_eq!(
            NewBook::new(s("Du\0ne"), s("X")).unwrap_err(),
            ValidationError::InvalidCharacter { field: "title" }
        );
        assert_eq!(
            NewBook::new(s("X"), s("\0")).unwrap_err(),
            ValidationError::InvalidCharacter { field: "author" }
        );
    }

    #[test]
    fn length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_FIELD_LEN);
        assert!(NewBook::new(Some(at_limit), s("X")).is_ok());

        let over = "a".repeat(MAX_FIELD_LEN + 1);
        assert_eq!(
            NewBook::new(s("X"), Some(over)).unwrap_err(),
            ValidationError::TooLong {
                field: "author",
                max: MAX_FIELD_LEN
            }
        );
    }

    #[test]
    fn serializes_as_plain_record() {
        let book = NewBook::new(s("Dune"), s("Frank Herbert"))
            .unwrap()
            .into_book(1);
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "title": "Dune", "author": "Frank Herbert"})
        );
    }
}
