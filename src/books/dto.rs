use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::books::domain::model::BookEntity;
use crate::books::domain::UNKNOWN;
use crate::core::library::{LibraryError, LibraryResult};

// Legacy remote catalogs mark superseding records with this exact string.
pub const LEGACY_EDITED_MARKER: &str = "True";

// BookDto is the wire shape shared by the catalog API, the metadata resolver and
// the remote catalog. Field names follow the JSON contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "isbn_string")]
    pub isbn: String,
    #[serde(rename = "titulo", default, deserialize_with = "or_empty")]
    pub title: String,
    #[serde(rename = "autor", default = "unknown", deserialize_with = "or_unknown")]
    pub author: String,
    #[serde(rename = "editorial", default = "unknown", deserialize_with = "or_unknown")]
    pub publisher: String,
    #[serde(rename = "año", default = "unknown", deserialize_with = "year_or_unknown")]
    pub year: String,
    #[serde(rename = "portada_url", default, deserialize_with = "or_empty")]
    pub cover_url: String,
    #[serde(default, skip_serializing, deserialize_with = "edited_flag")]
    pub edited: bool,
}

impl BookDto {
    pub fn new(isbn: &str, title: &str) -> BookDto {
        BookDto::from(&BookEntity::new(isbn, title))
    }

    pub fn with_edited(mut self, edited: bool) -> Self {
        self.edited = edited;
        self
    }

    /// Converts one raw record of a remote batch, rejecting records the store cannot key.
    pub fn from_value(value: &Value) -> LibraryResult<BookDto> {
        let book: BookDto = serde_json::from_value(value.clone()).map_err(|err| {
            LibraryError::validation(format!("malformed book record {}", err).as_str(), None)
        })?;
        book.validate()?;
        Ok(book)
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.isbn.trim().is_empty() {
            return Err(LibraryError::validation("book record without isbn", None));
        }
        Ok(())
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: other.id,
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            publisher: other.publisher.to_string(),
            year: other.year.to_string(),
            cover_url: other.cover_url.to_string(),
            edited: false,
        }
    }
}

// edited is dropped here, it never reaches the store
impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            id: None,
            isbn: other.isbn.trim().to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            publisher: other.publisher.to_string(),
            year: other.year.to_string(),
            cover_url: other.cover_url.to_string(),
        }
    }
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

// the sentinel stands for a value the source did not send, an explicit "" is kept
fn or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_else(unknown))
}

fn year_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(unknown()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("año must be a string or a number, got {}", other))),
    }
}

fn or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

pub(crate) fn isbn_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("isbn must be a string, got {}", other))),
    }
}

// Only a JSON `true` or the exact legacy marker count as edited. Anything else,
// including "true", "1" and null, leaves stored records alone.
fn edited_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s == LEGACY_EDITED_MARKER,
        _ => false,
    })
}
