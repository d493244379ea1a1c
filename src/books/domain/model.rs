use serde::{Deserialize, Serialize};

// BookEntity is a row of the local catalog, identified by its ISBN. The surrogate
// id is assigned by the store and is only meaningful locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub id: Option<i64>,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: String,
    pub cover_url: String,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str) -> Self {
        Self {
            id: None,
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: super::UNKNOWN.to_string(),
            publisher: super::UNKNOWN.to_string(),
            year: super::UNKNOWN.to_string(),
            cover_url: "".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::books::domain::UNKNOWN;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookEntity::new("isbn", "title");
        assert_eq!("isbn", book.isbn.as_str());
        assert_eq!("title", book.title.as_str());
        assert_eq!(UNKNOWN, book.author.as_str());
        assert_eq!(None, book.id);
    }
}
