pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;
use crate::gateway::metadata::Resolution;

#[async_trait]
pub trait CatalogService: Sync + Send {
    // resolves the isbn upstream and stores the result unless the isbn is already catalogued
    async fn lookup_book(&self, isbn: &str) -> LibraryResult<Resolution>;
    // returns false when the isbn was already catalogued and nothing was written
    async fn add_manual_book(&self, book: &BookDto) -> LibraryResult<bool>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookDto>>;
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>>;
}
