pub mod sqlite_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    // fails when the underlying store cannot be reached
    async fn ping(&self) -> LibraryResult<()>;
}
