use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;

// Resolution is the answer of a metadata lookup, a miss is not an error
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(BookDto),
    NotFound,
}

#[async_trait]
pub trait MetadataResolver: Sync + Send {
    async fn resolve(&self, isbn: &str) -> LibraryResult<Resolution>;
}
