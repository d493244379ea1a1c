use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct GetBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub struct GetBookCommandRequest {
    pub isbn: String,
}

impl GetBookCommandRequest {
    pub fn new(isbn: String) -> Self {
        Self {
            isbn,
        }
    }
}

// an absent isbn serializes as `{}` rather than an error
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GetBookCommandResponse {
    Book(BookDto),
    Empty {},
}

impl From<Option<BookDto>> for GetBookCommandResponse {
    fn from(book: Option<BookDto>) -> Self {
        match book {
            Some(book) => GetBookCommandResponse::Book(book),
            None => GetBookCommandResponse::Empty {},
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        self.catalog_service.find_book_by_isbn(req.isbn.as_str())
            .await.map_err(CommandError::from).map(GetBookCommandResponse::from)
    }
}
