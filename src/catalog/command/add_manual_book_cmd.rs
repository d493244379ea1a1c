use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub const ADDED_MESSAGE: &str = "Libro agregado manualmente";
pub const ALREADY_STORED_MESSAGE: &str = "El libro ya estaba registrado";

pub struct AddManualBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddManualBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct AddManualBookCommandRequest {
    pub book: BookDto,
}

impl AddManualBookCommandRequest {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct AddManualBookCommandResponse {
    pub mensaje: String,
    pub titulo: String,
    // false when the isbn was already catalogued and nothing was written
    pub agregado: bool,
}

impl AddManualBookCommandResponse {
    pub fn new(title: &str, added: bool) -> Self {
        let message = if added { ADDED_MESSAGE } else { ALREADY_STORED_MESSAGE };
        Self {
            mensaje: message.to_string(),
            titulo: title.to_string(),
            agregado: added,
        }
    }
}

#[async_trait]
impl Command<AddManualBookCommandRequest, AddManualBookCommandResponse> for AddManualBookCommand {
    async fn execute(&self, req: AddManualBookCommandRequest) -> Result<AddManualBookCommandResponse, CommandError> {
        let book = req.book.with_edited(false);
        self.catalog_service.add_manual_book(&book).await.map_err(CommandError::from)
            .map(|added| AddManualBookCommandResponse::new(book.title.as_str(), added))
    }
}
