use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::gateway::metadata::Resolution;

pub struct LookupBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl LookupBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupBookCommandRequest {
    #[serde(deserialize_with = "crate::books::dto::isbn_string")]
    pub isbn: String,
}

impl LookupBookCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

// either the resolved book or a hint that the client must enter it by hand
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LookupBookCommandResponse {
    Book(BookDto),
    Manual { manual: bool },
}

impl From<Resolution> for LookupBookCommandResponse {
    fn from(res: Resolution) -> Self {
        match res {
            Resolution::Found(book) => LookupBookCommandResponse::Book(book),
            Resolution::NotFound => LookupBookCommandResponse::Manual { manual: true },
        }
    }
}

#[async_trait]
impl Command<LookupBookCommandRequest, LookupBookCommandResponse> for LookupBookCommand {
    async fn execute(&self, req: LookupBookCommandRequest) -> Result<LookupBookCommandResponse, CommandError> {
        self.catalog_service.lookup_book(req.isbn.as_str())
            .await.map_err(CommandError::from).map(LookupBookCommandResponse::from)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::books::dto::BookDto;
    use crate::catalog::command::lookup_book_cmd::{LookupBookCommand, LookupBookCommandRequest, LookupBookCommandResponse};
    use crate::catalog::domain::service::tests::StubResolver;
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::utils::sqlite::Database;

    #[tokio::test]
    async fn test_should_run_lookup_book() {
        let db = Database::connect_in_memory().await.expect("should open db");
        let svc = factory::create_catalog_service(&db, StubResolver::with(vec![BookDto::new("111", "Ficciones")]));
        let cmd = LookupBookCommand::new(svc);

        let res = cmd.execute(LookupBookCommandRequest::new("111")).await.expect("should lookup book");
        assert_eq!(LookupBookCommandResponse::Book(BookDto::new("111", "Ficciones")), res);

        let res = cmd.execute(LookupBookCommandRequest::new("000")).await.expect("should lookup book");
        assert_eq!(json!({"manual": true}), serde_json::to_value(&res).expect("should serialize"));
    }
}
