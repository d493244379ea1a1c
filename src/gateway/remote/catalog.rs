use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::catalog::RemoteCatalog;

#[derive(Debug, Clone)]
pub struct HttpRemoteCatalog {
    client: Client,
    url: String,
}

impl HttpRemoteCatalog {
    pub fn new(client: Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl RemoteCatalog for HttpRemoteCatalog {
    async fn fetch_all(&self) -> LibraryResult<Vec<Value>> {
        let response = self.client.get(self.url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LibraryError::runtime(
                format!("remote catalog {} answered {}", self.url, status).as_str(),
                Some(status.as_u16().to_string())));
        }
        match response.json::<Value>().await? {
            Value::Array(records) => Ok(records),
            other => Err(LibraryError::serialization(
                format!("remote catalog returned {} instead of a list of books", kind_of(&other)).as_str())),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
