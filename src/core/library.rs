use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
    },
    // The store or an upstream service could not be reached (pool closed, connection
    // refused, request timed out). Nothing is retried.
    Unavailable {
        message: String,
        reason_code: Option<String>,
    },
    NotFound {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Unavailable { message: message.to_string(), reason_code }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, LibraryError::Unavailable { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            LibraryError::Database { message, .. } => { message }
            LibraryError::Unavailable { message, .. } => { message }
            LibraryError::NotFound { message } => { message }
            LibraryError::Validation { message, .. } => { message }
            LibraryError::Serialization { message } => { message }
            LibraryError::Runtime { message, .. } => { message }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("io {:?}", err).as_str(), Some(format!("{:?}", err.kind())))
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {}", err).as_str())
    }
}

impl From<sqlx::Error> for LibraryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
                LibraryError::unavailable(format!("sqlite store unavailable {}", err).as_str(), None)
            }
            sqlx::Error::Io(ref io) => {
                LibraryError::unavailable(format!("sqlite io error {}", err).as_str(), Some(format!("{:?}", io.kind())))
            }
            sqlx::Error::RowNotFound => {
                LibraryError::not_found("sqlite row not found")
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
                LibraryError::serialization(format!("sqlite decode error {}", err).as_str())
            }
            sqlx::Error::Database(ref db) => {
                let reason = db.code().map(|c| c.to_string());
                LibraryError::database(format!("sqlite database error {}", db.message()).as_str(), reason)
            }
            _ => {
                LibraryError::database(format!("sqlite error {}", err).as_str(), None)
            }
        }
    }
}

impl From<sqlx::migrate::MigrateError> for LibraryError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        LibraryError::database(format!("sqlite migration failed {}", err).as_str(), None)
    }
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        let reason = err.status().map(|s| s.as_u16().to_string());
        if err.is_timeout() || err.is_connect() {
            LibraryError::unavailable(format!("http request failed {}", err).as_str(), reason)
        } else if err.is_decode() {
            LibraryError::serialization(format!("http response decoding failed {}", err).as_str())
        } else {
            LibraryError::runtime(format!("http request failed {}", err).as_str(), reason)
        }
    }
}

impl From<figment::Error> for LibraryError {
    fn from(err: figment::Error) -> Self {
        LibraryError::validation(format!("invalid configuration {}", err).as_str(), None)
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Unavailable { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the catalog and backup services.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(LibraryError::database("test", None), LibraryError::Database{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_unavailable_error() {
        let err = LibraryError::unavailable("test", None);
        assert!(matches!(err, LibraryError::Unavailable{ message: _, reason_code: _ }));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(LibraryError::validation("test", None), LibraryError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_serialization_error() {
        assert!(matches!(LibraryError::serialization("test"), LibraryError::Serialization{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_runtime_error() {
        assert!(matches!(LibraryError::runtime("test", None), LibraryError::Runtime{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_map_sqlx_errors() {
        assert!(LibraryError::from(sqlx::Error::PoolClosed).is_unavailable());
        assert!(matches!(LibraryError::from(sqlx::Error::RowNotFound), LibraryError::NotFound{ .. }));
        assert!(matches!(LibraryError::from(sqlx::Error::ColumnNotFound("isbn".to_string())), LibraryError::Serialization{ .. }));
    }

    #[tokio::test]
    async fn test_should_expose_message() {
        assert_eq!("bad isbn", LibraryError::validation("bad isbn", None).message());
        assert!(!LibraryError::database("test", None).is_unavailable());
    }
}
