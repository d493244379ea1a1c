use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReconcileAction {
    // no record held the isbn
    Inserted,
    // an edited record superseded the stored one
    Replaced,
    // the isbn was already stored and the record was not edited
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RecordStatus {
    Applied(ReconcileAction),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    pub position: usize,
    pub isbn: Option<String>,
    pub status: RecordStatus,
}

impl RecordOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, RecordStatus::Failed(_))
    }
}

/// One outcome per incoming record, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconcileReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl ReconcileReport {
    pub fn count(&self, action: ReconcileAction) -> usize {
        self.outcomes.iter().filter(|o| o.status == RecordStatus::Applied(action)).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn failures(&self) -> Vec<RecordOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed()).cloned().collect()
    }
}

/// Applies the replace-on-edit policy to the catalog store.
///
/// Records are processed one at a time in input order. An edited record first
/// removes whatever is stored under its isbn, then every record goes through
/// insert-if-absent. A failing record never stops the rest of the batch, and
/// nothing already written is rolled back.
pub struct Reconciler {
    book_repository: Box<dyn BookRepository>,
}

impl Reconciler {
    pub fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }

    pub async fn reconcile_one(&self, book: &BookDto) -> LibraryResult<ReconcileAction> {
        book.validate()?;
        let entity = BookEntity::from(book);
        let mut removed = 0;
        if book.edited {
            removed = self.book_repository.delete(entity.isbn.as_str()).await?;
        }
        let inserted = self.book_repository.upsert_if_absent(&entity).await?;
        Ok(match (inserted, removed > 0) {
            (true, true) => ReconcileAction::Replaced,
            (true, false) => ReconcileAction::Inserted,
            (false, _) => ReconcileAction::Skipped,
        })
    }

    /// Reconciles a raw remote batch. Only an unreachable store fails the whole
    /// call; malformed records and per-record storage errors end up in the report.
    pub async fn reconcile(&self, records: &[Value]) -> LibraryResult<ReconcileReport> {
        self.book_repository.ping().await?;
        let mut report = ReconcileReport::default();
        for (position, value) in records.iter().enumerate() {
            let isbn = value.get("isbn").and_then(raw_isbn);
            let res = match BookDto::from_value(value) {
                Ok(book) => self.reconcile_one(&book).await.map(|action| (book, action)),
                Err(err) => Err(err),
            };
            let status = match res {
                Ok((book, action)) => {
                    info!(position, isbn = book.isbn.as_str(), title = book.title.as_str(), action = ?action, "reconciled book");
                    RecordStatus::Applied(action)
                }
                Err(err) => {
                    warn!(position, isbn = ?isbn, error = %err, "failed to reconcile book");
                    RecordStatus::Failed(err.to_string())
                }
            };
            report.outcomes.push(RecordOutcome { position, isbn, status });
        }
        Ok(report)
    }
}

fn raw_isbn(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
