use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::backup::reconciler::Reconciler;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::gateway::metadata::{MetadataResolver, Resolution};

pub struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    resolver: Arc<dyn MetadataResolver>,
    reconciler: Reconciler,
}

impl CatalogServiceImpl {
    pub fn new(book_repository: Box<dyn BookRepository>, resolver: Arc<dyn MetadataResolver>,
               reconciler: Reconciler) -> Self {
        Self {
            book_repository,
            resolver,
            reconciler,
        }
    }
}

fn required_isbn(isbn: &str) -> LibraryResult<&str> {
    let isbn = isbn.trim();
    if isbn.is_empty() {
        return Err(LibraryError::validation("isbn is required", None));
    }
    Ok(isbn)
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    // always asks the resolver, the local copy is never used as a cache
    async fn lookup_book(&self, isbn: &str) -> LibraryResult<Resolution> {
        let isbn = required_isbn(isbn)?;
        let res = self.resolver.resolve(isbn).await?;
        match &res {
            Resolution::Found(book) => {
                let action = self.reconciler.reconcile_one(book).await?;
                info!(isbn, title = book.title.as_str(), action = ?action, "resolved book");
            }
            Resolution::NotFound => {
                info!(isbn, "book not found upstream, manual entry required");
            }
        }
        Ok(res)
    }

    async fn add_manual_book(&self, book: &BookDto) -> LibraryResult<bool> {
        book.validate()?;
        let added = self.book_repository.upsert_if_absent(&BookEntity::from(book)).await?;
        info!(isbn = book.isbn.as_str(), title = book.title.as_str(), added, "manual book entry");
        Ok(added)
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<Option<BookDto>> {
        self.book_repository.get(isbn.trim()).await.map(|b| b.as_ref().map(BookDto::from))
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.list_all().await?;
        Ok(books.iter().map(BookDto::from).collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use async_trait::async_trait;
    use crate::books::dto::BookDto;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::library::{LibraryError, LibraryResult};
    use crate::gateway::metadata::{MetadataResolver, Resolution};
    use crate::utils::sqlite::Database;

    // answers from a fixed table, isbn "fail" simulates an unreachable upstream
    pub(crate) struct StubResolver {
        pub(crate) books: HashMap<String, BookDto>,
    }

    impl StubResolver {
        pub(crate) fn with(books: Vec<BookDto>) -> Arc<dyn MetadataResolver> {
            Arc::new(StubResolver {
                books: books.into_iter().map(|b| (b.isbn.to_string(), b)).collect(),
            })
        }
    }

    #[async_trait]
    impl MetadataResolver for StubResolver {
        async fn resolve(&self, isbn: &str) -> LibraryResult<Resolution> {
            if isbn == "fail" {
                return Err(LibraryError::unavailable("metadata lookup timed out", None));
            }
            Ok(self.books.get(isbn).cloned().map(Resolution::Found).unwrap_or(Resolution::NotFound))
        }
    }

    async fn build_service(books: Vec<BookDto>) -> (Database, Box<dyn CatalogService>) {
        let db = Database::connect_in_memory().await.expect("should open db");
        let svc = factory::create_catalog_service(&db, StubResolver::with(books));
        (db, svc)
    }

    #[tokio::test]
    async fn test_should_lookup_and_store_book() {
        let (_db, catalog_svc) = build_service(vec![BookDto::new("111", "Rayuela")]).await;

        let res = catalog_svc.lookup_book("111").await.expect("should resolve");
        assert_eq!(Resolution::Found(BookDto::new("111", "Rayuela")), res);

        let loaded = catalog_svc.find_book_by_isbn("111").await.expect("should query").expect("should be stored");
        assert_eq!("Rayuela", loaded.title.as_str());
    }

    #[tokio::test]
    async fn test_should_report_manual_entry_on_miss() {
        let (_db, catalog_svc) = build_service(vec![]).await;
        let res = catalog_svc.lookup_book("404").await.expect("a miss is not an error");
        assert_eq!(Resolution::NotFound, res);
        assert!(catalog_svc.list_books().await.expect("should list").is_empty());
    }

    #[tokio::test]
    async fn test_should_not_overwrite_on_repeated_lookup() {
        let (_db, catalog_svc) = build_service(vec![BookDto::new("111", "Rayuela")]).await;
        catalog_svc.add_manual_book(&BookDto::new("111", "manual copy")).await.expect("should add book");
        catalog_svc.lookup_book("111").await.expect("should resolve");
        let loaded = catalog_svc.find_book_by_isbn("111").await.expect("should query").expect("should be stored");
        assert_eq!("manual copy", loaded.title.as_str());
    }

    #[tokio::test]
    async fn test_should_fail_lookup_without_isbn() {
        let (_db, catalog_svc) = build_service(vec![]).await;
        assert!(catalog_svc.lookup_book("  ").await.is_err());
    }

    #[tokio::test]
    async fn test_should_fail_lookup_when_upstream_fails() {
        let (_db, catalog_svc) = build_service(vec![]).await;
        assert!(catalog_svc.lookup_book("fail").await.is_err());
    }

    #[tokio::test]
    async fn test_should_add_manual_book_once() {
        let (_db, catalog_svc) = build_service(vec![]).await;
        assert!(catalog_svc.add_manual_book(&BookDto::new("222", "first")).await.expect("should add book"));
        assert!(!catalog_svc.add_manual_book(&BookDto::new("222", "second")).await.expect("duplicate should be a no-op"));
        let books = catalog_svc.list_books().await.expect("should list");
        assert_eq!(1, books.len());
        assert_eq!("first", books[0].title.as_str());
    }

    #[tokio::test]
    async fn test_should_ignore_edited_flag_on_manual_entry() {
        let (_db, catalog_svc) = build_service(vec![]).await;
        catalog_svc.add_manual_book(&BookDto::new("333", "first")).await.expect("should add book");
        let added = catalog_svc.add_manual_book(&BookDto::new("333", "second").with_edited(true)).await.expect("should not fail");
        assert!(!added);
        let loaded = catalog_svc.find_book_by_isbn("333").await.expect("should query").expect("should be stored");
        assert_eq!("first", loaded.title.as_str());
    }

    #[tokio::test]
    async fn test_should_return_none_for_absent_isbn() {
        let (_db, catalog_svc) = build_service(vec![]).await;
        assert!(catalog_svc.find_book_by_isbn("missing").await.expect("should query").is_none());
    }
}
