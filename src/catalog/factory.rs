use std::sync::Arc;
use crate::backup::reconciler::Reconciler;
use crate::books::factory::create_book_repository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::gateway::metadata::MetadataResolver;
use crate::utils::sqlite::Database;

pub fn create_catalog_service(db: &Database, resolver: Arc<dyn MetadataResolver>) -> Box<dyn CatalogService> {
    let reconciler = Reconciler::new(create_book_repository(db));
    Box::new(CatalogServiceImpl::new(create_book_repository(db), resolver, reconciler))
}
