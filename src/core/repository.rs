use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

// Repository abstracts keyed storage where every entity carries a unique natural key
#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // inserts the entity unless its key already exists, returns true when a row was written
    async fn upsert_if_absent(&self, entity: &Entity) -> LibraryResult<bool>;

    // get an entity by its natural key
    async fn get(&self, key: &str) -> LibraryResult<Option<Entity>>;

    // delete an entity by its natural key, deleting an absent key is a no-op
    async fn delete(&self, key: &str) -> LibraryResult<usize>;

    // all entities in a deterministic order
    async fn list_all(&self) -> LibraryResult<Vec<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    Sqlite,
    InMemorySqlite,
}

#[cfg(test)]
mod tests {
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_compare_store() {
        assert_ne!(RepositoryStore::Sqlite, RepositoryStore::InMemorySqlite);
    }
}
