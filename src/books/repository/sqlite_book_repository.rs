use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use sqlx::sqlite::SqliteRow;
use tracing::warn;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

const COLUMNS: &str = r#"id, isbn, titulo, autor, editorial, "año", portada_url"#;

#[derive(Debug)]
pub struct SqliteBookRepository {
    pool: SqlitePool,
    table_name: String,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool, table_name: &str) -> Self {
        Self {
            pool,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for SqliteBookRepository {
    // the unique isbn index settles concurrent inserts, the loser becomes a no-op
    async fn upsert_if_absent(&self, entity: &BookEntity) -> LibraryResult<bool> {
        if entity.isbn.trim().is_empty() {
            return Err(LibraryError::validation("cannot store a book without isbn", None));
        }
        let sql = format!(
            r#"INSERT INTO {} (isbn, titulo, autor, editorial, "año", portada_url)
               VALUES (?, ?, ?, ?, ?, ?)
               ON CONFLICT(isbn) DO NOTHING"#,
            self.table_name);
        let res = sqlx::query(&sql)
            .bind(&entity.isbn)
            .bind(&entity.title)
            .bind(&entity.author)
            .bind(&entity.publisher)
            .bind(&entity.year)
            .bind(&entity.cover_url)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }

    async fn get(&self, isbn: &str) -> LibraryResult<Option<BookEntity>> {
        let sql = format!("SELECT {} FROM {} WHERE isbn = ?", COLUMNS, self.table_name);
        let row = sqlx::query(&sql)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(match row {
            Some(row) => map_to_book(&row)?,
            None => None,
        })
    }

    async fn delete(&self, isbn: &str) -> LibraryResult<usize> {
        let sql = format!("DELETE FROM {} WHERE isbn = ?", self.table_name);
        let res = sqlx::query(&sql)
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() as usize)
    }

    // BINARY collation: byte order, upper case sorts before lower case
    async fn list_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let sql = format!("SELECT {} FROM {} ORDER BY titulo ASC, isbn ASC", COLUMNS, self.table_name);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await?;
        let mut books = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            if let Some(book) = map_to_book(row)? {
                books.push(book);
            }
        }
        Ok(books)
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn ping(&self) -> LibraryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map(|_| ()).map_err(|err| {
            LibraryError::unavailable(format!("catalog store unreachable {}", err).as_str(), None)
        })
    }
}

// rows written by older tools may carry NULLs in any column, a row without isbn
// cannot be addressed and is left out
fn map_to_book(row: &SqliteRow) -> LibraryResult<Option<BookEntity>> {
    let id: Option<i64> = row.try_get("id")?;
    let isbn = match row.try_get::<Option<String>, _>("isbn")? {
        Some(isbn) => isbn,
        None => {
            warn!(id = ?id, "skipping stored book without isbn");
            return Ok(None);
        }
    };
    Ok(Some(BookEntity {
        id,
        isbn,
        title: row.try_get::<Option<String>, _>("titulo")?.unwrap_or_default(),
        author: row.try_get::<Option<String>, _>("autor")?.unwrap_or_default(),
        publisher: row.try_get::<Option<String>, _>("editorial")?.unwrap_or_default(),
        year: row.try_get::<Option<String>, _>("año")?.unwrap_or_default(),
        cover_url: row.try_get::<Option<String>, _>("portada_url")?.unwrap_or_default(),
    }))
}
