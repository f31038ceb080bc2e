//! SQLite storage for authors and posts behind an r2d2 pool

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::{BlogError, Result, ValidationError};
use crate::logging::OperationTimer;
use crate::models::{Author, AuthorChanges, NewAuthor, NewPost, Post, PostChanges};
use crate::repository::{AuthorRepository, PostRepository};
use crate::schema::{authors, posts, Table};

// Type alias for the database connection pool
pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Schema migrations, applied in order and tracked with `PRAGMA user_version`
const MIGRATIONS: &[(u32, &str)] = &[(
    1,
    include_str!("../migrations/0001_create_authors_posts/up.sql"),
)];

/// Where a database URL points
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Memory,
    File(PathBuf),
}

impl Location {
    /// Accepts `sqlite://path`, `sqlite:path`, a bare path, or `:memory:`
    fn parse(database_url: &str) -> Self {
        let path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url);

        if path.is_empty() || path == ":memory:" {
            Self::Memory
        } else {
            Self::File(PathBuf::from(path))
        }
    }
}

/// Database manager for handling connections and operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("max_size", &self.pool.max_size())
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Open a database with default pool settings
    pub fn new(database_url: &str) -> Result<Self> {
        Self::from_config(&DatabaseConfig {
            url: database_url.to_string(),
            ..DatabaseConfig::default()
        })
    }

    /// Open an in-memory database backed by a single pooled connection
    pub fn in_memory() -> Result<Self> {
        Self::new(":memory:")
    }

    /// Create a connection pool from configuration and run migrations
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let location = Location::parse(&config.url);
        let builder = Pool::builder()
            .connection_timeout(Duration::from_secs(config.connection_timeout_secs));

        let pool = match &location {
            Location::Memory => {
                // Every in-memory connection is its own database, so keep exactly one alive.
                let manager = SqliteConnectionManager::memory().with_init(init_connection);
                builder
                    .max_size(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .build(manager)?
            }
            Location::File(path) => {
                // Create parent directory if it doesn't exist
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                let manager = SqliteConnectionManager::file(path).with_init(init_connection);
                builder.max_size(config.max_connections).build(manager)?
            }
        };

        let mut conn = pool.get()?;
        Self::run_migrations(&mut conn)?;
        info!(location = ?location, "Database opened");

        Ok(Self { pool })
    }

    /// Run database migrations
    fn run_migrations(conn: &mut Connection) -> Result<()> {
        let current: u32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        let latest = MIGRATIONS.last().map_or(0, |(version, _)| *version);

        if current > latest {
            return Err(BlogError::InvalidConfig(format!(
                "database schema version {current} is newer than supported version {latest}"
            )));
        }

        let tx = conn.transaction()?;
        for (version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > current) {
            debug!(version, "Applying migration");
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", version)?;
        }
        tx.commit()?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Map a database row to an Author
    fn map_author(row: &Row) -> rusqlite::Result<Author> {
        Ok(Author {
            id: row.get(authors::ID)?,
            name: row.get(authors::NAME)?,
            phone_number: row.get(authors::PHONE_NUMBER)?,
            created_at: row.get(authors::CREATED_AT)?,
            updated_at: row.get(authors::UPDATED_AT)?,
        })
    }

    /// Map a database row to a Post
    fn map_post(row: &Row) -> rusqlite::Result<Post> {
        Ok(Post {
            id: row.get(posts::ID)?,
            title: row.get(posts::TITLE)?,
            content: row.get(posts::CONTENT)?,
            category: row.get(posts::CATEGORY)?,
            summary: row.get(posts::SUMMARY)?,
            created_at: row.get(posts::CREATED_AT)?,
            updated_at: row.get(posts::UPDATED_AT)?,
        })
    }

    fn fetch_author(conn: &Connection, id: i64) -> Result<Option<Author>> {
        let author = conn
            .query_row(
                &format!("SELECT * FROM {} WHERE {} = ?", authors::TABLE, authors::ID),
                params![id],
                Self::map_author,
            )
            .optional()?;
        Ok(author)
    }

    fn fetch_post(conn: &Connection, id: i64) -> Result<Option<Post>> {
        let post = conn
            .query_row(
                &format!("SELECT * FROM {} WHERE {} = ?", posts::TABLE, posts::ID),
                params![id],
                Self::map_post,
            )
            .optional()?;
        Ok(post)
    }

    /// Count the rows in one of the schema's tables
    pub fn count(&self, table: Table) -> Result<i64> {
        let conn = self.get_connection()?;
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }
}

fn init_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))
}

/// Turn a `UNIQUE` violation on `authors.name` into a validation failure
fn name_conflict(err: rusqlite::Error, name: &str) -> BlogError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            ValidationError::NotUnique {
                field: "name",
                value: name.to_string(),
            }
            .into()
        }
        _ => err.into(),
    }
}

impl AuthorRepository for Database {
    fn insert_author(&self, author: &NewAuthor) -> Result<Author> {
        let _timer = OperationTimer::new("insert_author");
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}) VALUES (?, ?)",
                authors::TABLE,
                authors::NAME,
                authors::PHONE_NUMBER
            ),
            params![author.name, author.phone_number],
        )
        .map_err(|err| name_conflict(err, &author.name))?;

        let id = conn.last_insert_rowid();
        Self::fetch_author(&conn, id)?.ok_or(BlogError::NotFound {
            entity: "author",
            id,
        })
    }

    fn find_author(&self, id: i64) -> Result<Option<Author>> {
        let conn = self.get_connection()?;
        Self::fetch_author(&conn, id)
    }

    fn find_author_by_name(&self, name: &str) -> Result<Option<Author>> {
        let conn = self.get_connection()?;
        let author = conn
            .query_row(
                &format!("SELECT * FROM {} WHERE {} = ?", authors::TABLE, authors::NAME),
                params![name],
                Self::map_author,
            )
            .optional()?;
        Ok(author)
    }

    fn list_authors(&self) -> Result<Vec<Author>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {} ASC",
            authors::TABLE,
            authors::ID
        ))?;
        let rows = stmt.query_map([], Self::map_author)?;

        let mut results = Vec::new();
        for author in rows {
            results.push(author?);
        }
        Ok(results)
    }

    fn update_author(&self, id: i64, changes: &AuthorChanges) -> Result<Author> {
        let _timer = OperationTimer::new("update_author");
        let conn = self.get_connection()?;

        let mut update_fields = Vec::new();
        let mut update_params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(name) = &changes.name {
            update_fields.push(format!("{} = ?", authors::NAME));
            update_params.push(Box::new(name.clone()));
        }
        if let Some(phone) = &changes.phone_number {
            update_fields.push(format!("{} = ?", authors::PHONE_NUMBER));
            update_params.push(Box::new(phone.clone()));
        }

        if !update_fields.is_empty() {
            update_fields.push(format!("{} = CURRENT_TIMESTAMP", authors::UPDATED_AT));
            update_params.push(Box::new(id));

            let query = format!(
                "UPDATE {} SET {} WHERE {} = ?",
                authors::TABLE,
                update_fields.join(", "),
                authors::ID
            );
            let updated = conn
                .execute(&query, params_from_iter(update_params.iter()))
                .map_err(|err| name_conflict(err, changes.name.as_deref().unwrap_or_default()))?;

            if updated == 0 {
                return Err(BlogError::NotFound {
                    entity: "author",
                    id,
                });
            }
        }

        Self::fetch_author(&conn, id)?.ok_or(BlogError::NotFound {
            entity: "author",
            id,
        })
    }

    fn delete_author(&self, id: i64) -> Result<bool> {
        let conn = self.get_connection()?;
        let deleted = conn.execute(
            &format!("DELETE FROM {} WHERE {} = ?", authors::TABLE, authors::ID),
            params![id],
        )?;
        Ok(deleted > 0)
    }
}

impl PostRepository for Database {
    fn insert_post(&self, post: &NewPost) -> Result<Post> {
        let _timer = OperationTimer::new("insert_post");
        let conn = self.get_connection()?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}, {}, {}) VALUES (?, ?, ?, ?)",
                posts::TABLE,
                posts::TITLE,
                posts::CONTENT,
                posts::CATEGORY,
                posts::SUMMARY
            ),
            params![post.title, post.content, post.category, post.summary],
        )?;

        let id = conn.last_insert_rowid();
        Self::fetch_post(&conn, id)?.ok_or(BlogError::NotFound { entity: "post", id })
    }

    fn find_post(&self, id: i64) -> Result<Option<Post>> {
        let conn = self.get_connection()?;
        Self::fetch_post(&conn, id)
    }

    fn list_posts(&self) -> Result<Vec<Post>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM {} ORDER BY {} ASC",
            posts::TABLE,
            posts::ID
        ))?;
        let rows = stmt.query_map([], Self::map_post)?;

        let mut results = Vec::new();
        for post in rows {
            results.push(post?);
        }
        Ok(results)
    }

    fn update_post(&self, id: i64, changes: &PostChanges) -> Result<Post> {
        let _timer = OperationTimer::new("update_post");
        let conn = self.get_connection()?;

        let mut update_fields = Vec::new();
        let mut update_params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(title) = &changes.title {
            update_fields.push(format!("{} = ?", posts::TITLE));
            update_params.push(Box::new(title.clone()));
        }
        if let Some(content) = &changes.content {
            update_fields.push(format!("{} = ?", posts::CONTENT));
            update_params.push(Box::new(content.clone()));
        }
        if let Some(summary) = &changes.summary {
            update_fields.push(format!("{} = ?", posts::SUMMARY));
            update_params.push(Box::new(summary.clone()));
        }
        if let Some(category) = &changes.category {
            update_fields.push(format!("{} = ?", posts::CATEGORY));
            update_params.push(Box::new(category.clone()));
        }

        if !update_fields.is_empty() {
            update_fields.push(format!("{} = CURRENT_TIMESTAMP", posts::UPDATED_AT));
            update_params.push(Box::new(id));

            let query = format!(
                "UPDATE {} SET {} WHERE {} = ?",
                posts::TABLE,
                update_fields.join(", "),
                posts::ID
            );
            let updated = conn.execute(&query, params_from_iter(update_params.iter()))?;

            if updated == 0 {
                return Err(BlogError::NotFound { entity: "post", id });
            }
        }

        Self::fetch_post(&conn, id)?.ok_or(BlogError::NotFound { entity: "post", id })
    }

    fn delete_post(&self, id: i64) -> Result<bool> {
        let conn = self.get_connection()?;
        let deleted = conn.execute(
            &format!("DELETE FROM {} WHERE {} = ?", posts::TABLE, posts::ID),
            params![id],
        )?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
impl Location {
    /// Path on disk, if this is a file database
    fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Memory => None,
            Self::File(path) => Some(path),
        }
    }
}
