//! Validate-then-persist operations over the repositories

use tracing::{info, warn};

use crate::db::Database;
use crate::error::{BlogError, Result, ValidationError};
use crate::metrics::MetricsCollector;
use crate::models::{Author, AuthorChanges, NewAuthor, NewPost, Post, PostChanges};
use crate::repository::{AuthorRepository, PostRepository};
use crate::validation::{EntityValidator, ValidationRules};

/// Validates candidates and hands accepted ones to the repositories
pub struct BlogService {
    authors: Box<dyn AuthorRepository>,
    posts: Box<dyn PostRepository>,
    validator: EntityValidator,
    metrics: MetricsCollector,
}

impl BlogService {
    pub fn new(
        authors: Box<dyn AuthorRepository>,
        posts: Box<dyn PostRepository>,
        validator: EntityValidator,
    ) -> Self {
        Self {
            authors,
            posts,
            validator,
            metrics: MetricsCollector::default(),
        }
    }

    /// Serve both entities from one database
    pub fn with_database(database: Database, rules: ValidationRules) -> Self {
        Self::new(
            Box::new(database.clone()),
            Box::new(database),
            EntityValidator::new(rules),
        )
    }

    pub const fn validator(&self) -> &EntityValidator {
        &self.validator
    }

    pub const fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    pub fn create_author(&self, candidate: NewAuthor) -> Result<Author> {
        let candidate = self
            .validator
            .validate_new_author(candidate)
            .map_err(|err| self.rejected("author", err))?;

        let author = self
            .authors
            .insert_author(&candidate)
            .map_err(|err| self.failed("author", "create", err))?;

        self.metrics.record_write("author", "create");
        info!(author_id = author.id, "Author created");
        Ok(author)
    }

    pub fn get_author(&self, id: i64) -> Result<Author> {
        self.authors
            .find_author(id)?
            .ok_or(BlogError::NotFound {
                entity: "author",
                id,
            })
    }

    pub fn find_author_by_name(&self, name: &str) -> Result<Option<Author>> {
        self.authors.find_author_by_name(name)
    }

    pub fn list_authors(&self) -> Result<Vec<Author>> {
        self.authors.list_authors()
    }

    pub fn update_author(&self, id: i64, changes: AuthorChanges) -> Result<Author> {
        let changes = self
            .validator
            .validate_author_changes(changes)
            .map_err(|err| self.rejected("author", err))?;

        let author = self
            .authors
            .update_author(id, &changes)
            .map_err(|err| self.failed("author", "update", err))?;

        self.metrics.record_write("author", "update");
        info!(author_id = id, "Author updated");
        Ok(author)
    }

    pub fn delete_author(&self, id: i64) -> Result<()> {
        let deleted = self
            .authors
            .delete_author(id)
            .map_err(|err| self.failed("author", "delete", err))?;
        if !deleted {
            return Err(BlogError::NotFound {
                entity: "author",
                id,
            });
        }
        self.metrics.record_write("author", "delete");
        info!(author_id = id, "Author deleted");
        Ok(())
    }

    pub fn create_post(&self, candidate: NewPost) -> Result<Post> {
        let candidate = self
            .validator
            .validate_new_post(candidate)
            .map_err(|err| self.rejected("post", err))?;

        let post = self
            .posts
            .insert_post(&candidate)
            .map_err(|err| self.failed("post", "create", err))?;

        self.metrics.record_write("post", "create");
        info!(post_id = post.id, "Post created");
        Ok(post)
    }

    pub fn get_post(&self, id: i64) -> Result<Post> {
        self.posts
            .find_post(id)?
            .ok_or(BlogError::NotFound { entity: "post", id })
    }

    pub fn list_posts(&self) -> Result<Vec<Post>> {
        self.posts.list_posts()
    }

    pub fn update_post(&self, id: i64, changes: PostChanges) -> Result<Post> {
        let changes = self
            .validator
            .validate_post_changes(changes)
            .map_err(|err| self.rejected("post", err))?;

        let post = self
            .posts
            .update_post(id, &changes)
            .map_err(|err| self.failed("post", "update", err))?;

        self.metrics.record_write("post", "update");
        info!(post_id = id, "Post updated");
        Ok(post)
    }

    pub fn delete_post(&self, id: i64) -> Result<()> {
        let deleted = self
            .posts
            .delete_post(id)
            .map_err(|err| self.failed("post", "delete", err))?;
        if !deleted {
            return Err(BlogError::NotFound { entity: "post", id });
        }
        self.metrics.record_write("post", "delete");
        info!(post_id = id, "Post deleted");
        Ok(())
    }

    fn rejected(&self, entity: &'static str, err: ValidationError) -> BlogError {
        warn!(entity, field = err.field(), rule = err.rule(), "{err}");
        self.metrics.record_validation_failure(entity, &err);
        err.into()
    }

    fn failed(&self, entity: &'static str, operation: &'static str, err: BlogError) -> BlogError {
        match err {
            BlogError::Validation(err) => self.rejected(entity, err),
            BlogError::NotFound { .. } => err,
            err => {
                warn!(entity, operation, error = %err, "Write failed");
                self.metrics.record_error(entity, operation);
                err
            }
        }
    }
}
