//! Repository traits for author and post persistence.
//!
//! Implementations store candidates as given; callers validate first (see
//! [`crate::service::BlogService`]). The one rule a repository does enforce is
//! author name uniqueness, which comes from the store's `UNIQUE` constraint and
//! is reported as [`crate::error::ValidationError::NotUnique`].

use crate::error::Result;
use crate::models::{Author, AuthorChanges, NewAuthor, NewPost, Post, PostChanges};

/// Storage operations for authors
#[cfg_attr(test, mockall::automock)]
pub trait AuthorRepository {
    /// Insert a new author and return the stored row
    fn insert_author(&self, author: &NewAuthor) -> Result<Author>;
    /// Look up an author by id
    fn find_author(&self, id: i64) -> Result<Option<Author>>;
    /// Look up an author by exact name
    fn find_author_by_name(&self, name: &str) -> Result<Option<Author>>;
    /// All authors ordered by id
    fn list_authors(&self) -> Result<Vec<Author>>;
    /// Apply changes to an author and return the stored row
    fn update_author(&self, id: i64, changes: &AuthorChanges) -> Result<Author>;
    /// Delete an author; `false` if no row had that id
    fn delete_author(&self, id: i64) -> Result<bool>;
}

/// Storage operations for posts
#[cfg_attr(test, mockall::automock)]
pub trait PostRepository {
    /// Insert a new post and return the stored row
    fn insert_post(&self, post: &NewPost) -> Result<Post>;
    /// Look up a post by id
    fn find_post(&self, id: i64) -> Result<Option<Post>>;
    /// All posts ordered by id
    fn list_posts(&self) -> Result<Vec<Post>>;
    /// Apply changes to a post and return the stored row
    fn update_post(&self, id: i64, changes: &PostChanges) -> Result<Post>;
    /// Delete a post; `false` if no row had that id
    fn delete_post(&self, id: i64) -> Result<bool>;
}
