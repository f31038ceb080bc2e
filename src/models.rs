//! Data models for authors and posts
//!
//! `Author` and `Post` mirror persisted rows. `NewAuthor`/`NewPost` are the
//! candidates a caller supplies for creation, and `AuthorChanges`/`PostChanges`
//! carry the subset of fields an update touches.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Database representation of an author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Database primary key
    pub id: i64,
    /// Display name, unique across authors
    pub name: String,
    /// Ten-digit phone number
    pub phone_number: String,
    /// Timestamp when the row was created
    pub created_at: NaiveDateTime,
    /// Timestamp of the last update, if any
    pub updated_at: Option<NaiveDateTime>,
}

/// Candidate for a new author row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    /// Display name
    pub name: String,
    /// Ten-digit phone number
    pub phone_number: String,
}

impl NewAuthor {
    /// Build a candidate from borrowed values
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// Fields to change on an existing author; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorChanges {
    /// New display name
    pub name: Option<String>,
    /// New phone number
    pub phone_number: Option<String>,
}

impl AuthorChanges {
    /// True when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none()
    }
}

/// Database representation of a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Database primary key
    pub id: i64,
    /// Headline
    pub title: String,
    /// Body text
    pub content: Option<String>,
    /// One of the configured categories
    pub category: String,
    /// Short abstract
    pub summary: Option<String>,
    /// Timestamp when the row was created
    pub created_at: NaiveDateTime,
    /// Timestamp of the last update, if any
    pub updated_at: Option<NaiveDateTime>,
}

/// Candidate for a new post row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    /// Headline
    pub title: String,
    /// Body text
    pub content: Option<String>,
    /// Short abstract
    pub summary: Option<String>,
    /// Category; required, kept optional so an absent value can be rejected
    pub category: Option<String>,
}

/// Fields to change on an existing post
///
/// `content` and `summary` are nullable columns: `Some(None)` clears them,
/// `None` leaves them as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostChanges {
    /// New headline
    pub title: Option<String>,
    /// New body text, or `Some(None)` to clear it
    pub content: Option<Option<String>>,
    /// New abstract, or `Some(None)` to clear it
    pub summary: Option<Option<String>>,
    /// New category
    pub category: Option<String>,
}

impl PostChanges {
    /// True when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.summary.is_none()
            && self.category.is_none()
    }
}
