//! Database schema definitions
//!
//! Constants for table and column names used with rusqlite.

/// Authors table schema
pub mod authors {
    /// Table name
    pub const TABLE: &str = "authors";
    /// Primary key column
    pub const ID: &str = "id";
    /// Author name column, unique
    pub const NAME: &str = "name";
    /// Phone number column
    pub const PHONE_NUMBER: &str = "phone_number";
    /// Row creation timestamp column
    pub const CREATED_AT: &str = "created_at";
    /// Last update timestamp column
    pub const UPDATED_AT: &str = "updated_at";
}

/// Posts table schema
pub mod posts {
    /// Table name
    pub const TABLE: &str = "posts";
    /// Primary key column
    pub const ID: &str = "id";
    /// Title column
    pub const TITLE: &str = "title";
    /// Body text column
    pub const CONTENT: &str = "content";
    /// Category column
    pub const CATEGORY: &str = "category";
    /// Summary column
    pub const SUMMARY: &str = "summary";
    /// Row creation timestamp column
    pub const CREATED_AT: &str = "created_at";
    /// Last update timestamp column
    pub const UPDATED_AT: &str = "updated_at";
}

/// The tables created by the migrations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// `authors`
    Authors,
    /// `posts`
    Posts,
}

impl Table {
    /// SQL name of the table
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Authors => authors::TABLE,
            Self::Posts => posts::TABLE,
        }
    }
}
