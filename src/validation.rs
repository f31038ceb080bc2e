//! Field validation for authors and posts.
//!
//! Every field validator returns the value unchanged on success. The
//! `validate_*` entity methods check fields in declaration order and stop at
//! the first failure, so a candidate is accepted or rejected as a whole before
//! anything is written.
//!
//! Author name uniqueness is not checked here: the `authors.name` column is
//! `UNIQUE` and the repository reports a conflicting write as
//! [`ValidationError::NotUnique`].

use serde::{Deserialize, Serialize};
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::error::ValidationError;
use crate::models::{AuthorChanges, NewAuthor, NewPost, PostChanges};

/// Titles containing any of these are rejected
pub const DEFAULT_CLICKBAIT_PHRASES: [&str; 6] =
    ["You Won't Believe", "Top", "Best", "Why", "How", "Secret"];

/// Permitted post categories
pub const DEFAULT_CATEGORIES: [&str; 2] = ["Fiction", "Non-Fiction"];

/// Minimum length of non-empty post content, in characters
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 250;

/// Maximum length of a post summary, in characters
pub const DEFAULT_MAX_SUMMARY_CHARS: usize = 250;

/// Exact number of digits in an author phone number
pub const DEFAULT_PHONE_NUMBER_DIGITS: usize = 10;

/// Business rules applied by [`EntityValidator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Case-sensitive substrings that disqualify a title
    pub clickbait_phrases: Vec<String>,
    /// Exact values accepted for a post category
    pub categories: Vec<String>,
    /// Minimum length of non-empty content
    pub min_content_chars: usize,
    /// Maximum length of a summary
    pub max_summary_chars: usize,
    /// Exact phone number length
    pub phone_number_digits: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            clickbait_phrases: DEFAULT_CLICKBAIT_PHRASES.iter().map(ToString::to_string).collect(),
            categories: DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect(),
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
            max_summary_chars: DEFAULT_MAX_SUMMARY_CHARS,
            phone_number_digits: DEFAULT_PHONE_NUMBER_DIGITS,
        }
    }
}

impl ValidationRules {
    /// Check that the rules themselves are usable
    pub fn check(&self) -> Result<(), String> {
        if self.categories.is_empty() {
            return Err("at least one post category must be configured".to_string());
        }
        if self.categories.iter().any(|c| c.is_empty()) {
            return Err("post categories cannot be empty strings".to_string());
        }
        // An empty phrase is a substring of every title.
        if self.clickbait_phrases.iter().any(|p| p.is_empty()) {
            return Err("clickbait phrases cannot be empty strings".to_string());
        }
        if self.phone_number_digits == 0 {
            return Err("phone_number_digits must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// True for characters in Unicode general category `Nd`
#[must_use]
pub fn is_decimal_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

/// Applies [`ValidationRules`] to candidate field values and entities
#[derive(Debug, Clone, Default)]
pub struct EntityValidator {
    rules: ValidationRules,
}

impl EntityValidator {
    /// Create a validator for the given rules
    #[must_use]
    pub const fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// The rules in effect
    #[must_use]
    pub const fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Author name must be non-empty
    pub fn validate_name<'a>(&self, name: &'a str) -> Result<&'a str, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Required { field: "name" });
        }
        Ok(name)
    }

    /// Phone number must be exactly `phone_number_digits` decimal digits
    ///
    /// Any Unicode decimal digit (general category `Nd`) counts, not only
    /// ASCII `0-9`.
    pub fn validate_phone_number<'a>(&self, phone: &'a str) -> Result<&'a str, ValidationError> {
        let digits = self.rules.phone_number_digits;
        if phone.chars().count() != digits || !phone.chars().all(is_decimal_digit) {
            return Err(ValidationError::InvalidFormat {
                field: "phone_number",
                reason: format!("must be exactly {digits} digits"),
            });
        }
        Ok(phone)
    }

    /// Title must be non-empty and free of clickbait phrases
    pub fn validate_title<'a>(&self, title: &'a str) -> Result<&'a str, ValidationError> {
        if title.is_empty() {
            return Err(ValidationError::Required { field: "title" });
        }
        if let Some(phrase) = self
            .rules
            .clickbait_phrases
            .iter()
            .find(|phrase| title.contains(phrase.as_str()))
        {
            return Err(ValidationError::DisallowedContent {
                field: "title",
                phrase: phrase.clone(),
            });
        }
        Ok(title)
    }

    /// Content, when present and non-empty, must reach the minimum length
    pub fn validate_content<'a>(
        &self,
        content: Option<&'a str>,
    ) -> Result<Option<&'a str>, ValidationError> {
        if let Some(text) = content.filter(|text| !text.is_empty()) {
            let actual = text.chars().count();
            let min = self.rules.min_content_chars;
            if actual < min {
                return Err(ValidationError::TooShort {
                    field: "content",
                    min,
                    actual,
                });
            }
        }
        Ok(content)
    }

    /// Summary, when present and non-empty, must not exceed the maximum length
    pub fn validate_summary<'a>(
        &self,
        summary: Option<&'a str>,
    ) -> Result<Option<&'a str>, ValidationError> {
        if let Some(text) = summary.filter(|text| !text.is_empty()) {
            let actual = text.chars().count();
            let max = self.rules.max_summary_chars;
            if actual > max {
                return Err(ValidationError::TooLong {
                    field: "summary",
                    max,
                    actual,
                });
            }
        }
        Ok(summary)
    }

    /// Category must exactly match one of the configured categories
    pub fn validate_category<'a>(
        &self,
        category: Option<&'a str>,
    ) -> Result<&'a str, ValidationError> {
        match category {
            Some(value) if self.rules.categories.iter().any(|c| c == value) => Ok(value),
            other => Err(ValidationError::NotAllowed {
                field: "category",
                value: other.map(ToString::to_string),
                allowed: self.rules.categories.clone(),
            }),
        }
    }

    /// Validate every field of a new author
    pub fn validate_new_author(&self, candidate: NewAuthor) -> Result<NewAuthor, ValidationError> {
        self.validate_name(&candidate.name)?;
        self.validate_phone_number(&candidate.phone_number)?;
        Ok(candidate)
    }

    /// Validate the fields an author update carries
    pub fn validate_author_changes(
        &self,
        changes: AuthorChanges,
    ) -> Result<AuthorChanges, ValidationError> {
        if let Some(name) = &changes.name {
            self.validate_name(name)?;
        }
        if let Some(phone) = &changes.phone_number {
            self.validate_phone_number(phone)?;
        }
        Ok(changes)
    }

    /// Validate every field of a new post
    pub fn validate_new_post(&self, candidate: NewPost) -> Result<NewPost, ValidationError> {
        self.validate_title(&candidate.title)?;
        self.validate_content(candidate.content.as_deref())?;
        self.validate_summary(candidate.summary.as_deref())?;
        self.validate_category(candidate.category.as_deref())?;
        Ok(candidate)
    }

    /// Validate the fields a post update carries
    pub fn validate_post_changes(
        &self,
        changes: PostChanges,
    ) -> Result<PostChanges, ValidationError> {
        if let Some(title) = &changes.title {
            self.validate_title(title)?;
        }
        if let Some(content) = &changes.content {
            self.validate_content(content.as_deref())?;
        }
        if let Some(summary) = &changes.summary {
            self.validate_summary(summary.as_deref())?;
        }
        if let Some(category) = &changes.category {
            self.validate_category(Some(category.as_str()))?;
        }
        Ok(changes)
    }
}
