//! Unit tests for the field validators in validation.rs

use blog_store::models::{AuthorChanges, NewAuthor, NewPost, PostChanges};
use blog_store::validation::{
    is_decimal_digit, EntityValidator, ValidationRules, DEFAULT_CLICKBAIT_PHRASES,
};
use blog_store::ValidationError;
use proptest::prelude::*;

fn validator() -> EntityValidator {
    EntityValidator::default()
}

fn valid_post() -> NewPost {
    NewPost {
        title: "The Quiet Orchard".to_string(),
        content: Some("a".repeat(260)),
        summary: Some("b".repeat(100)),
        category: Some("Fiction".to_string()),
    }
}

#[test]
fn test_validate_name_valid() {
    assert_eq!(validator().validate_name("Jane Doe"), Ok("Jane Doe"));
}

#[test]
fn test_validate_name_empty() {
    assert_eq!(
        validator().validate_name(""),
        Err(ValidationError::Required { field: "name" })
    );
}

#[test]
fn test_validate_phone_number_valid() {
    assert_eq!(validator().validate_phone_number("1234567890"), Ok("1234567890"));
}

#[test]
fn test_validate_phone_number_all_zeros() {
    assert!(validator().validate_phone_number("0000000000").is_ok());
}

#[test]
fn test_validate_phone_number_too_short() {
    assert!(validator().validate_phone_number("123456789").is_err());
}

#[test]
fn test_validate_phone_number_too_long() {
    assert!(validator().validate_phone_number("12345678901").is_err());
}

#[test]
fn test_validate_phone_number_with_formatting() {
    assert!(validator().validate_phone_number("123-456-78").is_err());
    assert!(validator().validate_phone_number("+123456789").is_err());
}

#[test]
fn test_validate_phone_number_non_ascii_digits() {
    // Arabic-Indic and Devanagari digits are decimal digits too
    assert_eq!(
        validator().validate_phone_number("١٢٣٤٥٦٧٨٩٠"),
        Ok("١٢٣٤٥٦٧٨٩٠")
    );
    assert!(validator().validate_phone_number("१२३४५६७८९०").is_ok());
}

#[test]
fn test_validate_phone_number_non_decimal_numerics() {
    // Superscripts and fractions are numeric but not decimal digits
    assert!(validator().validate_phone_number("²²²²²²²²²²").is_err());
    assert!(validator().validate_phone_number("½½½½½½½½½½").is_err());
    assert!(validator().validate_phone_number("ⅠⅡⅢⅣⅤⅥⅦⅧⅨⅩ").is_err());
}

#[test]
fn test_validate_phone_number_error_kind() {
    let err = validator().validate_phone_number("abc").unwrap_err();
    assert_eq!(err.field(), "phone_number");
    assert_eq!(err.rule(), "format");
}

#[test]
fn test_validate_title_valid() {
    assert_eq!(validator().validate_title("The Quiet Orchard"), Ok("The Quiet Orchard"));
}

#[test]
fn test_validate_title_empty() {
    assert_eq!(
        validator().validate_title(""),
        Err(ValidationError::Required { field: "title" })
    );
}

#[test]
fn test_validate_title_each_clickbait_phrase() {
    for phrase in DEFAULT_CLICKBAIT_PHRASES {
        let title = format!("Some {phrase} story");
        assert!(validator().validate_title(&title).is_err(), "{title} should be rejected");
    }
}

#[test]
fn test_validate_title_substring_not_whole_word() {
    // "Top" inside "Topeka" still counts
    assert!(validator().validate_title("Letters from Topeka").is_err());
}

#[test]
fn test_validate_title_case_sensitive() {
    assert!(validator().validate_title("the best of times").is_ok());
    assert!(validator().validate_title("Showing the way").is_ok());
}

#[test]
fn test_validate_title_top_ten() {
    let err = validator().validate_title("Top 10 Orchards").unwrap_err();
    assert_eq!(
        err,
        ValidationError::DisallowedContent {
            field: "title",
            phrase: "Top".to_string(),
        }
    );
}

#[test]
fn test_validate_content_absent() {
    assert_eq!(validator().validate_content(None), Ok(None));
}

#[test]
fn test_validate_content_empty() {
    assert_eq!(validator().validate_content(Some("")), Ok(Some("")));
}

#[test]
fn test_validate_content_exactly_250_chars() {
    let content = "x".repeat(250);
    assert!(validator().validate_content(Some(&content)).is_ok());
}

#[test]
fn test_validate_content_249_chars() {
    let content = "x".repeat(249);
    assert_eq!(
        validator().validate_content(Some(&content)),
        Err(ValidationError::TooShort {
            field: "content",
            min: 250,
            actual: 249,
        })
    );
}

#[test]
fn test_validate_content_counts_characters_not_bytes() {
    // 200 characters, 400 bytes
    let content = "é".repeat(200);
    assert!(validator().validate_content(Some(&content)).is_err());
}

#[test]
fn test_validate_summary_absent() {
    assert_eq!(validator().validate_summary(None), Ok(None));
}

#[test]
fn test_validate_summary_exactly_250_chars() {
    let summary = "s".repeat(250);
    assert!(validator().validate_summary(Some(&summary)).is_ok());
}

#[test]
fn test_validate_summary_251_chars() {
    let summary = "s".repeat(251);
    assert_eq!(
        validator().validate_summary(Some(&summary)),
        Err(ValidationError::TooLong {
            field: "summary",
            max: 250,
            actual: 251,
        })
    );
}

#[test]
fn test_validate_category_valid() {
    assert_eq!(validator().validate_category(Some("Fiction")), Ok("Fiction"));
    assert_eq!(validator().validate_category(Some("Non-Fiction")), Ok("Non-Fiction"));
}

#[test]
fn test_validate_category_absent() {
    let err = validator().validate_category(None).unwrap_err();
    assert!(matches!(err, ValidationError::NotAllowed { value: None, .. }));
}

#[test]
fn test_validate_category_wrong_case() {
    assert!(validator().validate_category(Some("fiction")).is_err());
    assert!(validator().validate_category(Some("Non-fiction")).is_err());
}

#[test]
fn test_validate_category_unknown() {
    assert!(validator().validate_category(Some("Poetry")).is_err());
}

#[test]
fn test_validate_new_author() {
    let author = NewAuthor::new("Jane Doe", "1234567890");
    assert_eq!(validator().validate_new_author(author.clone()), Ok(author));
}

#[test]
fn test_validate_new_post_example() {
    let post = valid_post();
    assert_eq!(validator().validate_new_post(post.clone()), Ok(post));
}

#[test]
fn test_validate_new_post_clickbait_example() {
    let post = NewPost {
        title: "Top 10 Orchards".to_string(),
        ..valid_post()
    };
    assert!(validator().validate_new_post(post).is_err());
}

#[test]
fn test_validate_new_post_missing_category() {
    let post = NewPost {
        category: None,
        ..valid_post()
    };
    let err = validator().validate_new_post(post).unwrap_err();
    assert_eq!(err.field(), "category");
}

#[test]
fn test_validate_author_changes_only_checks_present_fields() {
    let changes = AuthorChanges {
        name: None,
        phone_number: Some("5555555555".to_string()),
    };
    assert!(validator().validate_author_changes(changes).is_ok());
    assert!(validator().validate_author_changes(AuthorChanges::default()).is_ok());
}

#[test]
fn test_validate_author_changes_empty_name() {
    let changes = AuthorChanges {
        name: Some(String::new()),
        phone_number: None,
    };
    assert!(validator().validate_author_changes(changes).is_err());
}

#[test]
fn test_validate_post_changes_clearing_content_is_allowed() {
    let changes = PostChanges {
        content: Some(None),
        summary: Some(None),
        ..PostChanges::default()
    };
    assert!(validator().validate_post_changes(changes).is_ok());
}

#[test]
fn test_validate_post_changes_short_content() {
    let changes = PostChanges {
        content: Some(Some("too short".to_string())),
        ..PostChanges::default()
    };
    assert!(validator().validate_post_changes(changes).is_err());
}

#[test]
fn test_custom_rules() {
    let rules = ValidationRules {
        clickbait_phrases: vec!["Shocking".to_string()],
        categories: vec!["Poetry".to_string()],
        min_content_chars: 10,
        max_summary_chars: 5,
        phone_number_digits: 7,
    };
    let validator = EntityValidator::new(rules);

    assert!(validator.validate_title("Top Poems").is_ok());
    assert!(validator.validate_title("Shocking Poems").is_err());
    assert!(validator.validate_category(Some("Poetry")).is_ok());
    assert!(validator.validate_category(Some("Fiction")).is_err());
    assert!(validator.validate_content(Some("ten chars!")).is_ok());
    assert!(validator.validate_summary(Some("six ch")).is_err());
    assert!(validator.validate_phone_number("5551234").is_ok());
    assert!(validator.validate_phone_number("1234567890").is_err());
}

proptest! {
    #[test]
    fn prop_phone_accepted_iff_ten_decimal_digits(phone in "\\PC{0,14}") {
        let expected = phone.chars().count() == 10 && phone.chars().all(is_decimal_digit);
        prop_assert_eq!(validator().validate_phone_number(&phone).is_ok(), expected);
    }

    #[test]
    fn prop_ten_digit_phones_accepted(phone in "[0-9]{10}") {
        prop_assert!(validator().validate_phone_number(&phone).is_ok());
    }

    #[test]
    fn prop_ten_unicode_digit_phones_accepted(phone in "[0-9٠-٩०-९০-৯０-９]{10}") {
        prop_assert!(validator().validate_phone_number(&phone).is_ok());
    }

    #[test]
    fn prop_titles_with_clickbait_rejected(
        prefix in "[a-z ]{0,20}",
        index in 0..DEFAULT_CLICKBAIT_PHRASES.len(),
        suffix in "[a-z ]{0,20}",
    ) {
        let title = format!("{prefix}{}{suffix}", DEFAULT_CLICKBAIT_PHRASES[index]);
        prop_assert!(validator().validate_title(&title).is_err());
    }

    #[test]
    fn prop_lowercase_titles_accepted(title in "[a-z][a-z ]{0,60}") {
        // Every default phrase starts with an uppercase letter
        prop_assert!(validator().validate_title(&title).is_ok());
    }

    #[test]
    fn prop_content_accepted_iff_empty_or_long_enough(content in "[a-z ]{0,400}") {
        let expected = content.is_empty() || content.chars().count() >= 250;
        prop_assert_eq!(validator().validate_content(Some(&content)).is_ok(), expected);
    }

    #[test]
    fn prop_summary_accepted_iff_empty_or_short_enough(summary in "[a-z ]{0,400}") {
        let expected = summary.is_empty() || summary.chars().count() <= 250;
        prop_assert_eq!(validator().validate_summary(Some(&summary)).is_ok(), expected);
    }

    #[test]
    fn prop_category_accepted_iff_exact_match(category in "\\PC{0,12}") {
        let expected = category == "Fiction" || category == "Non-Fiction";
        prop_assert_eq!(validator().validate_category(Some(&category)).is_ok(), expected);
    }
}
