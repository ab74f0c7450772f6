use serde::{de::IgnoredAny, Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::Clearable;
use crate::error::{ValidationErrors, REQUIRED_MESSAGE};

pub const MAX_CONTENT_CHARS: usize = 200;
pub const STARPOINT_MIN: i32 = 0;
pub const STARPOINT_MAX: i32 = 10;

const NOT_NULL: &str = "This field may not be null.";

/// One-line review attached to a movie
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i64,
    /// Owning movie ID
    #[serde(rename = "movie")]
    pub movie_id: i64,
    pub content: String,
    pub starpoint: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Request body for creating or updating a review.
///
/// The owning movie always comes from the URL, so a `movie` key in the
/// body is never read.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub content: Clearable<RawContent>,
    /// Integer, or a string holding one
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub starpoint: Clearable<RawStarpoint>,
}

/// Any JSON value sent as `content`; type errors surface as field errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawContent {
    Text(String),
    Other(IgnoredAny),
}

/// Any JSON value sent as `starpoint`; type errors surface as field errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawStarpoint {
    Int(i64),
    Text(String),
    Other(IgnoredAny),
}

impl From<&str> for RawContent {
    fn from(content: &str) -> Self {
        RawContent::Text(content.to_string())
    }
}

impl From<i64> for RawStarpoint {
    fn from(starpoint: i64) -> Self {
        RawStarpoint::Int(starpoint)
    }
}

/// Validated review ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub content: String,
    pub starpoint: i32,
}

/// Validated set of review modifications
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewChanges {
    pub content: Option<String>,
    pub starpoint: Option<i32>,
}

impl ReviewPayload {
    /// Both fields are required.
    pub fn into_new_review(self) -> Result<NewReview, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let content = required("content", self.content, &mut errors)
            .and_then(|c| check_content(c, &mut errors));
        let starpoint = required("starpoint", self.starpoint, &mut errors)
            .and_then(|s| check_starpoint(s, &mut errors));

        match (content, starpoint) {
            (Some(content), Some(starpoint)) if errors.is_empty() => {
                Ok(NewReview { content, starpoint })
            }
            _ => Err(errors),
        }
    }

    /// Only the fields present are validated and applied; `null` is rejected.
    pub fn into_changes(self) -> Result<ReviewChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let changes = ReviewChanges {
            content: optional("content", self.content, &mut errors)
                .and_then(|c| check_content(c, &mut errors)),
            starpoint: optional("starpoint", self.starpoint, &mut errors)
                .and_then(|s| check_starpoint(s, &mut errors)),
        };
        errors.into_result(changes)
    }
}

fn required<T>(field: &str, value: Clearable<T>, errors: &mut ValidationErrors) -> Option<T> {
    match value {
        Clearable::Set(value) => Some(value),
        Clearable::Clear => {
            errors.add(field, NOT_NULL);
            None
        }
        Clearable::Unchanged => {
            errors.add(field, REQUIRED_MESSAGE);
            None
        }
    }
}

fn optional<T>(field: &str, value: Clearable<T>, errors: &mut ValidationErrors) -> Option<T> {
    match value {
        Clearable::Set(value) => Some(value),
        Clearable::Clear => {
            errors.add(field, NOT_NULL);
            None
        }
        Clearable::Unchanged => None,
    }
}

fn check_content(content: RawContent, errors: &mut ValidationErrors) -> Option<String> {
    let RawContent::Text(content) = content else {
        errors.add("content", "Not a valid string.");
        return None;
    };
    let content = content.trim();
    if content.is_empty() {
        errors.add("content", "This field may not be blank.");
        return None;
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        errors.add(
            "content",
            format!("Ensure this field has no more than {} characters.", MAX_CONTENT_CHARS),
        );
        return None;
    }
    Some(content.to_string())
}

fn check_starpoint(starpoint: RawStarpoint, errors: &mut ValidationErrors) -> Option<i32> {
    let value = match starpoint {
        RawStarpoint::Int(value) => Some(value),
        RawStarpoint::Text(text) => text.trim().parse::<i64>().ok(),
        RawStarpoint::Other(_) => None,
    };
    let Some(value) = value else {
        errors.add("starpoint", "A valid integer is required.");
        return None;
    };
    match i32::try_from(value) {
        Ok(value) if (STARPOINT_MIN..=STARPOINT_MAX).contains(&value) => Some(value),
        _ => {
            errors.add(
                "starpoint",
                format!(
                    "Ensure this value is between {} and {}.",
                    STARPOINT_MIN, STARPOINT_MAX
                ),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> ReviewPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_new_review_valid() {
        let review = payload(r#"{"content": "  great ", "starpoint": 5, "movie": 999}"#)
            .into_new_review()
            .unwrap();
        assert_eq!(
            review,
            NewReview {
                content: "great".to_string(),
                starpoint: 5
            }
        );
    }

    #[test]
    fn test_new_review_missing_fields() {
        let errors = payload("{}").into_new_review().unwrap_err();
        assert_eq!(errors.field("content"), Some(&[REQUIRED_MESSAGE.to_string()][..]));
        assert_eq!(errors.field("starpoint"), Some(&[REQUIRED_MESSAGE.to_string()][..]));
    }

    #[test]
    fn test_new_review_out_of_range() {
        let errors = payload(r#"{"content": "meh", "starpoint": 11}"#)
            .into_new_review()
            .unwrap_err();
        assert!(errors.field("starpoint").is_some());
        assert!(errors.field("content").is_none());
    }

    #[test]
    fn test_new_review_too_long() {
        let content = "가".repeat(MAX_CONTENT_CHARS + 1);
        let errors = ReviewPayload {
            content: Clearable::Set(RawContent::from(content.as_str())),
            starpoint: Clearable::Set(RawStarpoint::from(3)),
        }
        .into_new_review()
        .unwrap_err();
        assert!(errors.field("content").is_some());
    }

    #[test]
    fn test_changes_are_partial() {
        let changes = payload(r#"{"starpoint": 2}"#).into_changes().unwrap();
        assert_eq!(
            changes,
            ReviewChanges {
                content: None,
                starpoint: Some(2)
            }
        );
    }

    #[test]
    fn test_new_review_rejects_null() {
        let errors = payload(r#"{"content": null, "starpoint": null}"#)
            .into_new_review()
            .unwrap_err();
        assert_eq!(errors.field("content"), Some(&[NOT_NULL.to_string()][..]));
        assert_eq!(errors.field("starpoint"), Some(&[NOT_NULL.to_string()][..]));
    }

    #[test]
    fn test_changes_reject_null() {
        let errors = payload(r#"{"starpoint": null}"#).into_changes().unwrap_err();
        assert!(errors.field("starpoint").is_some());
        assert!(errors.field("content").is_none());
    }

    #[test]
    fn test_starpoint_accepts_numeric_string() {
        let review = payload(r#"{"content": "fine", "starpoint": " 7 "}"#)
            .into_new_review()
            .unwrap();
        assert_eq!(review.starpoint, 7);
    }

    #[test]
    fn test_type_errors_are_reported_per_field() {
        let errors = payload(r#"{"content": 12, "starpoint": "five"}"#)
            .into_new_review()
            .unwrap_err();
        assert_eq!(errors.field("content"), Some(&["Not a valid string.".to_string()][..]));
        assert_eq!(
            errors.field("starpoint"),
            Some(&["A valid integer is required.".to_string()][..])
        );

        let errors = payload(r#"{"content": "ok", "starpoint": 4.5}"#)
            .into_new_review()
            .unwrap_err();
        assert!(errors.field("starpoint").is_some());
    }

    #[test]
    fn test_changes_reject_blank_content() {
        assert!(payload(r#"{"content": " "}"#).into_changes().is_err());
    }

    #[test]
    fn test_review_serializes_movie_key() {
        let now = chrono::Utc::now();
        let review = Review {
            id: 1,
            movie_id: 5,
            content: "great".to_string(),
            starpoint: 5,
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["movie"], 5);
        assert!(value.get("movie_id").is_none());
    }
}
