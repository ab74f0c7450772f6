use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::Clearable;
use crate::error::ValidationErrors;

/// Strip every whitespace character from a search query.
pub fn normalize_query(query: &str) -> String {
    query.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Search form of a title: no whitespace, lower-cased.
///
/// Both the stored `search_title` and the lookup key go through this, which
/// is what makes the substring match case-insensitive.
pub fn normalize_title(title: &str) -> String {
    normalize_query(title).to_lowercase()
}

/// Movie entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    pub id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,

    /// Provider document ID (KMDb DOCID), absent for hand-made entries
    pub docid: Option<String>,
    /// Display title
    pub title: String,
    /// Title without whitespace, lower-cased; used for substring search
    pub search_title: String,
    /// English title
    pub title_eng: Option<String>,
    /// Production year
    pub prod_year: Option<i32>,
    pub nation: Option<String>,
    pub genre: Option<String>,
    /// Comma-separated director names
    pub directors: Option<String>,
    /// Comma-separated actor names
    pub actors: Option<String>,
    /// Running time in minutes
    pub runtime: Option<i32>,
    /// Age rating label
    pub grade: Option<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
    /// Release date as `YYYYMMDD`
    pub release_date: Option<String>,
}

/// Request body for creating or fully replacing a movie
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateMovie {
    #[serde(default)]
    pub docid: Option<String>,
    pub title: String,
    #[serde(default)]
    pub title_eng: Option<String>,
    #[serde(default)]
    pub prod_year: Option<i32>,
    #[serde(default)]
    pub nation: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub directors: Option<String>,
    #[serde(default)]
    pub actors: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl CreateMovie {
    /// Trim the title and reject blank ones.
    pub fn validate(mut self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            errors.add("title", "This field may not be blank.");
        }
        if let Some(docid) = &self.docid {
            if docid.trim().is_empty() {
                errors.add("docid", "This field may not be blank.");
            }
        }

        errors.into_result(self)
    }

    pub fn search_title(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Request body for partially updating a movie.
///
/// Omitted fields are kept, `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMovie {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub docid: Clearable<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title_eng: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub prod_year: Clearable<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub nation: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub genre: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub directors: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub actors: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub runtime: Clearable<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub grade: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub plot: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub poster_url: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub release_date: Clearable<String>,
}

impl UpdateMovie {
    /// Merge onto an existing movie, yielding the full validated field set.
    pub fn apply(self, existing: Movie) -> Result<CreateMovie, ValidationErrors> {
        CreateMovie {
            docid: self.docid.resolve(existing.docid),
            title: self.title.unwrap_or(existing.title),
            title_eng: self.title_eng.resolve(existing.title_eng),
            prod_year: self.prod_year.resolve(existing.prod_year),
            nation: self.nation.resolve(existing.nation),
            genre: self.genre.resolve(existing.genre),
            directors: self.directors.resolve(existing.directors),
            actors: self.actors.resolve(existing.actors),
            runtime: self.runtime.resolve(existing.runtime),
            grade: self.grade.resolve(existing.grade),
            plot: self.plot.resolve(existing.plot),
            poster_url: self.poster_url.resolve(existing.poster_url),
            release_date: self.release_date.resolve(existing.release_date),
        }
        .validate()
    }
}
