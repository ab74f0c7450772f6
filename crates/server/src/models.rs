mod movie;
mod review;

use serde::{Deserialize, Deserializer};

pub use movie::{normalize_query, normalize_title, CreateMovie, Movie, UpdateMovie};
pub use review::{
    NewReview, Review, ReviewChanges, ReviewPayload, MAX_CONTENT_CHARS, STARPOINT_MAX,
    STARPOINT_MIN,
};

/// Wrapper for optional fields that can be explicitly cleared.
/// - `Unchanged`: Field was not provided in the request, keep existing value
/// - `Clear`: Field was explicitly set to null, clear the value
/// - `Set(T)`: Field was set to a new value
#[derive(Debug, Clone, PartialEq)]
pub enum Clearable<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for Clearable<T> {
    fn default() -> Self {
        Clearable::Unchanged
    }
}

impl<T> Clearable<T> {
    pub fn resolve(self, existing: Option<T>) -> Option<T> {
        match self {
            Clearable::Unchanged => existing,
            Clearable::Clear => None,
            Clearable::Set(v) => Some(v),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Clearable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt = Option::<T>::deserialize(deserializer)?;
        Ok(match opt {
            Some(v) => Clearable::Set(v),
            None => Clearable::Clear,
        })
    }
}
