mod client;
mod error;
mod search;
pub mod models;

pub use client::KmdbClient;
pub use error::KmdbError;
pub use models::{Actor, Collection, Director, MovieRecord, Plot, SearchResponse};
pub use search::SearchParams;

pub type Result<T> = std::result::Result<T, KmdbError>;
