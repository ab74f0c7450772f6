mod movie_sync;
mod provider;
mod search;

pub use movie_sync::{record_to_movie, MovieSyncService};
pub use provider::MovieSearchProvider;
pub use search::{SearchOutcome, SearchService, NO_RESULTS_MESSAGE};
