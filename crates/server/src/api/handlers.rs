mod movies;
mod reviews;
mod search;

pub use movies::*;
pub use reviews::*;
pub use search::*;
