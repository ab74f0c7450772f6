mod movie;
mod review;

pub use movie::MovieRepository;
pub use review::ReviewRepository;
