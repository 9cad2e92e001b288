mod model;
mod repository;

pub use model::TrackDB;
pub use repository::TrackRepository;
