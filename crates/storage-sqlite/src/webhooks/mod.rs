mod model;
mod repository;

pub use model::WebhookDB;
pub use repository::WebhookRepository;
