//! SQLite storage implementation for the paragliding track service.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `paragliding-core` and contains:
//! - Database connection pooling and management
//! - The single writer actor that serializes every write
//! - Diesel migrations
//! - Repository implementations for tracks and webhook subscribers
//!
//! This crate is the only place in the application where Diesel dependencies exist.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod tracks;
pub mod webhooks;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use tracks::TrackRepository;
pub use webhooks::WebhookRepository;

// Re-export from paragliding-core for convenience
pub use paragliding_core::errors::{DatabaseError, Error, Result};
