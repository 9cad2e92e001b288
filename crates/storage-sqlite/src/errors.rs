//! Diesel, r2d2 and migration failures, and their mapping onto
//! `paragliding_core::Error`.

use diesel::result::Error as DieselError;
use paragliding_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-layer error. Never leaves the crate: repositories convert it with
/// `?` or [`IntoCore`] before returning.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    /// No pooled connection became free within the pool's connection timeout.
    #[error("Connection pool exhausted: {0}")]
    PoolTimeout(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A domain error raised inside a writer job. Passed through untouched so
    /// callers still see e.g. `NotFound`.
    #[error(transparent)]
    Core(#[from] Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolTimeout(e) => Error::Database(DatabaseError::Timeout(e.to_string())),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::Core(e) => e,
        }
    }
}

/// `.into_core()` for Diesel query results on the read path.
pub trait IntoCore<T> {
    fn into_core(self) -> paragliding_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> paragliding_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
