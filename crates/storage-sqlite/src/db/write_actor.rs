use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::error;
use paragliding_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

// Type alias for the job to be executed by the writer actor.
// We use core::Result here since that's what callers expect.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Default upper bound on how long a caller waits for its write job.
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job<Box<dyn Any + Send + 'static>>, Reply)>,
    job_timeout: Duration,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection,
    /// inside one immediate transaction.
    ///
    /// Fails with `DatabaseError::Timeout` when the job is not answered within
    /// the handle's timeout. A job that already started still runs to
    /// completion on the actor.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| {
                Error::Database(DatabaseError::Internal(
                    "Writer actor is not running".to_string(),
                ))
            })?;

        let reply = tokio::time::timeout(self.job_timeout, ret_rx)
            .await
            .map_err(|_| {
                Error::Database(DatabaseError::Timeout(format!(
                    "Write job not completed within {:?}",
                    self.job_timeout
                )))
            })?
            .map_err(|_| {
                Error::Database(DatabaseError::Internal(
                    "Writer actor dropped the reply".to_string(),
                ))
            })?;

        reply.and_then(|boxed| {
            boxed.downcast::<T>().map(|v| *v).map_err(|_| {
                Error::Database(DatabaseError::Internal(
                    "Unexpected writer result type".to_string(),
                ))
            })
        })
    }
}

/// Starts the single writer to the database on its own OS thread.
///
/// The actor owns one pooled connection and runs jobs serially. SQLite calls
/// block, so they stay off the async runtime's worker threads.
pub fn spawn_writer(pool: DbPool, job_timeout: Duration) -> WriteHandle {
    let (tx, rx) = mpsc::channel::<(Job<Box<dyn Any + Send + 'static>>, Reply)>(1024);

    let spawned = std::thread::Builder::new()
        .name("sqlite-writer".to_string())
        .spawn(move || run_writer(pool, rx));
    if let Err(e) = spawned {
        // The receiver went down with the closure, so every exec reports the
        // actor as not running.
        error!("Failed to start writer thread: {}", e);
    }

    WriteHandle { tx, job_timeout }
}

fn run_writer(pool: DbPool, mut rx: mpsc::Receiver<(Job<Box<dyn Any + Send + 'static>>, Reply)>) {
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(e) => {
            error!("Writer actor could not acquire a connection: {}", e);
            while let Some((_, reply_tx)) = rx.blocking_recv() {
                let _ = reply_tx.send(Err(Error::Database(DatabaseError::ConnectionFailed(
                    e.to_string(),
                ))));
            }
            return;
        }
    };

    while let Some((job, reply_tx)) = rx.blocking_recv() {
        let result: Result<Box<dyn Any + Send + 'static>> = conn
            .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
            .map_err(|e: StorageError| e.into());

        // The caller may have timed out and gone away.
        let _ = reply_tx.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};
    use diesel::RunQueryDsl;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_failed_job_rolls_back() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("writer.db").to_string_lossy().to_string();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone(), DEFAULT_JOB_TIMEOUT);

        let result: Result<()> = writer
            .exec(|conn| {
                diesel::sql_query("UPDATE track_sequence SET next_value = 42")
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Err(Error::Unexpected("abort".to_string()))
            })
            .await;
        assert!(result.is_err());

        let value: i64 = writer
            .exec(|conn| {
                use crate::schema::track_sequence::dsl::*;
                use diesel::prelude::*;
                Ok(track_sequence
                    .select(next_value)
                    .first::<i64>(conn)
                    .map_err(StorageError::from)?)
            })
            .await
            .unwrap();
        assert_eq!(value, 0);
    }

    #[tokio::test]
    async fn test_slow_job_times_out_and_writer_keeps_serving() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("writer.db").to_string_lossy().to_string();
        let pool = create_pool(&db_path).unwrap();
        run_migrations(&pool).unwrap();
        let writer = spawn_writer((*pool).clone(), Duration::from_millis(50));

        let result: Result<()> = writer
            .exec(|_conn| {
                std::thread::sleep(Duration::from_millis(300));
                Ok(())
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::Timeout(_)))
        ));

        // Give the slow job time to finish before the next one is queued.
        tokio::time::sleep(Duration::from_millis(400)).await;
        let value: i64 = writer.exec(|_conn| Ok(7)).await.unwrap();
        assert_eq!(value, 7);
    }
}
