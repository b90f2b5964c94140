//! Single-writer actor for SQLite.
//!
//! SQLite allows one writer at a time; funneling every mutation through one
//! dedicated connection avoids `SQLITE_BUSY` churn under concurrent
//! requests. Reads keep using the pool directly.

use std::any::Any;

use diesel::{Connection, SqliteConnection};
use folio_core::errors::{DatabaseError, Error, Result};
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for submitting write jobs to the actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Runs `job` inside an immediate transaction on the writer connection.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                reply_tx,
            ))
            .await
            .map_err(|_| {
                Error::Database(DatabaseError::Internal("writer actor stopped".to_string()))
            })?;

        let boxed = reply_rx.await.map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "writer actor dropped the reply".to_string(),
            ))
        })??;

        boxed.downcast::<T>().map(|v| *v).map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "writer actor returned an unexpected type".to_string(),
            ))
        })
    }
}

/// Spawns the background writer task. The actor owns one pooled connection
/// for its whole lifetime and processes jobs serially.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    let mut conn = super::get_connection(&pool)?;
    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away; that is not our problem.
            let _ = reply_tx.send(result);
        }
    });

    Ok(WriteHandle { tx })
}
