//! Single writer actor.
//!
//! Every mutation runs on one dedicated connection inside an `IMMEDIATE`
//! transaction, one job at a time. Snapshot creation relies on this to read
//! the previous snapshot and insert the new one without interleaving.

use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use kingston_core::errors::{Error, Result};
use log::{debug, error};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

type BoxedValue = Box<dyn Any + Send + 'static>;
type Job = Box<dyn FnOnce(&mut SqliteConnection) -> Result<BoxedValue> + Send + 'static>;
type Reply = oneshot::Sender<Result<BoxedValue>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction; returning an error rolls
    /// it back and the error is handed back to the caller unchanged.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();
        let boxed: Job = Box::new(move |c| job(c).map(|v| Box::new(v) as BoxedValue));

        self.tx
            .send((boxed, ret_tx))
            .await
            .map_err(|_| Error::Unexpected("database writer has stopped".to_string()))?;

        let value = ret_rx.await.map_err(|_| {
            Error::Unexpected("database writer dropped the job without replying".to_string())
        })??;

        value
            .downcast::<T>()
            .map(|v| *v)
            .map_err(|_| Error::Unexpected("writer job returned an unexpected type".to_string()))
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
///
/// The actor holds one pooled connection for its lifetime and stops once
/// every `WriteHandle` has been dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not acquire a connection: {}", e);
                // Dropping rx fails every pending and future exec call
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<BoxedValue> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The requester may have gone away (e.g. request cancelled)
            let _ = reply_tx.send(result);
        }
        debug!("Writer actor stopped");
    });

    WriteHandle { tx }
}
