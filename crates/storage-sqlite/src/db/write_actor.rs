//! Single-writer actor for serialized transactional writes.
//!
//! SQLite allows one writer at a time; funnelling every mutation through a
//! dedicated connection avoids lock contention and gives each job a real
//! transaction boundary. Jobs are closures executed inside
//! `immediate_transaction`: either the whole job commits or none of it is
//! visible.

use std::any::Any;

use diesel::{Connection, SqliteConnection};
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use billfold_core::errors::Result;

type ErasedResult = Result<Box<dyn Any + Send + 'static>>;
type Job = Box<dyn FnOnce(&mut SqliteConnection) -> ErasedResult + Send + 'static>;

/// Handle for submitting write jobs to the actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job, oneshot::Sender<ErasedResult>)>,
}

impl WriteHandle {
    /// Run a closure on the writer connection, inside a transaction, and
    /// return its result.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + Any + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        // The return value is type-erased through Any so one channel type
        // serves every job.
        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor channel closed - the actor has stopped");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender")
            .map(|boxed| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor returned an unexpected type"))
            })
    }
}

/// Spawn the writer actor. It owns one pooled connection for its lifetime and
/// processes jobs strictly in submission order.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job, oneshot::Sender<ErasedResult>)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to check out the writer connection from the pool");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: ErasedResult = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The receiver may have been dropped (caller cancelled); that is
            // not the actor's problem.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
