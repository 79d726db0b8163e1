//! Bounded pool of delivery workers
//!
//! `rate_limit` workers share one queue of the same depth. Submitting never
//! blocks: when the queue is full the batch is handed back to the caller.
//! Shutdown closes the queue once and waits for the workers to finish what
//! was already queued.

use super::delivery::DeliveryClient;
use crate::storage::{MemStorage, StoreSnapshot};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Fixed-size set of senders draining a bounded queue
#[derive(Debug)]
pub struct WorkerPool {
    sender: Option<mpsc::Sender<StoreSnapshot>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers; failed batches have their counters put back into `store`
    pub fn new(size: usize, client: Arc<DeliveryClient>, store: Arc<MemStorage>) -> Self {
        let size = size.max(1);
        let (sender, receiver) = mpsc::channel::<StoreSnapshot>(size);
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|id| {
                tokio::spawn(Self::worker(
                    id,
                    Arc::clone(&receiver),
                    Arc::clone(&client),
                    Arc::clone(&store),
                ))
            })
            .collect();

        info!("Started {} delivery workers", size);
        Self {
            sender: Some(sender),
            workers,
        }
    }

    async fn worker(
        id: usize,
        receiver: Arc<Mutex<mpsc::Receiver<StoreSnapshot>>>,
        client: Arc<DeliveryClient>,
        store: Arc<MemStorage>,
    ) {
        loop {
            let batch = { receiver.lock().await.recv().await };
            let Some(batch) = batch else { break };

            if let Err(e) = client.deliver(&batch).await {
                error!("Worker {} abandoned batch: {}", id, e);
                store.restore_counters(&batch.counter);
            }
        }
        debug!("Worker {} stopped", id);
    }

    /// Queue a batch, handing it back when the queue is full or closed
    pub fn submit(&self, batch: StoreSnapshot) -> std::result::Result<(), StoreSnapshot> {
        let Some(sender) = &self.sender else {
            return Err(batch);
        };
        sender.try_send(batch).map_err(|e| match e {
            mpsc::error::TrySendError::Full(batch) | mpsc::error::TrySendError::Closed(batch) => {
                batch
            }
        })
    }

    /// Close the queue and wait for every worker
    pub async fn shutdown(mut self) {
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            if let Err(e) = worker.await {
                error!("Delivery worker panicked: {}", e);
            }
        }
        info!("Delivery workers drained");
    }
}
