use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use backend_domain::ports::PlayerRepository;
use backend_domain::{PendingWrite, WatchIntervals};

use crate::Metrics;

/// Producer side of the write queue. Cheap to clone; one per feed poller.
#[derive(Clone)]
pub struct WriteQueue {
    tx: mpsc::UnboundedSender<PendingWrite>,
    metrics: Arc<Metrics>,
}

impl WriteQueue {
    /// Never blocks. Only fails to deliver if the serializer has shut down.
    pub fn enqueue(&self, write: PendingWrite) {
        let player_id = write.player_id;
        if self.tx.send(write).is_err() {
            warn!("write serializer stopped, dropping write for player {}", player_id);
            self.metrics.record_write_dropped();
            return;
        }
        self.metrics.record_write_enqueued();
    }
}

/// Single consumer of the write queue: at most one store write is in flight.
pub struct WriteSerializer {
    rx: mpsc::UnboundedReceiver<PendingWrite>,
    repo: Arc<dyn PlayerRepository>,
    metrics: Arc<Metrics>,
    intervals: WatchIntervals,
}

pub fn write_queue(
    repo: Arc<dyn PlayerRepository>,
    metrics: Arc<Metrics>,
    intervals: WatchIntervals,
) -> (WriteQueue, WriteSerializer) {
    let (tx, rx) = mpsc::unbounded_channel();
    let queue = WriteQueue {
        tx,
        metrics: metrics.clone(),
    };
    let serializer = WriteSerializer {
        rx,
        repo,
        metrics,
        intervals,
    };
    (queue, serializer)
}

impl WriteSerializer {
    /// Drains the queue in FIFO order until every producer is gone.
    pub async fn run(mut self) {
        info!("write serializer started");
        while let Some(write) = self.rx.recv().await {
            self.apply(write).await;
        }
        info!("write queue closed, serializer exiting");
    }

    /// Applies one write, retrying in place with a fixed backoff. Returns false if dropped.
    pub async fn apply(&self, write: PendingWrite) -> bool {
        let attempts = self.intervals.write_retry_attempts.max(1);
        for attempt in 1..=attempts {
            match self.repo.upsert(write.player_id, &write.update).await {
                Ok(()) => {
                    debug!(player_id = write.player_id, update = ?write.update, "saved player data");
                    self.metrics.record_write_applied();
                    return true;
                }
                Err(err) if attempt < attempts => {
                    warn!(
                        "upsert failed for player {} (attempt {}/{}): {}",
                        write.player_id, attempt, attempts, err
                    );
                    self.metrics.record_write_retry();
                    sleep(self.intervals.write_retry_backoff).await;
                }
                Err(err) => {
                    error!(
                        "dropping write for player {} after {} attempts: {}",
                        write.player_id, attempts, err
                    );
                }
            }
        }
        self.metrics.record_write_dropped();
        false
    }
}
