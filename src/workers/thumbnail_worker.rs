use futures_util::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicNackOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::infrastructure::storage::store::ObjectStore;
use crate::modules::thumbnail::events::ThumbnailJob;
use crate::modules::thumbnail::pipeline::{Job, ThumbnailPipeline};
use crate::state::AppState;

/// What the worker tells the broker about one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    /// Done, remove from queue.
    Ack,
    /// Transient failure, redeliver.
    Requeue,
    /// Permanent failure, drop (dead-letterable).
    Reject,
}

pub async fn start_thumbnail_worker(state: AppState) {
    info!("🖼️ Starting Thumbnail Worker...");

    if !state.queue.is_connected().await {
        warn!("RabbitMQ connection is not established");
    }

    let channel = state.queue.get_channel().await;
    let channel_guard = channel.lock().await;

    let queue_name = state.config.thumbnail_queue.clone();

    let _queue = channel_guard
        .queue_declare(
            &queue_name,
            QueueDeclareOptions {
                durable: true,
                ..QueueDeclareOptions::default()
            },
            FieldTable::default(),
        )
        .await
        .expect("Failed to declare queue");

    let mut consumer = channel_guard
        .basic_consume(
            &queue_name,
            "thumbnail_worker",
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await
        .expect("Failed to create consumer");

    // The consumer stream is independent of the channel guard.
    drop(channel_guard);

    info!("🖼️ Thumbnail Worker listening on '{}'", queue_name);

    let pipeline = ThumbnailPipeline::new(state.config.thumbnail_width, state.config.jpeg_quality);

    // Deliveries are processed sequentially; a failed one is settled and the
    // loop moves on, so one bad message never stalls the rest.
    while let Some(delivery) = consumer.next().await {
        if let Ok(delivery) = delivery {
            let action = handle_delivery(
                &pipeline,
                &state.storage,
                &state.config.destination_bucket,
                &delivery.data,
            )
            .await;

            let settled = match action {
                JobAction::Ack => delivery.ack(BasicAckOptions::default()).await,
                JobAction::Requeue => {
                    delivery
                        .nack(BasicNackOptions {
                            requeue: true,
                            ..BasicNackOptions::default()
                        })
                        .await
                }
                JobAction::Reject => {
                    delivery
                        .nack(BasicNackOptions {
                            requeue: false,
                            ..BasicNackOptions::default()
                        })
                        .await
                }
            };

            if let Err(e) = settled {
                error!("Failed to settle message: {}", e);
            }
        }
    }
}

/// Runs one queue message through the pipeline and decides its fate. Every
/// failure is caught and converted into an explicit broker signal.
pub async fn handle_delivery<S: ObjectStore>(
    pipeline: &ThumbnailPipeline,
    store: &S,
    destination_bucket: &str,
    payload: &[u8],
) -> JobAction {
    let msg: ThumbnailJob = match serde_json::from_slice(payload) {
        Ok(msg) => msg,
        Err(e) => {
            error!("❌ Failed to parse job: {}", e);
            return JobAction::Reject;
        }
    };

    if let Err(e) = msg.validate() {
        error!("❌ Invalid job for key '{}': {}", msg.key, e);
        return JobAction::Reject;
    }

    let job_id = Uuid::new_v4();
    info!("📦 [{}] Received queue message to process: {}", job_id, msg.key);

    let job = Job::new(&msg.bucket, &msg.key, destination_bucket);

    match pipeline.run(store, &job).await {
        Ok(stored) => {
            info!(
                "✅ [{}] Job completed: {}/{} ({}x{})",
                job_id, stored.bucket, stored.key, stored.width, stored.height
            );
            JobAction::Ack
        }
        Err(e) if e.is_retryable() => {
            warn!(
                "🔁 [{}] Transient failure for {}: {} (requeueing)",
                job_id, msg.key, e
            );
            JobAction::Requeue
        }
        Err(e) => {
            error!("❌ [{}] Permanent failure for {}: {}", job_id, msg.key, e);
            JobAction::Reject
        }
    }
}
