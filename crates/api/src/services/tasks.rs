//! Background task distribution.
//!
//! Handlers enqueue follow-up work (such as the verification email after
//! sign-up) through [`TaskDistributor`]. Running the tasks is the worker's
//! business, not the API's.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bazaar_core::{Email, UserId};

/// Task type name for the verification email.
pub const TASK_SEND_VERIFY_EMAIL: &str = "task:send_verify_email";

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to encode task payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("task queue unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendVerifyEmailPayload {
    pub user_id: UserId,
    pub username: String,
    pub email: Email,
}

/// Hands tasks to the background worker.
#[async_trait]
pub trait TaskDistributor: Send + Sync {
    /// Enqueue a verification email for a newly registered user.
    async fn distribute_send_verify_email(
        &self,
        payload: SendVerifyEmailPayload,
    ) -> Result<(), TaskError>;
}

/// Distributor for deployments without a worker: records each task in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTaskDistributor;

#[async_trait]
impl TaskDistributor for LoggingTaskDistributor {
    async fn distribute_send_verify_email(
        &self,
        payload: SendVerifyEmailPayload,
    ) -> Result<(), TaskError> {
        let encoded = serde_json::to_string(&payload)?;
        tracing::info!(
            task = TASK_SEND_VERIFY_EMAIL,
            user_id = %payload.user_id,
            payload = %encoded,
            "Enqueued task"
        );
        Ok(())
    }
}
