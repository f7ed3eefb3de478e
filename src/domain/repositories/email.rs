use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::notifications::EmailMessage;

/// SMTP collaborator. A failed send surfaces as an error and is not retried
/// here.
#[automock]
#[async_trait]
pub trait EmailSender {
    async fn send(&self, message: EmailMessage) -> Result<()>;
}
