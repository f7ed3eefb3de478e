use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::notifications::InAppNotificationModel;

#[automock]
#[async_trait]
pub trait InAppNotifier {
    async fn insert(&self, notification: InAppNotificationModel) -> Result<()>;
}
