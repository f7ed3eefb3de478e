use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::value_objects::students::StudentContactModel;

#[automock]
#[async_trait]
pub trait RecipientRepository {
    async fn student_contact(&self, student_id: Uuid) -> Result<StudentContactModel>;
    /// Admin and superadmin users mirrored on every billing notification.
    async fn list_admin_user_ids(&self) -> Result<Vec<Uuid>>;
}
