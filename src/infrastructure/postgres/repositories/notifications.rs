use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into};

use crate::{
    domain::{
        entities::notifications::InsertNotificationEntity, repositories::notifier::InAppNotifier,
        value_objects::notifications::InAppNotificationModel,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::notifications},
};

pub struct InAppNotificationPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InAppNotificationPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InAppNotifier for InAppNotificationPostgres {
    async fn insert(&self, notification: InAppNotificationModel) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let entity = InsertNotificationEntity {
            user_id: notification.user_id,
            type_: notification.type_,
            title: notification.title,
            message: notification.message,
            metadata: notification.metadata,
        };

        insert_into(notifications::table)
            .values(&entity)
            .execute(&mut conn)?;

        Ok(())
    }
}
