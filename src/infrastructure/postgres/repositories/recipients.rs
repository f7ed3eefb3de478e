use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::students::StudentEntity, repositories::recipients::RecipientRepository,
        value_objects::students::StudentContactModel,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{app_users, students},
    },
};

pub struct RecipientPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl RecipientPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl RecipientRepository for RecipientPostgres {
    async fn student_contact(&self, student_id: Uuid) -> Result<StudentContactModel> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let student = students::table
            .filter(students::id.eq(student_id))
            .first::<StudentEntity>(&mut conn)?;

        Ok(StudentContactModel::from(student))
    }

    async fn list_admin_user_ids(&self) -> Result<Vec<Uuid>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let ids = app_users::table
            .filter(app_users::role.eq_any(vec!["admin", "superadmin"]))
            .filter(app_users::status.eq("active"))
            .select(app_users::id)
            .load::<Uuid>(&mut conn)?;

        Ok(ids)
    }
}
