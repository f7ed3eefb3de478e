use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::students;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = students)]
pub struct StudentEntity {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
