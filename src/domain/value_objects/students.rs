use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::students::StudentEntity;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentContactModel {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<StudentEntity> for StudentContactModel {
    fn from(entity: StudentEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
        }
    }
}
