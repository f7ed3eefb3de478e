use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};

use crate::{
    domain::{
        entities::company_settings::CompanySettingsEntity,
        repositories::company_settings::CompanySettingsRepository,
        value_objects::company_settings::CompanySettingsModel,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::company_settings},
};

pub struct CompanySettingsPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CompanySettingsPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CompanySettingsRepository for CompanySettingsPostgres {
    async fn get(&self) -> Result<CompanySettingsModel> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Single-row table maintained by the admin dashboard.
        let entity = company_settings::table.first::<CompanySettingsEntity>(&mut conn)?;

        Ok(CompanySettingsModel::from(entity))
    }
}
