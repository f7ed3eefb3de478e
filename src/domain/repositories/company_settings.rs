use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::company_settings::CompanySettingsModel;

#[automock]
#[async_trait]
pub trait CompanySettingsRepository {
    async fn get(&self) -> Result<CompanySettingsModel>;
}
