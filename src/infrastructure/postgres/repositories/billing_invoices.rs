use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::invoices::InvoiceEntity,
        repositories::billing_invoices::BillingInvoiceRepository,
        value_objects::invoice_statuses::InvoiceStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::invoices},
};

pub struct BillingInvoicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BillingInvoicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BillingInvoiceRepository for BillingInvoicePostgres {
    async fn list_issuable_scheduled(&self, now: DateTime<Utc>) -> Result<Vec<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = invoices::table
            .filter(invoices::status.eq(InvoiceStatus::Scheduled.to_string()))
            .filter(invoices::created_at.le(now))
            .order(invoices::created_at.asc())
            .load::<InvoiceEntity>(&mut conn)?;

        Ok(results)
    }

    async fn list_pending(&self) -> Result<Vec<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = invoices::table
            .filter(invoices::status.eq(InvoiceStatus::Pending.to_string()))
            .order(invoices::due_date.asc())
            .load::<InvoiceEntity>(&mut conn)?;

        Ok(results)
    }

    async fn mark_issued(&self, invoice_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(invoices::table.filter(invoices::id.eq(invoice_id)))
            .set(invoices::status.eq(InvoiceStatus::Pending.to_string()))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn mark_overdue(&self, invoice_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(invoices::table.filter(invoices::id.eq(invoice_id)))
            .set(invoices::status.eq(InvoiceStatus::Due.to_string()))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn mark_first_reminder_sent(&self, invoice_id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(invoices::table.filter(invoices::id.eq(invoice_id)))
            .set((
                invoices::first_reminder_sent.eq(true),
                invoices::first_reminder_sent_at.eq(Some(at)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn mark_second_reminder_sent(&self, invoice_id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(invoices::table.filter(invoices::id.eq(invoice_id)))
            .set((
                invoices::second_reminder_sent.eq(true),
                invoices::second_reminder_sent_at.eq(Some(at)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
