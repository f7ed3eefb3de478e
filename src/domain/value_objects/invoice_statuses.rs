use std::fmt::Display;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum InvoiceStatus {
    #[default]
    Scheduled,
    Pending,
    Due,
    Paid,
    Cancelled,
}

impl Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            InvoiceStatus::Scheduled => "scheduled",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Due => "due",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", status)
    }
}

impl TryFrom<&str> for InvoiceStatus {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "scheduled" => Ok(InvoiceStatus::Scheduled),
            "pending" => Ok(InvoiceStatus::Pending),
            "due" => Ok(InvoiceStatus::Due),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Unknown invoice status: {}", value)),
        }
    }
}
