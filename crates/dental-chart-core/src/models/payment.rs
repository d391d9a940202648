//! Payment records from the transactions API.

use serde::{Deserialize, Serialize};

/// A patient payment as returned by the transactions API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Transaction ID
    pub id: String,
    /// Patient the payment belongs to, when the API includes it
    #[serde(default, alias = "patientId")]
    pub patient_id: Option<String>,
    /// Payment date
    pub date: String,
    /// Treatment billed
    #[serde(default)]
    pub treatment: Option<String>,
    /// Amount charged
    pub amount: f64,
    /// Gateway status (`success`, `pending`, `overdue`, ...)
    #[serde(default)]
    pub status: String,
}
