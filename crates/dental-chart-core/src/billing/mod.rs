//! Billing cross-reference for the chart screen.
//!
//! Maps the transactions API's payment records into the rows the billing
//! tab displays. The data is independent of the chart itself.

use serde::{Deserialize, Serialize};

use crate::models::PaymentRecord;

/// Display status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    /// `success` is paid, `overdue` stays overdue, anything else is pending.
    pub fn from_gateway(status: &str) -> Self {
        match status {
            "success" => PaymentStatus::Paid,
            "overdue" => PaymentStatus::Overdue,
            _ => PaymentStatus::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Overdue => "OVERDUE",
        }
    }
}

/// One row of the payment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub id: String,
    pub date: String,
    pub procedure: String,
    pub amount: f64,
    pub status: PaymentStatus,
}

impl From<&PaymentRecord> for PaymentRow {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            id: record.id.clone(),
            date: record.date.clone(),
            procedure: record
                .treatment
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Treatment".to_string()),
            amount: record.amount,
            status: PaymentStatus::from_gateway(&record.status),
        }
    }
}

/// The billing tab for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingSummary {
    pub patient_id: String,
    pub rows: Vec<PaymentRow>,
    /// Sum of every row's amount, regardless of status
    pub total_amount: f64,
}

impl BillingSummary {
    /// Build the summary. Records tagged with another patient's ID are
    /// dropped; untagged records are assumed to belong to this patient.
    pub fn for_patient(patient_id: &str, records: &[PaymentRecord]) -> Self {
        let rows: Vec<PaymentRow> = records
            .iter()
            .filter(|r| r.patient_id.as_deref().map_or(true, |id| id == patient_id))
            .map(PaymentRow::from)
            .collect();
        let total_amount: f64 = rows.iter().map(|r| r.amount).sum();

        Self {
            patient_id: patient_id.to_string(),
            rows,
            total_amount,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total still outstanding (pending + overdue).
    pub fn outstanding_amount(&self) -> f64 {
        self.rows
            .iter()
            .filter(|r| r.status != PaymentStatus::Paid)
            .map(|r| r.amount)
            .sum()
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, patient: Option<&str>, amount: f64, status: &str) -> PaymentRecord {
        PaymentRecord {
            id: id.into(),
            patient_id: patient.map(Into::into),
            date: "2024-02-20".into(),
            treatment: Some("Root Canal".into()),
            amount,
            status: status.into(),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(PaymentStatus::from_gateway("success"), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::from_gateway("failed"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from_gateway(""), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from_gateway("overdue"), PaymentStatus::Overdue);
    }

    #[test]
    fn test_summary_filters_other_patients() {
        let records = vec![
            record("t1", Some("p1"), 2500.0, "success"),
            record("t2", None, 800.0, "pending"),
            record("t3", Some("p2"), 9999.0, "success"),
        ];

        let summary = BillingSummary::for_patient("p1", &records);
        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.total_amount, 3300.0);
        assert_eq!(summary.outstanding_amount(), 800.0);
        assert_eq!(summary.rows[0].status, PaymentStatus::Paid);
    }

    #[test]
    fn test_missing_treatment_defaults() {
        let mut r = record("t1", None, 100.0, "success");
        r.treatment = None;
        assert_eq!(PaymentRow::from(&r).procedure, "Treatment");
    }

    #[test]
    fn test_empty_summary() {
        let summary = BillingSummary::for_patient("p1", &[]);
        assert!(summary.is_empty());
        assert_eq!(summary.total_amount, 0.0);
        assert!(summary.to_json().unwrap().contains("\"rows\": []"));
    }
}
