//! Appointment records, as far as the chart needs them.

use serde::{Deserialize, Serialize};

/// An appointment from the scheduling API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Appointment ID
    pub id: String,
    /// Patient the appointment belongs to
    #[serde(alias = "patientId")]
    pub patient_id: String,
    /// Appointment date
    pub date: String,
    /// Treatment performed or booked
    #[serde(default)]
    pub treatment: Option<String>,
    /// Scheduling status as sent by the API
    #[serde(default)]
    pub status: String,
}

impl Appointment {
    /// The API reports finished visits as either `completed` or `Finished`.
    pub fn is_completed(&self) -> bool {
        self.status == "completed" || self.status == "Finished"
    }
}
