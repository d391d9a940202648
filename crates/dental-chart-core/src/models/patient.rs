//! Patient clinical record models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{parse_tooth_key, ChartMap, TimelineItem, ToothNumber};

/// The chart-relevant slice of a patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    /// Patient ID
    #[serde(alias = "patientId")]
    pub patient_id: String,
    /// Chart map, keyed by tooth number
    #[serde(default, alias = "dentalChart")]
    pub dental_chart: ChartMap,
    /// Planned treatment steps
    #[serde(default, alias = "treatmentPlan")]
    pub treatment_plan: Vec<TimelineItem>,
    /// Free-text clinical notes per tooth, keyed as stored
    #[serde(default, alias = "toothNotes")]
    pub tooth_notes: BTreeMap<String, String>,
    /// Last update timestamp
    #[serde(default = "now_rfc3339", alias = "updatedAt")]
    pub updated_at: String,
}

impl PatientRecord {
    /// Create the empty record that accompanies a new patient.
    pub fn new(patient_id: String) -> Self {
        Self {
            patient_id,
            dental_chart: ChartMap::new(),
            treatment_plan: Vec::new(),
            tooth_notes: BTreeMap::new(),
            updated_at: now_rfc3339(),
        }
    }

    /// Notes for the teeth the chart draws. Notes under other keys stay in
    /// `tooth_notes` untouched.
    pub fn notes_by_tooth(&self) -> BTreeMap<ToothNumber, String> {
        self.tooth_notes
            .iter()
            .filter_map(|(key, note)| parse_tooth_key(key).map(|tooth| (tooth, note.clone())))
            .collect()
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = now_rfc3339();
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// A record together with the appointments needed to build its history.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedChart {
    pub record: PatientRecord,
    pub appointments: Vec<super::Appointment>,
}
