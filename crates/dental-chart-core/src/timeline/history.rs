//! History synthesis from completed appointments.

use crate::models::{Appointment, TimelineItem, TimelineStatus};

/// Completed appointments of one patient as read-only history items.
pub fn history_from_appointments(patient_id: &str, appointments: &[Appointment]) -> Vec<TimelineItem> {
    appointments
        .iter()
        .filter(|a| a.patient_id == patient_id && a.is_completed())
        .map(|a| TimelineItem {
            id: a.id.clone(),
            procedure: a
                .treatment
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Treatment".to_string()),
            date: a.date.clone(),
            status: TimelineStatus::Completed,
            cost: None,
            notes: None,
            visit_number: None,
            extra: Default::default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(id: &str, patient: &str, status: &str, treatment: Option<&str>) -> Appointment {
        Appointment {
            id: id.into(),
            patient_id: patient.into(),
            date: "2024-03-01".into(),
            treatment: treatment.map(Into::into),
            status: status.into(),
        }
    }

    #[test]
    fn test_only_completed_visits_of_patient() {
        let appointments = vec![
            appointment("a1", "p1", "completed", Some("Root canal")),
            appointment("a2", "p1", "Finished", None),
            appointment("a3", "p1", "scheduled", Some("Crown")),
            appointment("a4", "p2", "completed", Some("Scaling")),
        ];

        let history = history_from_appointments("p1", &appointments);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].procedure, "Root canal");
        assert_eq!(history[1].procedure, "Treatment");
        assert!(history
            .iter()
            .all(|item| item.status == TimelineStatus::Completed));
    }
}
