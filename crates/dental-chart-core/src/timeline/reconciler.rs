//! Roadmap merge and treatment plan editing.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{TimelineItem, TimelineStatus};

/// Merge history and plan into one roadmap, newest first.
///
/// The sort is stable: items with equal dates keep input order, history
/// before plan. Dates that cannot be parsed sort after every dated item.
pub fn merge(history: &[TimelineItem], plan: &[TimelineItem]) -> Vec<TimelineItem> {
    let mut roadmap: Vec<TimelineItem> = history.iter().chain(plan.iter()).cloned().collect();
    roadmap.sort_by_key(|item| Reverse(parse_date(&item.date)));
    roadmap
}

/// Parse an API date: `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

/// A clinician-authored step, before it joins the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStep {
    pub procedure: String,
    pub date: String,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Field changes for an existing plan step. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepEdit {
    #[serde(default)]
    pub procedure: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<TimelineStatus>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A patient's forward-looking treatment plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreatmentPlan {
    items: Vec<TimelineItem>,
}

impl TreatmentPlan {
    pub fn new(items: Vec<TimelineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of steps still planned.
    pub fn planned_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_planned()).count()
    }

    /// Sum of every step's estimated cost; steps without one count as zero.
    pub fn total_cost(&self) -> f64 {
        self.items.iter().filter_map(|item| item.cost).sum()
    }

    /// Append a planned step with `visit_number = len + 1`.
    ///
    /// No deduplication and no date validation: a step dated before the
    /// existing ones is legitimate, and [`merge`] orders it for display.
    pub fn add_step(&mut self, step: NewStep) -> &TimelineItem {
        let visit_number = self.items.len() as u32 + 1;
        self.items.push(TimelineItem {
            id: uuid::Uuid::new_v4().to_string(),
            procedure: step.procedure,
            date: step.date,
            status: TimelineStatus::Planned,
            cost: step.cost,
            notes: step.notes,
            visit_number: Some(visit_number),
            extra: Default::default(),
        });
        &self.items[self.items.len() - 1]
    }

    /// Apply an edit to the step with the given ID. Returns false when no
    /// such step exists.
    pub fn update_step(&mut self, id: &str, edit: StepEdit) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        if let Some(procedure) = edit.procedure {
            item.procedure = procedure;
        }
        if let Some(date) = edit.date {
            item.date = date;
        }
        if let Some(status) = edit.status {
            item.status = status;
        }
        if edit.cost.is_some() {
            item.cost = edit.cost;
        }
        if edit.notes.is_some() {
            item.notes = edit.notes;
        }
        true
    }

    /// Remove a step. Remaining visit numbers are left as they are.
    pub fn remove_step(&mut self, id: &str) -> Option<TimelineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}
