//! Host session: optimistic writes with reload-on-failure.
//!
//! ```text
//! clinician action ──► DentalChart (local map updated) ──► Outbox
//!                                                            │
//!                                              drain + save full map
//!                                                            │
//!                                    ┌───────── ok ──────────┴────── err ─────────┐
//!                                    ▼                                            ▼
//!                           Saved { revision }                      reload full record from store
//!                                                                                 │
//!                                                            ┌──── ok ────────────┴──── err ────┐
//!                                                            ▼                                  ▼
//!                                                RolledBack (local edit discarded)   Unreconciled (edit kept)
//! ```
//!
//! The session never retries. A failed write is answered by a reload, and
//! the outcome is returned as a value for the shell to surface as a
//! transient notice.

mod store;

pub use store::*;

use crate::chart::{ChartEvent, ChartOptions, DentalChart, EditSurface, Outbox};
use crate::models::{
    fingerprint, Condition, LoadedChart, SurfaceKey, TimelineItem, ToothNumber, ToothStatus,
};
use crate::timeline::{history_from_appointments, merge, NewStep, StepEdit, TreatmentPlan};

/// Result of persisting a local mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    /// The store accepted the write
    Saved {
        /// Fingerprint of what was written
        revision: String,
    },
    /// The write failed; local state was replaced by the reloaded record
    RolledBack { reason: String },
    /// The write and the reload both failed; the optimistic local state
    /// stays until the next successful reload
    Unreconciled { reason: String },
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved { .. })
    }
}

/// One open patient chart bound to a store.
pub struct ChartSession<S: ChartStore> {
    store: S,
    patient_id: String,
    chart: DentalChart<Outbox>,
    plan: TreatmentPlan,
    history: Vec<TimelineItem>,
}

impl<S: ChartStore> ChartSession<S> {
    /// Load a patient's chart, plan, and history from the store.
    pub fn open(store: S, patient_id: &str, options: ChartOptions) -> StoreResult<Self> {
        let loaded = store.load_chart(patient_id)?;
        tracing::debug!(patient_id, teeth = loaded.record.dental_chart.len(), "chart opened");

        let (chart, plan, history) = split_loaded(patient_id, loaded);
        let (map, notes) = chart;
        Ok(Self {
            store,
            patient_id: patient_id.to_string(),
            chart: DentalChart::with_listener(map, options, Outbox::default()).with_notes(notes),
            plan,
            history,
        })
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn chart(&self) -> &DentalChart<Outbox> {
        &self.chart
    }

    pub fn plan(&self) -> &TreatmentPlan {
        &self.plan
    }

    pub fn history(&self) -> &[TimelineItem] {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn press_tooth(&mut self, tooth: ToothNumber) -> Option<EditSurface> {
        self.chart.handle_tooth_press(tooth)
    }

    pub fn close_edit_surface(&mut self) {
        self.chart.close_edit_surface();
    }

    /// Close the chart and drop the selection.
    pub fn close(&mut self) {
        self.chart.close();
    }

    pub fn update_surface(
        &mut self,
        tooth: ToothNumber,
        surface: SurfaceKey,
        condition: Condition,
    ) -> PersistOutcome {
        self.chart.update_surface(tooth, surface, condition);
        self.flush_chart()
    }

    pub fn update_status(&mut self, tooth: ToothNumber, status: ToothStatus) -> PersistOutcome {
        self.chart.update_status(tooth, status);
        self.flush_chart()
    }

    /// History and plan merged, newest first.
    pub fn roadmap(&self) -> Vec<TimelineItem> {
        merge(&self.history, self.plan.items())
    }

    /// Append a planned step and persist the whole plan.
    pub fn add_step(&mut self, step: NewStep) -> PersistOutcome {
        let added = self.plan.add_step(step).clone();
        self.chart.timeline_step_added(&added);
        self.flush_plan()
    }

    /// Edit a planned step. `None` when the step does not exist.
    pub fn update_step(&mut self, id: &str, edit: StepEdit) -> Option<PersistOutcome> {
        if !self.plan.update_step(id, edit) {
            return None;
        }
        Some(self.flush_plan())
    }

    /// Remove a planned step. `None` when the step does not exist.
    pub fn remove_step(&mut self, id: &str) -> Option<PersistOutcome> {
        self.plan.remove_step(id)?;
        Some(self.flush_plan())
    }

    /// Reload the full record from the store, discarding local state.
    pub fn reload(&mut self) -> StoreResult<()> {
        let loaded = self.store.load_chart(&self.patient_id)?;
        let ((map, notes), plan, history) = split_loaded(&self.patient_id, loaded);
        self.chart.replace_chart(map);
        self.chart.replace_notes(notes);
        self.plan = plan;
        self.history = history;
        // Anything still queued described the state just discarded.
        self.chart.listener_mut().drain();
        tracing::debug!(patient_id = %self.patient_id, "chart reloaded");
        Ok(())
    }

    fn drain_events(&mut self) {
        for event in self.chart.listener_mut().drain() {
            match event {
                ChartEvent::ToothUpdated { tooth, state } => tracing::debug!(
                    patient_id = %self.patient_id,
                    tooth,
                    status = %state.status,
                    surfaces = state.surfaces.len(),
                    "tooth updated"
                ),
                ChartEvent::TimelineStepAdded { step } => tracing::debug!(
                    patient_id = %self.patient_id,
                    step_id = %step.id,
                    visit_number = ?step.visit_number,
                    "plan step added"
                ),
            }
        }
    }

    fn flush_chart(&mut self) -> PersistOutcome {
        self.drain_events();

        let revision = match self.chart.chart().revision() {
            Ok(revision) => revision,
            Err(e) => return self.recover(format!("Chart serialization failed: {}", e)),
        };
        match self.store.save_chart(&self.patient_id, self.chart.chart()) {
            Ok(()) => {
                tracing::debug!(patient_id = %self.patient_id, %revision, "chart saved");
                PersistOutcome::Saved { revision }
            }
            Err(e) => self.recover(e.to_string()),
        }
    }

    fn flush_plan(&mut self) -> PersistOutcome {
        self.drain_events();
        let revision = match serde_json::to_string(self.plan.items()) {
            Ok(json) => fingerprint(&json),
            Err(e) => return self.recover(format!("Plan serialization failed: {}", e)),
        };
        match self.store.save_plan(&self.patient_id, self.plan.items()) {
            Ok(()) => {
                tracing::debug!(patient_id = %self.patient_id, %revision, "plan saved");
                PersistOutcome::Saved { revision }
            }
            Err(e) => self.recover(e.to_string()),
        }
    }

    fn recover(&mut self, reason: String) -> PersistOutcome {
        tracing::warn!(patient_id = %self.patient_id, %reason, "save failed, reloading record");
        match self.reload() {
            Ok(()) => PersistOutcome::RolledBack { reason },
            Err(e) => {
                tracing::error!(
                    patient_id = %self.patient_id,
                    error = %e,
                    "reload after failed save also failed"
                );
                PersistOutcome::Unreconciled {
                    reason: format!("{}; reload failed: {}", reason, e),
                }
            }
        }
    }
}

type ChartParts = (
    crate::models::ChartMap,
    std::collections::BTreeMap<ToothNumber, String>,
);

fn split_loaded(
    patient_id: &str,
    loaded: LoadedChart,
) -> (ChartParts, TreatmentPlan, Vec<TimelineItem>) {
    let LoadedChart {
        record,
        appointments,
    } = loaded;
    let history = history_from_appointments(patient_id, &appointments);
    let notes = record.notes_by_tooth();
    (
        (record.dental_chart, notes),
        TreatmentPlan::new(record.treatment_plan),
        history,
    )
}
