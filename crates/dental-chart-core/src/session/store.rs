//! The persistence collaborator's interface.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::models::{ChartMap, LoadedChart, TimelineItem};

/// Errors a chart store can report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Write rejected: {0}")]
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Where patient charts are loaded from and written to.
///
/// Writes always carry the full chart map or full plan, never a delta.
pub trait ChartStore {
    /// Load a patient's record and the appointments its history is built from.
    fn load_chart(&self, patient_id: &str) -> StoreResult<LoadedChart>;

    /// Replace the patient's chart map.
    fn save_chart(&self, patient_id: &str, chart: &ChartMap) -> StoreResult<()>;

    /// Replace the patient's treatment plan.
    fn save_plan(&self, patient_id: &str, plan: &[TimelineItem]) -> StoreResult<()>;
}

impl<T: ChartStore + ?Sized> ChartStore for &T {
    fn load_chart(&self, patient_id: &str) -> StoreResult<LoadedChart> {
        (**self).load_chart(patient_id)
    }

    fn save_chart(&self, patient_id: &str, chart: &ChartMap) -> StoreResult<()> {
        (**self).save_chart(patient_id, chart)
    }

    fn save_plan(&self, patient_id: &str, plan: &[TimelineItem]) -> StoreResult<()> {
        (**self).save_plan(patient_id, plan)
    }
}

impl<T: ChartStore> ChartStore for Arc<Mutex<T>> {
    fn load_chart(&self, patient_id: &str) -> StoreResult<LoadedChart> {
        self.lock().map_err(poisoned)?.load_chart(patient_id)
    }

    fn save_chart(&self, patient_id: &str, chart: &ChartMap) -> StoreResult<()> {
        self.lock().map_err(poisoned)?.save_chart(patient_id, chart)
    }

    fn save_plan(&self, patient_id: &str, plan: &[TimelineItem]) -> StoreResult<()> {
        self.lock().map_err(poisoned)?.save_plan(patient_id, plan)
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable(format!("Lock poisoned: {}", e))
}
