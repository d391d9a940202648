//! Dental Chart Core Library
//!
//! Clinical charting engine shared by the clinic console and the mobile app.
//!
//! # Architecture
//!
//! ```text
//!   remote API ──► PatientRecord ──► local cache (SQLite)
//!                                         │ load
//!                                         ▼
//!                                   ChartSession ─────────────────────────┐
//!                                         │                               │
//!                     ┌───────────────────┼───────────────────┐           │
//!                     ▼                   ▼                   ▼           │
//!               DentalChart         TreatmentPlan        BillingSummary   │
//!            (map + selection)     + history merge      (payments view)   │
//!                     │                   │                               │
//!            ToothGlyph / active     Roadmap (newest                      │
//!            conditions table          first)                             │
//!                     │                                                   │
//!                     └── tooth update ──► Outbox ──► save full map ──────┘
//!                                                     (reload on failure)
//! ```
//!
//! # Core Principle
//!
//! **Mutations are local first.** Every edit is applied to the in-memory
//! chart immediately; persistence follows, and a failed write is answered
//! by reloading the record, never by retrying.
//!
//! # Modules
//!
//! - [`models`]: Domain types (ToothState, ChartMap, TimelineItem, etc.)
//! - [`vocabulary`]: Colors, labels, tooth names, stripe rule
//! - [`render`]: Tooth unit (glyph rendering)
//! - [`chart`]: Chart orchestrator and active-conditions projection
//! - [`timeline`]: Roadmap merge and treatment plan editing
//! - [`billing`]: Payment records for the chart screen
//! - [`session`]: Optimistic write + reload-on-failure
//! - [`db`]: SQLite record cache

pub mod billing;
pub mod chart;
pub mod db;
pub mod models;
pub mod render;
pub mod session;
pub mod timeline;
pub mod vocabulary;

// Re-export commonly used types
pub use chart::{ActiveConditionRow, ChartListener, ChartOptions, DentalChart, EditSurface, Outbox};
pub use db::Database;
pub use models::{
    ChartMap, Condition, PatientRecord, SurfaceKey, TimelineItem, TimelineStatus, ToothNumber,
    ToothState, ToothStatus,
};
pub use render::{render_tooth, ToothGlyph};
pub use session::{ChartSession, ChartStore, PersistOutcome, StoreError};
pub use timeline::{merge, NewStep, TreatmentPlan};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use render::{GlyphBody, RingStyle};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DentalChartError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("No chart is open")]
    NoOpenChart,
}

impl From<db::DbError> for DentalChartError {
    fn from(e: db::DbError) -> Self {
        DentalChartError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for DentalChartError {
    fn from(e: serde_json::Error) -> Self {
        DentalChartError::SerializationError(e.to_string())
    }
}

impl From<StoreError> for DentalChartError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => DentalChartError::NotFound(id),
            other => DentalChartError::DatabaseError(other.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for DentalChartError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DentalChartError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a chart store at the given path.
#[uniffi::export]
pub fn open_chart_store(path: String) -> Result<Arc<DentalChartCore>, DentalChartError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(DentalChartCore::new(db)))
}

/// Create an in-memory chart store (for testing).
#[uniffi::export]
pub fn open_chart_store_in_memory() -> Result<Arc<DentalChartCore>, DentalChartError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(DentalChartCore::new(db)))
}

/// Billing tab for a patient, from the transactions API's JSON array.
#[uniffi::export]
pub fn billing_summary(
    patient_id: String,
    payments_json: String,
) -> Result<FfiBillingSummary, DentalChartError> {
    let records: Vec<models::PaymentRecord> = serde_json::from_str(&payments_json)?;
    Ok(billing::BillingSummary::for_patient(&patient_id, &records).into())
}

/// Legend entries for every pickable condition.
#[uniffi::export]
pub fn condition_legend() -> Vec<FfiLegendEntry> {
    vocabulary::condition_legend()
        .into_iter()
        .map(|entry| FfiLegendEntry {
            key: entry.condition.as_key().to_string(),
            label: entry.label.to_string(),
            color: entry.color.as_str().to_string(),
            striped: entry.striped,
        })
        .collect()
}

/// Display name for a tooth number.
#[uniffi::export]
pub fn tooth_name(tooth: u32) -> String {
    vocabulary::tooth_name_for(tooth).into_owned()
}

// =========================================================================
// Main API Object
// =========================================================================

type SharedStore = Arc<Mutex<Database>>;

/// Thread-safe chart store and open chart for FFI.
#[derive(uniffi::Object)]
pub struct DentalChartCore {
    db: SharedStore,
    session: Mutex<Option<ChartSession<SharedStore>>>,
}

impl DentalChartCore {
    fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            session: Mutex::new(None),
        }
    }

    fn with_session<T>(
        &self,
        f: impl FnOnce(&mut ChartSession<SharedStore>) -> T,
    ) -> Result<T, DentalChartError> {
        let mut guard = self.session.lock()?;
        let session = guard.as_mut().ok_or(DentalChartError::NoOpenChart)?;
        Ok(f(session))
    }
}

#[uniffi::export]
impl DentalChartCore {
    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Store a full patient record (and its appointments) as received from
    /// the server.
    pub fn import_patient_record(
        &self,
        record_json: String,
        appointments_json: String,
    ) -> Result<(), DentalChartError> {
        let record: PatientRecord = serde_json::from_str(&record_json)?;
        let appointments: Vec<models::Appointment> = if appointments_json.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&appointments_json)?
        };
        let db = self.db.lock()?;
        db.import_record(&record, &appointments)?;
        Ok(())
    }

    /// Drop a patient's cached record.
    pub fn delete_patient_record(&self, patient_id: String) -> Result<bool, DentalChartError> {
        let db = self.db.lock()?;
        Ok(db.delete_record(&patient_id)?)
    }

    // =========================================================================
    // Chart Operations
    // =========================================================================

    /// Open a patient's chart, replacing any chart already open.
    pub fn open_chart(&self, patient_id: String, editable: bool) -> Result<(), DentalChartError> {
        let session = ChartSession::open(
            Arc::clone(&self.db),
            &patient_id,
            ChartOptions { editable },
        )?;
        *self.session.lock()? = Some(session);
        Ok(())
    }

    /// Close the open chart, dropping its selection.
    pub fn close_chart(&self) -> Result<(), DentalChartError> {
        let mut guard = self.session.lock()?;
        if let Some(session) = guard.as_mut() {
            session.close();
        }
        *guard = None;
        Ok(())
    }

    /// Press a tooth; returns the edit surface when the chart is editable.
    pub fn press_tooth(&self, tooth: u32) -> Result<Option<FfiEditSurface>, DentalChartError> {
        self.with_session(|s| s.press_tooth(tooth).map(Into::into))
    }

    /// Dismiss the edit surface.
    pub fn close_edit_surface(&self) -> Result<(), DentalChartError> {
        self.with_session(|s| s.close_edit_surface())
    }

    /// Toggle a surface condition.
    pub fn update_surface(
        &self,
        tooth: u32,
        surface: String,
        condition: String,
    ) -> Result<FfiPersistOutcome, DentalChartError> {
        self.with_session(|s| {
            s.update_surface(
                tooth,
                SurfaceKey::from_key(&surface),
                Condition::from_key(&condition),
            )
            .into()
        })
    }

    /// Set a tooth's whole-tooth status.
    pub fn update_status(
        &self,
        tooth: u32,
        status: String,
    ) -> Result<FfiPersistOutcome, DentalChartError> {
        self.with_session(|s| s.update_status(tooth, ToothStatus::from_key(&status)).into())
    }

    /// Current state of a tooth.
    pub fn tooth_state(&self, tooth: u32) -> Result<FfiToothState, DentalChartError> {
        self.with_session(|s| FfiToothState::new(tooth, &s.chart().tooth_data(tooth)))
    }

    /// Render a tooth glyph.
    pub fn render_tooth(&self, tooth: u32) -> Result<FfiToothGlyph, DentalChartError> {
        self.with_session(|s| s.chart().render_tooth(tooth).into())
    }

    /// Active-conditions table.
    pub fn active_conditions(&self) -> Result<Vec<FfiActiveConditionRow>, DentalChartError> {
        self.with_session(|s| {
            s.chart()
                .active_conditions()
                .into_iter()
                .map(Into::into)
                .collect()
        })
    }

    /// Full chart map as JSON, keyed by tooth number.
    pub fn chart_json(&self) -> Result<String, DentalChartError> {
        Ok(self.with_session(|s| s.chart().chart().to_canonical_json())??)
    }

    // =========================================================================
    // Timeline Operations
    // =========================================================================

    /// History and plan merged, newest first.
    pub fn roadmap(&self) -> Result<Vec<FfiTimelineItem>, DentalChartError> {
        self.with_session(|s| s.roadmap().into_iter().map(Into::into).collect())
    }

    /// Planned-procedure count and total estimated cost.
    pub fn plan_summary(&self) -> Result<FfiPlanSummary, DentalChartError> {
        self.with_session(|s| FfiPlanSummary {
            planned_count: s.plan().planned_count() as u32,
            total_cost: s.plan().total_cost(),
        })
    }

    /// Append a planned step.
    pub fn add_timeline_step(
        &self,
        procedure: String,
        date: String,
        cost: Option<f64>,
        notes: Option<String>,
    ) -> Result<FfiPersistOutcome, DentalChartError> {
        if procedure.trim().is_empty() {
            return Err(DentalChartError::InvalidInput(
                "Please enter a procedure name".into(),
            ));
        }
        self.with_session(|s| {
            s.add_step(NewStep {
                procedure,
                date,
                cost,
                notes,
            })
            .into()
        })
    }

    /// Remove a planned step.
    pub fn remove_timeline_step(&self, id: String) -> Result<FfiPersistOutcome, DentalChartError> {
        self.with_session(|s| s.remove_step(&id))?
            .map(Into::into)
            .ok_or(DentalChartError::NotFound(id))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe surface entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSurfaceEntry {
    pub surface: String,
    pub condition: String,
}

/// FFI-safe tooth state. Keys are reported under their current spelling
/// so shells can match them against the legend.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiToothState {
    pub tooth: u32,
    pub status: String,
    pub surfaces: Vec<FfiSurfaceEntry>,
}

impl FfiToothState {
    fn new(tooth: u32, state: &ToothState) -> Self {
        Self {
            tooth,
            status: state.status.canonical().as_key().to_string(),
            surfaces: state
                .surfaces
                .iter()
                .map(|(surface, condition)| FfiSurfaceEntry {
                    surface: surface.as_key().to_string(),
                    condition: condition.canonical().as_key().to_string(),
                })
                .collect(),
        }
    }
}

/// FFI-safe edit surface.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEditSurface {
    pub tooth: u32,
    pub tooth_name: String,
    pub status: String,
    pub surfaces: Vec<FfiSurfaceEntry>,
    pub notes: Option<String>,
}

impl From<EditSurface> for FfiEditSurface {
    fn from(surface: EditSurface) -> Self {
        Self {
            tooth: surface.tooth,
            tooth_name: surface.tooth_name,
            status: surface.status.canonical().as_key().to_string(),
            surfaces: surface
                .surfaces
                .iter()
                .map(|(s, c)| FfiSurfaceEntry {
                    surface: s.as_key().to_string(),
                    condition: c.canonical().as_key().to_string(),
                })
                .collect(),
            notes: surface.notes,
        }
    }
}

/// FFI-safe tooth glyph.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiToothGlyph {
    pub tooth: u32,
    /// "missing", "implant", or "anatomical"
    pub kind: String,
    pub selected: bool,
    pub ring_color: Option<String>,
    pub ring_dashed: bool,
    pub svg: String,
}

impl From<ToothGlyph> for FfiToothGlyph {
    fn from(glyph: ToothGlyph) -> Self {
        let kind = match glyph.body {
            GlyphBody::Missing { .. } => "missing",
            GlyphBody::Implant { .. } => "implant",
            GlyphBody::Anatomical { .. } => "anatomical",
        };
        let ring = glyph.ring();
        Self {
            tooth: glyph.tooth,
            kind: kind.to_string(),
            selected: glyph.selected,
            ring_color: ring.map(|r| r.color.as_str().to_string()),
            ring_dashed: ring.map_or(false, |r| r.style == RingStyle::Dashed),
            svg: glyph.to_svg(),
        }
    }
}

/// FFI-safe active-conditions row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiActiveConditionRow {
    pub tooth: u32,
    pub tooth_name: String,
    pub status_chip: Option<String>,
    pub surface_chips: Vec<String>,
    pub selected: bool,
}

impl From<ActiveConditionRow> for FfiActiveConditionRow {
    fn from(row: ActiveConditionRow) -> Self {
        Self {
            tooth: row.tooth,
            tooth_name: row.tooth_name,
            status_chip: row.status_chip,
            surface_chips: row.surface_chips.into_iter().map(|c| c.text).collect(),
            selected: row.selected,
        }
    }
}

/// FFI-safe persistence outcome.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPersistOutcome {
    pub saved: bool,
    pub rolled_back: bool,
    pub revision: Option<String>,
    /// Transient notice for the user when the save failed
    pub message: Option<String>,
}

impl From<PersistOutcome> for FfiPersistOutcome {
    fn from(outcome: PersistOutcome) -> Self {
        match outcome {
            PersistOutcome::Saved { revision } => Self {
                saved: true,
                rolled_back: false,
                revision: Some(revision),
                message: None,
            },
            PersistOutcome::RolledBack { reason } => Self {
                saved: false,
                rolled_back: true,
                revision: None,
                message: Some(reason),
            },
            PersistOutcome::Unreconciled { reason } => Self {
                saved: false,
                rolled_back: false,
                revision: None,
                message: Some(reason),
            },
        }
    }
}

/// FFI-safe timeline item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTimelineItem {
    pub id: String,
    pub procedure: String,
    pub date: String,
    pub status: String,
    pub cost: Option<f64>,
    pub notes: Option<String>,
    pub visit_number: Option<u32>,
}

impl From<TimelineItem> for FfiTimelineItem {
    fn from(item: TimelineItem) -> Self {
        let status = match item.status {
            TimelineStatus::Planned => "planned",
            TimelineStatus::Scheduled => "scheduled",
            TimelineStatus::Completed => "completed",
        };
        Self {
            id: item.id,
            procedure: item.procedure,
            date: item.date,
            status: status.to_string(),
            cost: item.cost,
            notes: item.notes,
            visit_number: item.visit_number,
        }
    }
}

/// FFI-safe treatment plan totals.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPlanSummary {
    pub planned_count: u32,
    pub total_cost: f64,
}

/// FFI-safe legend entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLegendEntry {
    pub key: String,
    pub label: String,
    pub color: String,
    pub striped: bool,
}

/// FFI-safe payment row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPaymentRow {
    pub id: String,
    pub date: String,
    pub procedure: String,
    pub amount: f64,
    pub status: String,
}

/// FFI-safe billing summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBillingSummary {
    pub patient_id: String,
    pub rows: Vec<FfiPaymentRow>,
    pub total_amount: f64,
    pub outstanding_amount: f64,
}

impl From<billing::BillingSummary> for FfiBillingSummary {
    fn from(summary: billing::BillingSummary) -> Self {
        let outstanding_amount = summary.outstanding_amount();
        Self {
            patient_id: summary.patient_id,
            rows: summary
                .rows
                .into_iter()
                .map(|row| FfiPaymentRow {
                    id: row.id,
                    date: row.date,
                    procedure: row.procedure,
                    amount: row.amount,
                    status: row.status.label().to_lowercase(),
                })
                .collect(),
            total_amount: summary.total_amount,
            outstanding_amount,
        }
    }
}
