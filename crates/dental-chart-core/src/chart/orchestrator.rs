//! The dental chart orchestrator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::active::{active_conditions, ActiveConditionRow};
use crate::models::{
    ChartMap, Condition, SurfaceKey, TimelineItem, ToothNumber, ToothState, ToothStatus,
};
use crate::render::{render_state, ToothGlyph};
use crate::vocabulary::{is_upper, tooth_name_for, UNIVERSAL_LOWER, UNIVERSAL_UPPER};

/// Chart construction options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Whether pressing a tooth opens the edit surface
    #[serde(default = "default_editable")]
    pub editable: bool,
}

fn default_editable() -> bool {
    true
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self { editable: true }
    }
}

/// Outbound notifications from the chart to its host.
///
/// Called synchronously after every mutation, after the local chart has
/// already been updated.
pub trait ChartListener {
    fn on_tooth_update(&mut self, tooth: ToothNumber, state: &ToothState);

    /// A step was appended to the treatment plan.
    fn on_add_timeline_step(&mut self, _step: &TimelineItem) {}
}

/// Listener that discards everything.
impl ChartListener for () {
    fn on_tooth_update(&mut self, _tooth: ToothNumber, _state: &ToothState) {}
}

/// An outbound chart event.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    ToothUpdated {
        tooth: ToothNumber,
        state: ToothState,
    },
    TimelineStepAdded {
        step: TimelineItem,
    },
}

/// Listener that queues events for the host to drain.
#[derive(Debug, Default)]
pub struct Outbox {
    events: Vec<ChartEvent>,
}

impl Outbox {
    pub fn drain(&mut self) -> Vec<ChartEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ChartListener for Outbox {
    fn on_tooth_update(&mut self, tooth: ToothNumber, state: &ToothState) {
        self.events.push(ChartEvent::ToothUpdated {
            tooth,
            state: state.clone(),
        });
    }

    fn on_add_timeline_step(&mut self, step: &TimelineItem) {
        self.events.push(ChartEvent::TimelineStepAdded { step: step.clone() });
    }
}

/// What the edit tray shows for the selected tooth.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSurface {
    pub tooth: ToothNumber,
    pub tooth_name: String,
    pub status: ToothStatus,
    pub surfaces: BTreeMap<SurfaceKey, Condition>,
    pub notes: Option<String>,
}

/// Both arches, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchLayout {
    pub upper: Vec<ToothGlyph>,
    pub lower: Vec<ToothGlyph>,
}

/// Owns the chart map, the selection, and the edit-surface protocol.
///
/// Mutations apply to the local map immediately and then notify the
/// listener with the new tooth state. The chart never persists anything.
#[derive(Debug)]
pub struct DentalChart<L: ChartListener = ()> {
    chart: ChartMap,
    notes: BTreeMap<ToothNumber, String>,
    options: ChartOptions,
    selected_tooth: Option<ToothNumber>,
    editing: bool,
    listener: L,
}

impl DentalChart<()> {
    /// Chart without a listener.
    pub fn new(chart: ChartMap, options: ChartOptions) -> Self {
        Self::with_listener(chart, options, ())
    }
}

impl<L: ChartListener> DentalChart<L> {
    pub fn with_listener(chart: ChartMap, options: ChartOptions, listener: L) -> Self {
        Self {
            chart,
            notes: BTreeMap::new(),
            options,
            selected_tooth: None,
            editing: false,
            listener,
        }
    }

    /// Attach read-only per-tooth clinical notes.
    pub fn with_notes(mut self, notes: BTreeMap<ToothNumber, String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn chart(&self) -> &ChartMap {
        &self.chart
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Stored state, or the default present/no-surfaces state for any tooth
    /// without an entry (valid or not).
    pub fn tooth_data(&self, tooth: ToothNumber) -> ToothState {
        self.chart.tooth(tooth)
    }

    pub fn selected_tooth(&self) -> Option<ToothNumber> {
        self.selected_tooth
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Select a tooth and, when the chart is editable, open its edit surface.
    pub fn handle_tooth_press(&mut self, tooth: ToothNumber) -> Option<EditSurface> {
        self.selected_tooth = Some(tooth);
        self.editing = self.options.editable;
        self.edit_surface()
    }

    /// Edit surface for the selected tooth, if one is open.
    pub fn edit_surface(&self) -> Option<EditSurface> {
        let tooth = self.selected_tooth.filter(|_| self.editing)?;
        let state = self.tooth_data(tooth);
        Some(EditSurface {
            tooth,
            tooth_name: tooth_name_for(tooth).into_owned(),
            status: state.status,
            surfaces: state.surfaces,
            notes: self.notes.get(&tooth).cloned(),
        })
    }

    /// Dismiss the edit surface; the selection stays.
    pub fn close_edit_surface(&mut self) {
        self.editing = false;
    }

    /// Close the chart: dismiss the edit surface and clear the selection.
    pub fn close(&mut self) {
        self.editing = false;
        self.selected_tooth = None;
    }

    /// Toggle a surface condition.
    ///
    /// Re-selecting the condition a surface already holds clears it; a
    /// different condition overwrites it. Conditions never stack.
    pub fn update_surface(
        &mut self,
        tooth: ToothNumber,
        surface: SurfaceKey,
        condition: Condition,
    ) -> ToothState {
        let next = self.tooth_data(tooth).toggled_surface(surface, condition);
        self.commit(tooth, next)
    }

    /// Set the whole-tooth status unconditionally; surfaces are untouched.
    pub fn update_status(&mut self, tooth: ToothNumber, status: ToothStatus) -> ToothState {
        let next = self.tooth_data(tooth).with_status_set(status);
        self.commit(tooth, next)
    }

    fn commit(&mut self, tooth: ToothNumber, state: ToothState) -> ToothState {
        self.chart.set(tooth, state.clone());
        self.listener.on_tooth_update(tooth, &state);
        state
    }

    /// Announce a step the host appended to the plan.
    pub fn timeline_step_added(&mut self, step: &TimelineItem) {
        self.listener.on_add_timeline_step(step);
    }

    /// Replace the whole map after a full reload from the server.
    pub fn replace_chart(&mut self, chart: ChartMap) {
        self.chart = chart;
    }

    pub fn replace_notes(&mut self, notes: BTreeMap<ToothNumber, String>) {
        self.notes = notes;
    }

    /// Render one tooth with the current selection.
    pub fn render_tooth(&self, tooth: ToothNumber) -> ToothGlyph {
        render_state(
            tooth,
            is_upper(tooth),
            &self.tooth_data(tooth),
            self.selected_tooth == Some(tooth),
        )
    }

    /// Render both standard arches.
    pub fn render_arches(&self) -> ArchLayout {
        ArchLayout {
            upper: UNIVERSAL_UPPER.iter().map(|t| self.render_tooth(*t)).collect(),
            lower: UNIVERSAL_LOWER.iter().map(|t| self.render_tooth(*t)).collect(),
        }
    }

    /// The active-conditions table for the current map.
    pub fn active_conditions(&self) -> Vec<ActiveConditionRow> {
        active_conditions(&self.chart, self.selected_tooth)
    }
}
