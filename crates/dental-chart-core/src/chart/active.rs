//! Active-conditions table: a pure projection of the chart map.

use crate::models::{ChartMap, Condition, SurfaceKey, ToothNumber, ToothStatus};
use crate::vocabulary::{label_for, tooth_name_for};

/// One chip in a row: a surface and the label of its condition.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceChip {
    pub surface: SurfaceKey,
    pub condition: Condition,
    /// Chip text, e.g. "O: Caries (Class I)"
    pub text: String,
}

/// One row per affected tooth.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveConditionRow {
    pub tooth: ToothNumber,
    pub tooth_name: String,
    /// Uppercased status key, present only when the status is not `present`
    pub status_chip: Option<String>,
    pub status: ToothStatus,
    pub surface_chips: Vec<SurfaceChip>,
    /// Row belongs to the currently selected tooth
    pub selected: bool,
}

/// Project the chart map to the rows of the active-conditions table.
///
/// A tooth is listed iff its status is not `present` or its surface map is
/// non-empty. Rows follow ascending tooth number; chips follow surface
/// order.
pub fn active_conditions(chart: &ChartMap, selected: Option<ToothNumber>) -> Vec<ActiveConditionRow> {
    chart
        .affected()
        .map(|(tooth, state)| ActiveConditionRow {
            tooth,
            tooth_name: tooth_name_for(tooth).into_owned(),
            status_chip: (!state.status.is_present())
                .then(|| state.status.canonical().as_key().to_uppercase()),
            status: state.status.clone(),
            surface_chips: state
                .surfaces
                .iter()
                .map(|(surface, condition)| SurfaceChip {
                    surface: surface.clone(),
                    condition: condition.clone(),
                    text: format!("{}: {}", surface, label_for(condition)),
                })
                .collect(),
            selected: selected == Some(tooth),
        })
        .collect()
}
