//! Static lookup tables: colors, labels, tooth names, and the stripe rule.
//!
//! Every lookup is total. Unknown keys resolve to a neutral value (a
//! transparent color, the raw key as a label) so that chart data written by
//! a newer client renders as "no visual effect" instead of failing.

mod colors;
mod labels;
mod teeth;

pub use colors::*;
pub use labels::*;
pub use teeth::*;

use crate::models::{Condition, ToothStatus};

/// One legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub condition: Condition,
    pub label: &'static str,
    pub color: Color,
    pub striped: bool,
}

/// Legend for every pickable condition, in display order. `none` is never
/// listed.
pub fn condition_legend() -> Vec<LegendEntry> {
    Condition::known()
        .into_iter()
        .map(|condition| LegendEntry {
            label: known_condition_label(&condition),
            color: color_for(&condition),
            striped: is_striped_condition(&condition),
            condition,
        })
        .collect()
}

/// Status options shown on the edit surface, with their labels.
pub fn status_options() -> Vec<(ToothStatus, &'static str)> {
    ToothStatus::known()
        .into_iter()
        .map(|status| {
            let label = known_status_label(&status);
            (status, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_excludes_none() {
        let legend = condition_legend();
        assert_eq!(legend.len(), Condition::known().len());
        assert!(legend.iter().all(|entry| !entry.condition.is_none()));
        assert!(legend.iter().all(|entry| !entry.color.is_transparent()));
    }

    #[test]
    fn test_status_options_start_with_present() {
        let options = status_options();
        assert_eq!(options[0], (ToothStatus::Present, "Present"));
        assert!(options.iter().any(|(s, l)| *s == ToothStatus::RootCanal && *l == "Root Canal"));
    }
}
