//! Display labels for conditions and statuses.

use crate::models::{Condition, ToothStatus};

/// Display label for a condition. Unknown conditions show their raw key.
pub fn label_for(condition: &Condition) -> &str {
    match condition {
        Condition::Unknown(key) => key,
        known => known_condition_label(known),
    }
}

pub(crate) fn known_condition_label(condition: &Condition) -> &'static str {
    match condition {
        Condition::None => "Healthy",
        Condition::Caries => "Caries",
        Condition::CariesClassI => "Caries (Class I)",
        Condition::CariesClassII => "Caries (Class II)",
        Condition::CariesClassIII => "Caries (Class III)",
        Condition::CariesClassV => "Caries (Class V)",
        Condition::Cavity => "Cavity",
        Condition::Abscess => "Abscess",
        Condition::Fracture => "Fracture",
        Condition::FillingExisting => "Existing Filling",
        Condition::FillingAmalgam => "Amalgam Filling",
        Condition::FillingTemp => "Temporary Filling",
        Condition::FillingGold => "Gold Filling",
        Condition::CrownGold => "Gold Crown",
        Condition::CrownPorcelain => "Porcelain Crown",
        Condition::Legacy(_) => known_condition_label(&condition.canonical()),
        Condition::Unknown(_) => "",
    }
}

/// Display label for a whole-tooth status.
pub fn status_label_for(status: &ToothStatus) -> &str {
    match status {
        ToothStatus::Unknown(key) => key,
        known => known_status_label(known),
    }
}

pub(crate) fn known_status_label(status: &ToothStatus) -> &'static str {
    match status {
        ToothStatus::Present => "Present",
        ToothStatus::Missing => "Missing/Extracted",
        ToothStatus::Implant => "Dental Implant",
        ToothStatus::RootCanal => "Root Canal",
        ToothStatus::Crown => "Crown",
        ToothStatus::Impacted => "Impacted",
        ToothStatus::Planned => "Planned Treatment",
        ToothStatus::Fractured => "Fractured",
        ToothStatus::Legacy(_) => known_status_label(&status.canonical()),
        ToothStatus::Unknown(_) => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caries_class_label() {
        assert_eq!(label_for(&Condition::CariesClassI), "Caries (Class I)");
        assert_eq!(label_for(&Condition::from_key("class_i")), "Caries (Class I)");
        assert_eq!(status_label_for(&ToothStatus::from_key("root_canal")), "Root Canal");
    }

    #[test]
    fn test_unknown_labels_show_raw_key() {
        assert_eq!(label_for(&Condition::Unknown("erosion".into())), "erosion");
        assert_eq!(
            status_label_for(&ToothStatus::Unknown("bridge_pontic".into())),
            "bridge_pontic"
        );
    }
}
