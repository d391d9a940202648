//! Display colors and the stripe-vs-solid rule.

use std::fmt;

use crate::models::{Condition, ToothStatus};

/// A display color (CSS hex string or `transparent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub &'static str);

impl Color {
    pub const TRANSPARENT: Color = Color("transparent");

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn is_transparent(&self) -> bool {
        *self == Color::TRANSPARENT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Hatch color used for every striped (active disease/damage) region.
pub const STRIPE_COLOR: Color = Color("#DC2626");

/// Status ring color for statuses without a dedicated color.
pub const DEFAULT_RING_COLOR: Color = Color("#ef4444");

pub const CARIES_COLOR: Color = Color("#3f2b1d");

/// Fixed display color for a surface condition. `none` and unknown
/// conditions are transparent and must never be drawn.
pub fn color_for(condition: &Condition) -> Color {
    match condition {
        Condition::Caries
        | Condition::CariesClassI
        | Condition::CariesClassII
        | Condition::CariesClassIII
        | Condition::CariesClassV
        | Condition::Cavity => CARIES_COLOR,
        Condition::Abscess => Color("#7f1d1d"),
        Condition::Fracture => Color("#991B1B"),
        Condition::FillingExisting => Color("#3b82f6"),
        Condition::FillingAmalgam => Color("#71717A"),
        Condition::FillingTemp => Color("#f97316"),
        Condition::FillingGold | Condition::CrownGold => Color("#D4AF37"),
        Condition::CrownPorcelain => Color("#f8fafc"),
        Condition::Legacy(_) => color_for(&condition.canonical()),
        Condition::None | Condition::Unknown(_) => Color::TRANSPARENT,
    }
}

/// Conditions representing active disease or damage render with a hatch
/// fill instead of a solid fill.
pub fn is_striped_condition(condition: &Condition) -> bool {
    matches!(
        *condition.canonical(),
        Condition::Caries
            | Condition::CariesClassI
            | Condition::CariesClassII
            | Condition::CariesClassIII
            | Condition::CariesClassV
            | Condition::Cavity
            | Condition::Abscess
            | Condition::Fracture
    )
}

/// Color for a whole-tooth status. Unknown statuses have none and are
/// drawn without a ring.
pub fn status_color_for(status: &ToothStatus) -> Option<Color> {
    let color = match status {
        ToothStatus::Present => Color("#10b981"),
        ToothStatus::Missing | ToothStatus::RootCanal | ToothStatus::Planned => {
            DEFAULT_RING_COLOR
        }
        ToothStatus::Implant => Color("#64748b"),
        ToothStatus::Impacted => Color("#94a3b8"),
        ToothStatus::Crown => Color("#D4AF37"),
        ToothStatus::Fractured => Color("#991B1B"),
        ToothStatus::Legacy(_) => return status_color_for(&status.canonical()),
        ToothStatus::Unknown(_) => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_and_unknown_are_transparent() {
        assert!(color_for(&Condition::None).is_transparent());
        assert!(color_for(&Condition::Unknown("laser_etch".into())).is_transparent());
    }

    #[test]
    fn test_stripe_set() {
        for striped in [
            Condition::Caries,
            Condition::CariesClassI,
            Condition::CariesClassV,
            Condition::Cavity,
            Condition::Abscess,
            Condition::Fracture,
        ] {
            assert!(is_striped_condition(&striped), "{striped} should be striped");
        }
        for solid in [
            Condition::FillingExisting,
            Condition::FillingGold,
            Condition::CrownPorcelain,
            Condition::None,
            Condition::Unknown("x".into()),
        ] {
            assert!(!is_striped_condition(&solid), "{solid} should be solid");
        }
    }

    #[test]
    fn test_legacy_class_key_is_striped() {
        let legacy = Condition::from_key("class_iii");
        assert!(is_striped_condition(&legacy));
        assert_eq!(color_for(&legacy), CARIES_COLOR);
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(
            status_color_for(&ToothStatus::from_key("root_canal")),
            Some(DEFAULT_RING_COLOR)
        );
        assert_eq!(status_color_for(&ToothStatus::Unknown("veneer".into())), None);
    }
}
