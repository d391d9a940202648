//! Per-tooth chart state.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Condition, SurfaceKey, ToothStatus};

/// Tooth number in the chart's anatomical numbering (Universal: 1..=32).
///
/// Numbers outside that range are legal keys; they are simply never drawn
/// on the standard arches.
pub type ToothNumber = u32;

/// Parse a wire key as a tooth number. Only the plain decimal spelling
/// counts; `"014"`, `"+14"` and letters are left to the caller.
pub fn parse_tooth_key(key: &str) -> Option<ToothNumber> {
    key.parse::<ToothNumber>()
        .ok()
        .filter(|tooth| tooth.to_string() == key)
}

/// The state of one tooth: a whole-tooth status plus a surface map.
///
/// A surface absent from `surfaces` is healthy. The two fields are
/// independent axes; changing one never touches the other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToothState {
    /// Whole-tooth status
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ToothStatus,
    /// Surface conditions, keyed by surface
    #[serde(default, deserialize_with = "null_as_default")]
    pub surfaces: BTreeMap<SurfaceKey, Condition>,
    /// Fields written by other clients, kept for the round trip
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ToothState {
    pub fn with_status(status: ToothStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// True when the tooth deviates from healthy in any way.
    pub fn is_affected(&self) -> bool {
        !self.status.is_present() || !self.surfaces.is_empty()
    }

    /// Condition at a surface, if one is recorded.
    pub fn condition_at(&self, surface: &SurfaceKey) -> Option<&Condition> {
        self.surfaces.get(surface)
    }

    /// Apply the surface toggle rule and return the resulting state.
    ///
    /// Picking the condition a surface already holds clears it; picking a
    /// different one overwrites it. `Condition::None` always clears, so the
    /// healthy sentinel is never stored.
    pub fn toggled_surface(&self, surface: SurfaceKey, condition: Condition) -> Self {
        let mut next = self.clone();
        if condition.is_none() || next.surfaces.get(&surface) == Some(&condition) {
            next.surfaces.remove(&surface);
        } else {
            next.surfaces.insert(surface, condition);
        }
        next
    }

    /// Replace the whole-tooth status, leaving surfaces untouched.
    pub fn with_status_set(&self, status: ToothStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tooth_key() {
        assert_eq!(parse_tooth_key("14"), Some(14));
        assert_eq!(parse_tooth_key("0"), Some(0));
        assert_eq!(parse_tooth_key("014"), None);
        assert_eq!(parse_tooth_key("+14"), None);
        assert_eq!(parse_tooth_key("A"), None);
    }

    #[test]
    fn test_default_is_present_without_surfaces() {
        let state = ToothState::default();
        assert_eq!(state.status, ToothStatus::Present);
        assert!(state.surfaces.is_empty());
        assert!(!state.is_affected());
    }

    #[test]
    fn test_toggle_same_condition_clears() {
        let state = ToothState::default()
            .toggled_surface(SurfaceKey::Occlusal, Condition::Caries)
            .toggled_surface(SurfaceKey::Occlusal, Condition::Caries);
        assert!(state.surfaces.is_empty());
    }

    #[test]
    fn test_toggle_different_condition_overwrites() {
        let state = ToothState::default()
            .toggled_surface(SurfaceKey::Mesial, Condition::Caries)
            .toggled_surface(SurfaceKey::Mesial, Condition::FillingAmalgam);
        assert_eq!(
            state.condition_at(&SurfaceKey::Mesial),
            Some(&Condition::FillingAmalgam)
        );
        assert_eq!(state.surfaces.len(), 1);
    }

    #[test]
    fn test_none_clears_and_is_never_stored() {
        let state = ToothState::default().toggled_surface(SurfaceKey::Distal, Condition::None);
        assert!(state.surfaces.is_empty());

        let state = ToothState::default()
            .toggled_surface(SurfaceKey::Distal, Condition::Fracture)
            .toggled_surface(SurfaceKey::Distal, Condition::None);
        assert!(state.surfaces.is_empty());
    }

    #[test]
    fn test_status_change_keeps_surfaces() {
        let state = ToothState::default()
            .toggled_surface(SurfaceKey::Buccal, Condition::FillingGold)
            .with_status_set(ToothStatus::Missing);
        assert_eq!(state.status, ToothStatus::Missing);
        assert_eq!(
            state.condition_at(&SurfaceKey::Buccal),
            Some(&Condition::FillingGold)
        );
    }

    #[test]
    fn test_deserialize_tolerates_nulls_and_extra_fields() {
        let state: ToothState = serde_json::from_str(
            r#"{"status": null, "surfaces": null, "mobility": 2}"#,
        )
        .unwrap();
        assert_eq!(state.status, ToothStatus::Present);
        assert!(state.surfaces.is_empty());
        assert_eq!(state.extra.get("mobility"), Some(&serde_json::json!(2)));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["mobility"], 2);
    }
}
