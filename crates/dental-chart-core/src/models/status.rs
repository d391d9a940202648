//! Whole-tooth status vocabulary.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status describing the entire tooth rather than one surface.
///
/// The set is open: keys written by a newer client are kept in
/// [`ToothStatus::Unknown`] and written back verbatim. Legacy spellings
/// are kept as read and compare equal to the status they stand for.
#[derive(Debug, Clone, Default)]
pub enum ToothStatus {
    /// Healthy, erupted tooth
    #[default]
    Present,
    /// Missing or extracted
    Missing,
    /// Replaced by a dental implant
    Implant,
    /// Root canal treated (or in progress)
    RootCanal,
    /// Full-coverage crown
    Crown,
    /// Impacted, not erupted
    Impacted,
    /// Treatment planned for the whole tooth
    Planned,
    /// Whole-tooth fracture
    Fractured,
    /// A known status under a legacy key (`root_canal`)
    Legacy(&'static str),
    /// Status key this client does not recognise
    Unknown(String),
}

impl ToothStatus {
    /// Every status this client knows, in edit-surface order.
    pub fn known() -> [ToothStatus; 8] {
        [
            ToothStatus::Present,
            ToothStatus::Missing,
            ToothStatus::Implant,
            ToothStatus::RootCanal,
            ToothStatus::Crown,
            ToothStatus::Impacted,
            ToothStatus::Planned,
            ToothStatus::Fractured,
        ]
    }

    /// Parse a wire key. Never fails; unrecognised keys become `Unknown`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "present" => ToothStatus::Present,
            "missing" => ToothStatus::Missing,
            "implant" => ToothStatus::Implant,
            "rootCanal" => ToothStatus::RootCanal,
            "root_canal" => ToothStatus::Legacy("root_canal"),
            "crown" => ToothStatus::Crown,
            "impacted" => ToothStatus::Impacted,
            "planned" => ToothStatus::Planned,
            "fractured" => ToothStatus::Fractured,
            other => ToothStatus::Unknown(other.to_string()),
        }
    }

    /// Wire key, as the existing clients persist it.
    pub fn as_key(&self) -> &str {
        match self {
            ToothStatus::Present => "present",
            ToothStatus::Missing => "missing",
            ToothStatus::Implant => "implant",
            ToothStatus::RootCanal => "rootCanal",
            ToothStatus::Crown => "crown",
            ToothStatus::Impacted => "impacted",
            ToothStatus::Planned => "planned",
            ToothStatus::Fractured => "fractured",
            ToothStatus::Legacy(key) => key,
            ToothStatus::Unknown(key) => key,
        }
    }

    /// The status under its current key.
    pub fn canonical(&self) -> Cow<'_, ToothStatus> {
        match self {
            ToothStatus::Legacy(key) => Cow::Owned(match *key {
                "root_canal" => ToothStatus::RootCanal,
                other => ToothStatus::Unknown(other.to_string()),
            }),
            other => Cow::Borrowed(other),
        }
    }

    fn canonical_key(&self) -> Cow<'_, str> {
        match self.canonical() {
            Cow::Borrowed(status) => Cow::Borrowed(status.as_key()),
            Cow::Owned(status) => Cow::Owned(status.as_key().to_string()),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, ToothStatus::Present)
    }

    /// Statuses whose glyph replaces the anatomical tooth entirely.
    pub fn supersedes_surfaces(&self) -> bool {
        matches!(self, ToothStatus::Missing | ToothStatus::Implant)
    }
}

impl PartialEq for ToothStatus {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl Eq for ToothStatus {}

impl Hash for ToothStatus {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_key().hash(state);
    }
}

impl fmt::Display for ToothStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl Serialize for ToothStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_key())
    }
}

impl<'de> Deserialize<'de> for ToothStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(ToothStatus::from_key(&key))
    }
}
