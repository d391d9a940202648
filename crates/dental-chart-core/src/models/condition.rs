//! Per-surface condition vocabulary.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Condition recorded on a single tooth surface.
///
/// Like [`ToothStatus`](super::ToothStatus) this is an open set; unknown
/// keys survive a load/save cycle untouched. Legacy spellings are kept as
/// read, and compare equal to the condition they stand for.
#[derive(Debug, Clone)]
pub enum Condition {
    /// Healthy. Only appears in data written by older clients; the chart
    /// itself never stores it.
    None,
    Caries,
    CariesClassI,
    CariesClassII,
    CariesClassIII,
    CariesClassV,
    Cavity,
    Abscess,
    Fracture,
    FillingExisting,
    FillingAmalgam,
    FillingTemp,
    FillingGold,
    CrownGold,
    CrownPorcelain,
    /// A known condition under a legacy key (`class_i`..`class_v`), as
    /// the web console still writes it
    Legacy(&'static str),
    /// Condition key this client does not recognise
    Unknown(String),
}

impl Condition {
    /// Every condition a clinician can pick, in legend order.
    pub fn known() -> [Condition; 14] {
        [
            Condition::Caries,
            Condition::CariesClassI,
            Condition::CariesClassII,
            Condition::CariesClassIII,
            Condition::CariesClassV,
            Condition::Cavity,
            Condition::Abscess,
            Condition::Fracture,
            Condition::FillingExisting,
            Condition::FillingAmalgam,
            Condition::FillingTemp,
            Condition::FillingGold,
            Condition::CrownGold,
            Condition::CrownPorcelain,
        ]
    }

    /// Parse a wire key. Never fails.
    pub fn from_key(key: &str) -> Self {
        match key {
            "none" => Condition::None,
            "caries" => Condition::Caries,
            "caries_class_i" => Condition::CariesClassI,
            "caries_class_ii" => Condition::CariesClassII,
            "caries_class_iii" => Condition::CariesClassIII,
            "caries_class_v" => Condition::CariesClassV,
            "class_i" => Condition::Legacy("class_i"),
            "class_ii" => Condition::Legacy("class_ii"),
            "class_iii" => Condition::Legacy("class_iii"),
            "class_v" => Condition::Legacy("class_v"),
            "cavity" => Condition::Cavity,
            "abscess" => Condition::Abscess,
            "fracture" => Condition::Fracture,
            "filling_existing" => Condition::FillingExisting,
            "filling_amalgam" => Condition::FillingAmalgam,
            "filling_temp" => Condition::FillingTemp,
            "filling_gold" => Condition::FillingGold,
            "crown_gold" => Condition::CrownGold,
            "crown_porcelain" => Condition::CrownPorcelain,
            other => Condition::Unknown(other.to_string()),
        }
    }

    pub fn as_key(&self) -> &str {
        match self {
            Condition::None => "none",
            Condition::Caries => "caries",
            Condition::CariesClassI => "caries_class_i",
            Condition::CariesClassII => "caries_class_ii",
            Condition::CariesClassIII => "caries_class_iii",
            Condition::CariesClassV => "caries_class_v",
            Condition::Cavity => "cavity",
            Condition::Abscess => "abscess",
            Condition::Fracture => "fracture",
            Condition::FillingExisting => "filling_existing",
            Condition::FillingAmalgam => "filling_amalgam",
            Condition::FillingTemp => "filling_temp",
            Condition::FillingGold => "filling_gold",
            Condition::CrownGold => "crown_gold",
            Condition::CrownPorcelain => "crown_porcelain",
            Condition::Legacy(key) => key,
            Condition::Unknown(key) => key,
        }
    }

    /// The condition under its current key. Legacy spellings resolve to
    /// the condition they stand for; everything else is returned as is.
    pub fn canonical(&self) -> Cow<'_, Condition> {
        match self {
            Condition::Legacy(key) => Cow::Owned(match *key {
                "class_i" => Condition::CariesClassI,
                "class_ii" => Condition::CariesClassII,
                "class_iii" => Condition::CariesClassIII,
                "class_v" => Condition::CariesClassV,
                other => Condition::Unknown(other.to_string()),
            }),
            other => Cow::Borrowed(other),
        }
    }

    fn canonical_key(&self) -> Cow<'_, str> {
        match self.canonical() {
            Cow::Borrowed(condition) => Cow::Borrowed(condition.as_key()),
            Cow::Owned(condition) => Cow::Owned(condition.as_key().to_string()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Condition::None)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Condition::Unknown(_))
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_key() == other.canonical_key()
    }
}

impl Eq for Condition {}

impl Hash for Condition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_key().hash(state);
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_key())
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Condition::from_key(&key))
    }
}
