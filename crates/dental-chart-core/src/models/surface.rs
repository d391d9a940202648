//! Tooth surface keys.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the five clinically distinct faces of a tooth.
///
/// Variant order is the display order used by the edit surface and the
/// active-conditions chips (M, O, D, B, L).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceKey {
    /// Side toward the midline
    Mesial,
    /// Biting surface
    Occlusal,
    /// Side away from the midline
    Distal,
    /// Cheek side
    Buccal,
    /// Tongue side
    Lingual,
    /// Surface key this client does not recognise
    Other(String),
}

impl SurfaceKey {
    pub fn all() -> [SurfaceKey; 5] {
        [
            SurfaceKey::Mesial,
            SurfaceKey::Occlusal,
            SurfaceKey::Distal,
            SurfaceKey::Buccal,
            SurfaceKey::Lingual,
        ]
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "M" => SurfaceKey::Mesial,
            "O" => SurfaceKey::Occlusal,
            "D" => SurfaceKey::Distal,
            "B" => SurfaceKey::Buccal,
            "L" => SurfaceKey::Lingual,
            other => SurfaceKey::Other(other.to_string()),
        }
    }

    pub fn as_key(&self) -> &str {
        match self {
            SurfaceKey::Mesial => "M",
            SurfaceKey::Occlusal => "O",
            SurfaceKey::Distal => "D",
            SurfaceKey::Buccal => "B",
            SurfaceKey::Lingual => "L",
            SurfaceKey::Other(key) => key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SurfaceKey::Mesial => "Mesial",
            SurfaceKey::Occlusal => "Occlusal",
            SurfaceKey::Distal => "Distal",
            SurfaceKey::Buccal => "Buccal",
            SurfaceKey::Lingual => "Lingual",
            SurfaceKey::Other(key) => key,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SurfaceKey::Mesial => "Side toward midline",
            SurfaceKey::Occlusal => "Biting surface",
            SurfaceKey::Distal => "Side away from midline",
            SurfaceKey::Buccal => "Cheek side",
            SurfaceKey::Lingual => "Tongue side",
            SurfaceKey::Other(_) => "",
        }
    }
}

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl Serialize for SurfaceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_key())
    }
}

impl<'de> Deserialize<'de> for SurfaceKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(SurfaceKey::from_key(&key))
    }
}
