//! The per-patient chart map.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use super::{parse_tooth_key, ToothNumber, ToothState};

/// Mapping from tooth number to tooth state.
///
/// Teeth without an entry read as the default present/no-surfaces state,
/// so "no entry" and "explicitly healthy" are indistinguishable.
///
/// Keys that are not a plain tooth number (primary-tooth letters such as
/// `"A"`, zero-padded `"014"`) are held aside and written back verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartMap {
    teeth: BTreeMap<ToothNumber, ToothState>,
    passthrough: BTreeMap<String, serde_json::Value>,
}

impl ChartMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a tooth; the default state for any tooth without an entry.
    pub fn tooth(&self, tooth: ToothNumber) -> ToothState {
        self.teeth.get(&tooth).cloned().unwrap_or_default()
    }

    /// Stored entry, if any.
    pub fn entry(&self, tooth: ToothNumber) -> Option<&ToothState> {
        self.teeth.get(&tooth)
    }

    /// Replace a single tooth's state.
    pub fn set(&mut self, tooth: ToothNumber, state: ToothState) {
        self.teeth.insert(tooth, state);
    }

    pub fn len(&self) -> usize {
        self.teeth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teeth.is_empty()
    }

    /// Entries in ascending tooth-number order.
    pub fn iter(&self) -> impl Iterator<Item = (ToothNumber, &ToothState)> {
        self.teeth.iter().map(|(tooth, state)| (*tooth, state))
    }

    /// Entries under keys this client does not chart, as read.
    pub fn passthrough(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.passthrough
    }

    /// Entries that deviate from healthy.
    pub fn affected(&self) -> impl Iterator<Item = (ToothNumber, &ToothState)> {
        self.iter().filter(|(_, state)| state.is_affected())
    }

    /// Serialize to canonical JSON (teeth in ascending order).
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// SHA-256 fingerprint of the canonical JSON.
    pub fn revision(&self) -> Result<String, serde_json::Error> {
        Ok(fingerprint(&self.to_canonical_json()?))
    }
}

impl FromIterator<(ToothNumber, ToothState)> for ChartMap {
    fn from_iter<I: IntoIterator<Item = (ToothNumber, ToothState)>>(iter: I) -> Self {
        Self {
            teeth: iter.into_iter().collect(),
            passthrough: BTreeMap::new(),
        }
    }
}

impl Serialize for ChartMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.teeth.len() + self.passthrough.len()))?;
        for (tooth, state) in &self.teeth {
            map.serialize_entry(&tooth.to_string(), state)?;
        }
        for (key, value) in &self.passthrough {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ChartMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?
            .unwrap_or_default();

        let mut chart = ChartMap::new();
        for (key, value) in raw {
            // A null entry means the same as no entry.
            if value.is_null() {
                continue;
            }
            match parse_tooth_key(&key) {
                Some(tooth) => {
                    let state = ToothState::deserialize(value).map_err(serde::de::Error::custom)?;
                    chart.teeth.insert(tooth, state);
                }
                None => {
                    chart.passthrough.insert(key, value);
                }
            }
        }
        Ok(chart)
    }
}

/// Hex SHA-256 of a serialized payload.
pub fn fingerprint(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}
