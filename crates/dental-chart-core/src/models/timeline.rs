//! Treatment timeline models.

use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle status of a timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineStatus {
    /// Proposed, not yet booked
    Planned,
    /// Booked for a date
    Scheduled,
    /// Performed
    Completed,
}

/// A unit of clinical history or plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Item ID (appointment ID for history, generated for plan steps)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Procedure name
    pub procedure: String,
    /// Date as sent by the API (YYYY-MM-DD or RFC 3339)
    pub date: String,
    /// Lifecycle status
    pub status: TimelineStatus,
    /// Estimated or charged cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Clinical notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// 1-based visit number within the plan
    #[serde(
        default,
        alias = "visitNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub visit_number: Option<u32>,
    /// Fields written by other clients (e.g. a booked time)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TimelineItem {
    pub fn is_planned(&self) -> bool {
        matches!(self.status, TimelineStatus::Planned)
    }
}

/// The web console writes numeric IDs (epoch millis); the mobile app
/// writes strings.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_web_console_item() {
        let item: TimelineItem = serde_json::from_str(
            r#"{
                "id": 1718000000000,
                "procedure": "Scaling",
                "date": "2024-06-10",
                "time": "10:00",
                "status": "planned",
                "cost": 1500,
                "notes": "",
                "visitNumber": 2
            }"#,
        )
        .unwrap();

        assert_eq!(item.id, "1718000000000");
        assert_eq!(item.cost, Some(1500.0));
        assert_eq!(item.visit_number, Some(2));
        assert!(item.is_planned());
        assert_eq!(item.extra.get("time"), Some(&serde_json::json!("10:00")));
    }

    #[test]
    fn test_serialize_uses_snake_case_visit_number() {
        let item = TimelineItem {
            id: "a".into(),
            procedure: "Crown prep".into(),
            date: "2024-02-01".into(),
            status: TimelineStatus::Completed,
            cost: None,
            notes: None,
            visit_number: Some(1),
            extra: Default::default(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["visit_number"], 1);
        assert_eq!(json["status"], "completed");
        assert!(json.get("cost").is_none());
    }
}
