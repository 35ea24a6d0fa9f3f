//! Gradebook roster entries

use serde::{Deserialize, Serialize};

use super::RecordId;

/// One student row of an instructor's gradebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(alias = "_id")]
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    /// Course completion in percent
    #[serde(default)]
    pub progress: f64,
}

impl RosterEntry {
    /// Completion clamped to 0..=100; NaN counts as no progress.
    pub fn progress(&self) -> f64 {
        if self.progress.is_nan() {
            return 0.0;
        }
        self.progress.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_roster_entry_defaults() {
        let entry: RosterEntry = serde_json::from_value(json!({ "_id": "s1" })).unwrap();
        assert_eq!(entry.id.as_str(), "s1");
        assert_eq!(entry.name, "");
        assert_eq!(entry.progress(), 0.0);
    }

    #[test]
    fn test_progress_clamped() {
        let entry: RosterEntry =
            serde_json::from_value(json!({ "id": "s1", "progress": 140 })).unwrap();
        assert_eq!(entry.progress(), 100.0);

        let entry: RosterEntry =
            serde_json::from_value(json!({ "id": "s1", "progress": -3.5 })).unwrap();
        assert_eq!(entry.progress(), 0.0);
    }
}
