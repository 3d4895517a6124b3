use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = u64;

/// Longest task text kept, in characters.
pub const MAX_TEXT_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    #[serde(with = "iso")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "iso::option")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "iso::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: TaskId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
            completed_at: None,
            updated_at: None,
        }
    }

    /// Flips completion and returns the new state.
    pub(crate) fn toggle(&mut self, now: DateTime<Utc>) -> bool {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(now);
        self.completed
    }

    pub(crate) fn rename(&mut self, text: String, now: DateTime<Utc>) {
        self.text = text;
        self.updated_at = Some(now);
    }
}

/// Trims user input and caps it at [`MAX_TEXT_LEN`] characters.
/// Returns `None` when nothing but whitespace was entered.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.char_indices().nth(MAX_TEXT_LEN) {
        Some((cut, _)) => Some(trimmed[..cut].trim_end().to_string()),
        None => Some(trimmed.to_string()),
    }
}

/// Source of timestamps for task lifecycle fields.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        // Snapshots store milliseconds; anything finer would not survive a reload.
        Utc::now().trunc_subsecs(3)
    }
}

/// `YYYY-MM-DDTHH:MM:SS.sssZ`, the format browsers produce for `Date#toISOString`.
mod iso {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            at: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match at {
                Some(at) => super::serialize(at, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => DateTime::parse_from_rfc3339(&raw)
                    .map(|at| Some(at.with_timezone(&Utc)))
                    .map_err(serde::de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn normalize_rejects_blank_input() {
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text("   \t\n"), None);
    }

    #[test]
    fn normalize_trims_and_caps_length() {
        assert_eq!(normalize_text("  Buy milk  ").as_deref(), Some("Buy milk"));

        let long = "é".repeat(150);
        let kept = normalize_text(&long).unwrap();
        assert_eq!(kept.chars().count(), MAX_TEXT_LEN);

        let padded = format!("{}  tail", "a".repeat(99));
        assert_eq!(normalize_text(&padded).unwrap(), "a".repeat(99));
    }

    #[test]
    fn new_task_serializes_like_a_browser_snapshot() {
        let task = Task::new(7, "Walk dog".into(), at(1_700_000_000));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "text": "Walk dog",
                "completed": false,
                "createdAt": "2023-11-14T22:13:20.000Z",
                "completedAt": null,
            })
        );
    }

    #[test]
    fn reads_records_without_optional_timestamps() {
        let raw = r#"{"id":1,"text":"x","completed":false,"createdAt":"2024-03-01T10:00:00.123Z"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.completed_at, None);
        assert_eq!(task.updated_at, None);
        assert_eq!(task.created_at.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn toggle_sets_and_clears_completed_at() {
        let mut task = Task::new(1, "x".into(), at(0));
        assert!(task.toggle(at(10)));
        assert_eq!(task.completed_at, Some(at(10)));
        assert!(!task.toggle(at(20)));
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn system_clock_has_millisecond_precision() {
        let now = SystemClock.now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
