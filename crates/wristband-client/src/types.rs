//! Rally server wire types.

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status value the rally server uses for a completed operation.
pub const STATUS_SUCCESS: &str = "success";

/// Body of `POST /email/{tag_id}`.
#[derive(Debug, Clone, Serialize)]
pub struct EmailRegistration {
    pub email: String,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct TagRegistration {
    pub tag_id: String,
}

/// Reply to an email registration.
///
/// Decoding is permissive: any of the known keys may be missing or `null`,
/// and unknown keys are kept in `extra`. A known key holding something
/// other than a string is a decode error.
///
/// A `null` field decodes to `None` and is left out when the value is
/// serialized again, so `{"error": null}` round-trips as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegistrationResult {
    /// Whether the server reported success.
    ///
    /// Only the rally server's `"success"` status counts; any other value,
    /// such as `"ok"`, is treated as a failure.
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS) && self.error_message().is_none()
    }

    /// The server's error text, if it sent a non-empty one.
    pub fn error_message(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }

    /// Parsed registration timestamp.
    pub fn registered_at_time(&self) -> Option<NaiveDateTime> {
        self.registered_at.as_deref().and_then(parse_timestamp)
    }

    /// Parsed finish timestamp.
    pub fn finished_at_time(&self) -> Option<NaiveDateTime> {
        self.finished_at.as_deref().and_then(parse_timestamp)
    }

    /// Time between registration and finish, when both timestamps parse.
    pub fn elapsed(&self) -> Option<TimeDelta> {
        Some(self.finished_at_time()? - self.registered_at_time()?)
    }
}

/// Reply to tag registration and flag collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Acknowledgement {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS) && self.error_message().is_none()
    }

    pub fn error_message(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }

    pub fn timestamp_time(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }
}

/// Reply to `GET /stats`.
///
/// Counts are optional because the server sums over an empty table as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RallyStats {
    #[serde(default)]
    pub total_participants: Option<u64>,
    #[serde(default)]
    pub flags_collected: FlagCounts,
    #[serde(default)]
    pub email_submissions: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagCounts {
    #[serde(default)]
    pub flag1: Option<u64>,
    #[serde(default)]
    pub flag2: Option<u64>,
    #[serde(default)]
    pub flag3: Option<u64>,
}

/// Parse a server timestamp.
///
/// Accepts RFC 3339 (converted to UTC) and naive ISO-8601 with or without
/// fractional seconds, which is what the rally server writes.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_naive_iso_timestamp() {
        let ts = parse_timestamp("2024-01-01T10:00:00.123456").unwrap();
        assert_eq!(ts.to_string(), "2024-01-01 10:00:00.123456");
    }

    #[test]
    fn test_parse_rfc3339_timestamp() {
        let ts = parse_timestamp("2024-01-01T01:00:00+01:00").unwrap();
        assert_eq!(ts.to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_parse_sqlite_style_timestamp() {
        assert!(parse_timestamp("2024-01-01 10:00:00").is_some());
    }

    #[test]
    fn test_parse_invalid_timestamp() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_elapsed() {
        let result = RegistrationResult {
            status: Some("success".into()),
            registered_at: Some("2024-01-01T10:00:00".into()),
            finished_at: Some("2024-01-01T10:42:30".into()),
            ..Default::default()
        };

        assert_eq!(result.elapsed().unwrap().num_seconds(), 42 * 60 + 30);
    }

    #[test]
    fn test_elapsed_missing_timestamp() {
        let result = RegistrationResult {
            registered_at: Some("2024-01-01T10:00:00".into()),
            finished_at: Some(String::new()),
            ..Default::default()
        };

        assert!(result.elapsed().is_none());
    }

    #[test]
    fn test_is_success() {
        let ok = RegistrationResult {
            status: Some("success".into()),
            error: Some(String::new()),
            ..Default::default()
        };
        assert!(ok.is_success());
        assert!(ok.error_message().is_none());

        let failed = RegistrationResult {
            status: Some("error".into()),
            error: Some("Participant not found".into()),
            ..Default::default()
        };
        assert!(!failed.is_success());
        assert_eq!(failed.error_message(), Some("Participant not found"));
    }

    #[test]
    fn test_only_success_status_counts() {
        let result: RegistrationResult =
            serde_json::from_str(r#"{"status": "ok", "error": ""}"#).unwrap();

        assert!(!result.is_success());
        assert!(result.error_message().is_none());
    }

    #[test]
    fn test_null_field_dropped_on_reserialize() {
        let result: RegistrationResult = serde_json::from_str(
            r#"{"status":"success","error":null,"registered_at":"x","finished_at":"y"}"#,
        )
        .unwrap();

        assert!(result.error.is_none());
        assert!(result.extra.is_empty());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"status": "success", "registered_at": "x", "finished_at": "y"})
        );
    }

    #[test]
    fn test_acknowledgement_error_only() {
        let ack: Acknowledgement =
            serde_json::from_str(r#"{"error": "Tag ID already exists"}"#).unwrap();

        assert!(ack.status.is_none());
        assert!(!ack.is_success());
        assert_eq!(ack.error_message(), Some("Tag ID already exists"));
    }

    #[test]
    fn test_stats_with_null_sums() {
        let stats: RallyStats = serde_json::from_str(
            r#"{
                "total_participants": 0,
                "flags_collected": {"flag1": null, "flag2": null, "flag3": null},
                "email_submissions": null
            }"#,
        )
        .unwrap();

        assert_eq!(stats.total_participants, Some(0));
        assert!(stats.flags_collected.flag1.is_none());
        assert!(stats.email_submissions.is_none());
    }
}
