//! Purpose: Define a stable, structured schema for non-fatal stderr notices.
//! Exports: `Notice`, `notice_json`, `skipped_line_notice`, `batch_summary_notice`.
//! Role: Shared contract helper for CLI diagnostics emitted while skipping bad lines.
//! Invariants: Notices are non-fatal and never alter stdout payloads.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use serde_json::{Map, Value, json};

use crate::api::{BatchFailure, BatchOutcome, to_exit_code};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub time: String,
    pub cmd: String,
    pub source: String,
    pub message: String,
    pub details: Map<String, Value>,
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("time".to_string(), json!(notice.time));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    inner.insert("source".to_string(), json!(notice.source));
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}

pub fn skipped_line_notice(failure: &BatchFailure, source: &str, time: String) -> Notice {
    let mut details = Map::new();
    details.insert("line".to_string(), json!(failure.line));
    details.insert("kind".to_string(), json!(format!("{:?}", failure.kind)));
    details.insert("exit_code".to_string(), json!(to_exit_code(failure.kind)));
    if let Some(offset) = failure.offset {
        details.insert("offset".to_string(), json!(offset));
    }
    if let Some(snippet) = &failure.snippet {
        details.insert("snippet".to_string(), json!(snippet));
    }
    Notice {
        kind: "line_skipped".to_string(),
        time,
        cmd: "parse".to_string(),
        source: source.to_string(),
        message: format!("line {}: {}", failure.line, failure.message),
        details,
    }
}

pub fn batch_summary_notice(outcome: &BatchOutcome, source: &str, time: String) -> Notice {
    let mut details = Map::new();
    details.insert("lines_total".to_string(), json!(outcome.lines_total));
    details.insert("ok".to_string(), json!(outcome.ok));
    details.insert("failed".to_string(), json!(outcome.failed));
    Notice {
        kind: "batch_summary".to_string(),
        time,
        cmd: "parse".to_string(),
        source: source.to_string(),
        message: format!(
            "Finished with {} skipped line{}.",
            outcome.failed,
            if outcome.failed == 1 { "" } else { "s" }
        ),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::{batch_summary_notice, notice_json, skipped_line_notice};
    use crate::api::{BatchFailure, BatchOutcome, ErrorKind};

    #[test]
    fn notice_json_has_required_fields() {
        let failure = BatchFailure {
            line: 3,
            kind: ErrorKind::InvalidValue,
            message: "invalid value".to_string(),
            offset: Some(1),
            snippet: Some("tru".to_string()),
        };
        let notice = skipped_line_notice(&failure, "stdin", "2026-02-01T00:00:00Z".to_string());

        let value = notice_json(&notice);
        let obj = value
            .get("notice")
            .and_then(|v| v.as_object())
            .expect("notice object");

        assert_eq!(obj.get("kind").and_then(|v| v.as_str()), Some("line_skipped"));
        assert_eq!(
            obj.get("time").and_then(|v| v.as_str()),
            Some("2026-02-01T00:00:00Z")
        );
        assert_eq!(obj.get("cmd").and_then(|v| v.as_str()), Some("parse"));
        assert_eq!(obj.get("source").and_then(|v| v.as_str()), Some("stdin"));
        assert_eq!(
            obj.get("message").and_then(|v| v.as_str()),
            Some("line 3: invalid value")
        );
        let details = obj.get("details").and_then(|v| v.as_object()).expect("details");
        assert_eq!(details.get("exit_code").and_then(|v| v.as_i64()), Some(11));
        assert_eq!(details.get("snippet").and_then(|v| v.as_str()), Some("tru"));
    }

    #[test]
    fn summary_pluralizes_skipped_lines() {
        let one = BatchOutcome {
            lines_total: 2,
            ok: 1,
            failed: 1,
        };
        let notice = batch_summary_notice(&one, "in.txt", "t".to_string());
        assert_eq!(notice.message, "Finished with 1 skipped line.");

        let two = BatchOutcome {
            lines_total: 2,
            ok: 0,
            failed: 2,
        };
        let notice = batch_summary_notice(&two, "in.txt", "t".to_string());
        assert_eq!(notice.message, "Finished with 2 skipped lines.");
        assert_eq!(notice.details.get("failed").and_then(|v| v.as_u64()), Some(2));
    }
}
