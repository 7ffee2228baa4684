use std::path::Path;

use serde_json::Value;

use vigil_core::{FailedCheck, FindingsSummary, VigilError};

/// Top-level shape of a scanner report document.
///
/// The scanner emits either a single report object or a one-element list
/// wrapping it. Classification happens once, up front, instead of duck-typing
/// at the point of use.
#[derive(Debug)]
enum RawReport {
    /// Top level is the report object itself.
    Single(serde_json::Map<String, Value>),
    /// Top level is a non-empty list; element 0 is the report.
    List(Vec<Value>),
}

impl RawReport {
    /// Classify a parsed JSON value. Returns `None` for shapes the scanner
    /// never produces (scalars, empty lists).
    fn classify(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) if !items.is_empty() => Some(RawReport::List(items)),
            Value::Object(map) => Some(RawReport::Single(map)),
            _ => None,
        }
    }

    /// Resolve to the single report object this run operates on.
    fn into_report(self) -> Value {
        match self {
            RawReport::Single(map) => Value::Object(map),
            RawReport::List(mut items) => items.swap_remove(0),
        }
    }
}

/// Read a scan report and project it down to a [`FindingsSummary`].
///
/// Follows `results.failed_checks` into the report; missing intermediate
/// keys yield an empty summary, never an error. A top-level value that is
/// neither an object nor a non-empty list is logged and reported as
/// `Ok(None)` — the caller treats that as "no usable data" and skips the
/// remaining stages.
///
/// # Errors
///
/// Returns [`VigilError::FileNotFound`] if the report does not exist,
/// [`VigilError::Io`] if it cannot be read, and
/// [`VigilError::MalformedReport`] if it is not valid JSON or a
/// `failed_checks` entry is not an object. All of these are fatal to the
/// pipeline; downstream stages cannot proceed without the report.
pub fn read_report(path: &Path) -> Result<Option<FindingsSummary>, VigilError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(VigilError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let value: Value = serde_json::from_str(&raw).map_err(|e| {
        VigilError::MalformedReport(format!("invalid JSON in {}: {e}", path.display()))
    })?;

    let Some(shape) = RawReport::classify(value) else {
        tracing::error!(
            path = %path.display(),
            "report top level is neither an object nor a non-empty list"
        );
        return Ok(None);
    };

    let report = shape.into_report();
    let checks = report
        .get("results")
        .and_then(|r| r.get("failed_checks"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut projected = Vec::with_capacity(checks.len());
    for check in checks {
        let check: FailedCheck = serde_json::from_value(check).map_err(|e| {
            VigilError::MalformedReport(format!("invalid failed_checks entry: {e}"))
        })?;
        projected.push(check);
    }

    Ok(Some(FindingsSummary::new(projected)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_report(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn object_top_level_is_read_directly() {
        let file = write_report(
            r#"{"results": {"failed_checks": [{"check_id": "CKV_AWS_1", "resource": "aws_s3_bucket.x"}]}}"#,
        );
        let summary = read_report(file.path()).unwrap().unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.checks[0].check_id.as_deref(), Some("CKV_AWS_1"));
    }

    #[test]
    fn list_top_level_uses_first_element_only() {
        let file = write_report(
            r#"[
                {"results": {"failed_checks": [{"check_id": "CKV_FIRST"}]}},
                {"results": {"failed_checks": [{"check_id": "CKV_IGNORED"}]}}
            ]"#,
        );
        let summary = read_report(file.path()).unwrap().unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.checks[0].check_id.as_deref(), Some("CKV_FIRST"));
    }

    #[test]
    fn zero_failed_checks_gives_empty_summary_not_error() {
        let file = write_report(r#"{"results": {"failed_checks": []}}"#);
        let summary = read_report(file.path()).unwrap().unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.to_json().unwrap(), "[]");
    }

    #[test]
    fn missing_results_key_gives_empty_summary() {
        let file = write_report(r#"{"summary": "all good"}"#);
        let summary = read_report(file.path()).unwrap().unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn missing_failed_checks_key_gives_empty_summary() {
        let file = write_report(r#"{"results": {"passed_checks": []}}"#);
        let summary = read_report(file.path()).unwrap().unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn scalar_top_level_is_unusable_not_fatal() {
        let file = write_report(r#""not a report""#);
        let result = read_report(file.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_list_top_level_is_unusable_not_fatal() {
        let file = write_report("[]");
        let result = read_report(file.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_report(&dir.path().join("findings.json")).unwrap_err();
        assert!(matches!(err, VigilError::FileNotFound(_)));
    }

    #[test]
    fn invalid_json_is_malformed_report() {
        let file = write_report("{not json");
        let err = read_report(file.path()).unwrap_err();
        assert!(matches!(err, VigilError::MalformedReport(_)));
    }

    #[test]
    fn non_object_check_entry_is_malformed_report() {
        let file = write_report(r#"{"results": {"failed_checks": ["oops"]}}"#);
        let err = read_report(file.path()).unwrap_err();
        assert!(matches!(err, VigilError::MalformedReport(_)));
    }

    #[test]
    fn projection_keeps_report_order() {
        let file = write_report(
            r#"{"results": {"failed_checks": [
                {"check_id": "CKV_B", "severity": "HIGH"},
                {"check_id": "CKV_A"},
                {"check_id": "CKV_B", "severity": "HIGH"}
            ]}}"#,
        );
        let summary = read_report(file.path()).unwrap().unwrap();
        let ids: Vec<_> = summary
            .checks
            .iter()
            .map(|c| c.check_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["CKV_B", "CKV_A", "CKV_B"]);
        assert_eq!(summary.checks[1].severity, "MEDIUM");
    }
}
