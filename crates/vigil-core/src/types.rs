use serde::{Deserialize, Serialize};

use crate::error::VigilError;

fn default_severity() -> String {
    "MEDIUM".into()
}

/// One failed check projected out of the scanner report.
///
/// Only the five fields the review model needs are kept; everything else in
/// the report entry is dropped. No field is validated beyond presence —
/// absent fields serialize as `null`, except `severity` which defaults to
/// `"MEDIUM"`.
///
/// # Examples
///
/// ```
/// use vigil_core::FailedCheck;
///
/// let check: FailedCheck = serde_json::from_str(r#"{"check_id": "CKV_AWS_1"}"#).unwrap();
/// assert_eq!(check.check_id.as_deref(), Some("CKV_AWS_1"));
/// assert_eq!(check.severity, "MEDIUM");
/// assert!(check.resource.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedCheck {
    /// Scanner rule identifier (e.g. `CKV_AWS_1`).
    pub check_id: Option<String>,
    /// Severity label; the scanner omits it for unrated checks.
    #[serde(default = "default_severity")]
    pub severity: String,
    /// Affected infrastructure resource.
    pub resource: Option<String>,
    /// Source file the finding points at.
    pub file_path: Option<String>,
    /// Offending code block, carried opaquely for the model.
    #[serde(
        default,
        rename(deserialize = "code_block", serialize = "vulnerable_lines")
    )]
    pub vulnerable_lines: Option<serde_json::Value>,
}

/// Ordered collection of failed checks from one scan run.
///
/// Preserves the source report's order and duplicates. Serializes to the
/// indented JSON string that gets embedded in the model prompt.
///
/// # Examples
///
/// ```
/// use vigil_core::FindingsSummary;
///
/// let summary = FindingsSummary::new(vec![]);
/// assert!(summary.is_empty());
/// assert_eq!(summary.to_json().unwrap(), "[]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FindingsSummary {
    /// Projected checks, in report order.
    pub checks: Vec<FailedCheck>,
}

impl FindingsSummary {
    /// Wrap a list of projected checks.
    pub fn new(checks: Vec<FailedCheck>) -> Self {
        Self { checks }
    }

    /// Whether the scan produced zero failed checks.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Number of failed checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Serialize the checks as indented JSON for the model prompt.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<String, VigilError> {
        Ok(serde_json::to_string_pretty(&self.checks)?)
    }
}
