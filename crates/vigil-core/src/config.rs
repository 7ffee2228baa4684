use std::path::PathBuf;

use crate::error::VigilError;

/// Repository slug used when `GITHUB_REPOSITORY` is absent (local runs).
pub const DEFAULT_REPO_SLUG: &str = "ys079/checkov";
/// Pull request number used when `PR_NUMBER` is absent (local runs).
pub const DEFAULT_PR_NUMBER: u64 = 1;
/// Model identifier used when no override is given.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Scan report path used when `--file` is not given.
pub const DEFAULT_REPORT_PATH: &str = "findings.json";

/// Runtime configuration for one pipeline invocation.
///
/// Built once at startup from the process environment, then passed
/// explicitly into each stage. Nothing reads the environment after this.
///
/// # Examples
///
/// ```
/// use vigil_core::Config;
///
/// let config = Config::from_lookup(|key| match key {
///     "GEMINI_API_KEY" => Some("test-key".into()),
///     "GITHUB_PAT" => Some("ghp_test".into()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(config.repo_slug, "ys079/checkov");
/// assert_eq!(config.pr_number, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the model backend.
    pub gemini_api_key: String,
    /// Personal access token for the GitHub comment API.
    pub github_token: String,
    /// `owner/name` slug of the target repository.
    pub repo_slug: String,
    /// Pull request number the comment is posted to.
    pub pr_number: u64,
    /// Model identifier sent to the backend.
    pub model: String,
    /// Path to the scan report.
    pub report_path: PathBuf,
    /// Base URL override for the model backend.
    pub gemini_endpoint: Option<String>,
    /// Base URL override for the GitHub API (GitHub Actions sets this).
    pub github_api_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Config`] if a required credential is absent or
    /// `PR_NUMBER` is not a valid number.
    pub fn from_env() -> Result<Self, VigilError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Separated from [`Config::from_env`] so tests can supply variables
    /// without mutating process-wide state. Empty values are treated the
    /// same as absent ones for the required credentials.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::Config`] if `GEMINI_API_KEY` or `GITHUB_PAT`
    /// is missing, or `PR_NUMBER` is present but not a valid number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VigilError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| VigilError::Config("GEMINI_API_KEY is not set".into()))?;
        let github_token = lookup("GITHUB_PAT")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| VigilError::Config("GITHUB_PAT is not set".into()))?;

        let repo_slug = lookup("GITHUB_REPOSITORY").unwrap_or_else(|| DEFAULT_REPO_SLUG.into());

        let pr_number = match lookup("PR_NUMBER").filter(|v| !v.is_empty()) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                VigilError::Config(format!("PR_NUMBER is not a valid number: {raw}"))
            })?,
            None => DEFAULT_PR_NUMBER,
        };

        Ok(Self {
            gemini_api_key,
            github_token,
            repo_slug,
            pr_number,
            model: DEFAULT_MODEL.into(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            gemini_endpoint: lookup("GEMINI_API_ENDPOINT").filter(|v| !v.is_empty()),
            github_api_url: lookup("GITHUB_API_URL").filter(|v| !v.is_empty()),
        })
    }
}
