use reqwest::Client;

use vigil_core::VigilError;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Split an `owner/name` repository slug into its components.
///
/// Exactly one `/` with non-empty sides is accepted; anything else is an
/// error, and no network call is made on that path.
///
/// # Errors
///
/// Returns [`VigilError::GitHub`] if the slug is malformed.
///
/// # Examples
///
/// ```
/// use vigil_review::github::parse_repo_slug;
///
/// let (owner, repo) = parse_repo_slug("acme/widgets").unwrap();
/// assert_eq!(owner, "acme");
/// assert_eq!(repo, "widgets");
/// assert!(parse_repo_slug("no-separator").is_err());
/// ```
pub fn parse_repo_slug(slug: &str) -> Result<(String, String), VigilError> {
    let mut parts = slug.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(VigilError::GitHub(format!(
            "invalid repository slug '{slug}', expected owner/name"
        ))),
    }
}

/// Client for posting issue comments on a GitHub pull request.
///
/// # Examples
///
/// ```
/// use vigil_review::github::GitHubClient;
///
/// let client = GitHubClient::new("ghp_xxxx", None).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client from a personal access token.
    ///
    /// `base_url` overrides the API host; GitHub Actions provides it via
    /// `GITHUB_API_URL`, tests point it at a local mock server.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::GitHub`] if the HTTP client cannot be built.
    pub fn new(token: &str, base_url: Option<&str>) -> Result<Self, VigilError> {
        let http = Client::builder()
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VigilError::GitHub(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            token: token.to_string(),
        })
    }

    /// Create one comment on the numbered pull request.
    ///
    /// PRs are issues to the comment API, so this targets
    /// `/repos/{owner}/{repo}/issues/{number}/comments`.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::GitHub`] on transport failure or any
    /// non-success status, carrying the status code and response body.
    pub async fn post_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<(), VigilError> {
        let url = format!(
            "{}/repos/{owner}/{repo}/issues/{number}/comments",
            self.base_url
        );
        let payload = serde_json::json!({ "body": body });

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| VigilError::GitHub(format!("failed to reach GitHub: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(VigilError::GitHub(format!(
                "comment creation failed with {status}: {body_text}"
            )));
        }

        Ok(())
    }

    /// Post the review text to the PR, reporting success as a boolean.
    ///
    /// Failures are logged with diagnostic detail; the caller never
    /// escalates `false` to a process failure. A malformed slug returns
    /// `false` without touching the network.
    pub async fn publish(&self, slug: &str, number: u64, body: &str) -> bool {
        let (owner, repo) = match parse_repo_slug(slug) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::error!("{e}");
                return false;
            }
        };

        match self.post_comment(&owner, &repo, number, body).await {
            Ok(()) => {
                tracing::info!("posted review comment to {slug} PR #{number}");
                true
            }
            Err(e) => {
                tracing::error!("{e}");
                tracing::error!(
                    "hint: check that GITHUB_PAT has 'repo' scope and the PR number is valid"
                );
                false
            }
        }
    }
}
