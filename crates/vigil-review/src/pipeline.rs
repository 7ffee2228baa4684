use vigil_core::{Config, VigilError};

use crate::github::GitHubClient;
use crate::llm::GeminiClient;
use crate::{prompt, report};

/// How a pipeline run ended.
///
/// Every variant exits the process with status 0; fatal conditions are
/// `Err` from [`ReviewPipeline::run`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Review generated, printed, and posted to the PR.
    Posted,
    /// Review generated and printed; the comment API call failed.
    PublishFailed,
    /// Review generated and printed; posting skipped by request.
    DryRun,
    /// Report parsed cleanly but contained zero failed checks.
    NoFindings,
    /// Report top level had an unusable shape; nothing to review.
    UnusableReport,
    /// Model backend call failed; remaining stages skipped.
    GenerationFailed,
}

/// Single-shot driver for the read → generate → publish pipeline.
///
/// Stages run strictly in order; each stage's failure either propagates as
/// a fatal error or short-circuits the remaining stages with a
/// [`RunOutcome`] sentinel.
pub struct ReviewPipeline {
    config: Config,
    dry_run: bool,
}

impl ReviewPipeline {
    /// Create a pipeline for one invocation.
    pub fn new(config: Config, dry_run: bool) -> Self {
        Self { config, dry_run }
    }

    /// Run the full pipeline.
    ///
    /// Prints the generated review text to stdout before the publish
    /// attempt, so the text survives a failed post.
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal conditions: a missing or
    /// unparseable report file. Backend and publish failures are logged
    /// and reported through the returned [`RunOutcome`].
    pub async fn run(&self) -> Result<RunOutcome, VigilError> {
        let summary = match report::read_report(&self.config.report_path)? {
            Some(summary) => summary,
            None => {
                tracing::error!(
                    "no usable scan data in {}; skipping review",
                    self.config.report_path.display()
                );
                return Ok(RunOutcome::UnusableReport);
            }
        };

        if summary.is_empty() {
            tracing::info!("scan reported no failed checks; nothing to review");
            return Ok(RunOutcome::NoFindings);
        }
        tracing::info!(checks = summary.len(), "scan summary ready");

        let client = GeminiClient::new(
            &self.config.gemini_api_key,
            &self.config.model,
            self.config.gemini_endpoint.as_deref(),
        )?;

        tracing::info!(model = %self.config.model, "requesting review from model backend");
        let review = match client
            .generate(
                prompt::SYSTEM_INSTRUCTION,
                &prompt::build_review_prompt(&summary.to_json()?),
            )
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("review generation failed: {e}");
                return Ok(RunOutcome::GenerationFailed);
            }
        };

        tracing::info!("model review generated; printing preview");
        println!("{review}");

        if self.dry_run {
            tracing::info!("dry run: skipping comment post");
            return Ok(RunOutcome::DryRun);
        }

        let github = GitHubClient::new(
            &self.config.github_token,
            self.config.github_api_url.as_deref(),
        )?;
        if github
            .publish(&self.config.repo_slug, self.config.pr_number, &review)
            .await
        {
            Ok(RunOutcome::Posted)
        } else {
            Ok(RunOutcome::PublishFailed)
        }
    }
}
