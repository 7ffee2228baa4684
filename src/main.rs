use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use vigil_core::Config;
use vigil_review::pipeline::{ReviewPipeline, RunOutcome};

#[derive(Parser)]
#[command(
    name = "vigil",
    version,
    about = "AI security review bot for IaC scan findings",
    long_about = "Vigil reads a Checkov-style scan report, asks a language model for a\n\
                  security review, and posts the result as a pull request comment.\n\n\
                  Designed to run as a single-shot CI job step. Credentials and the\n\
                  target PR come from the environment (GEMINI_API_KEY, GITHUB_PAT,\n\
                  GITHUB_REPOSITORY, PR_NUMBER); flags override the environment.\n\n\
                  Examples:\n  \
                    vigil                              Review findings.json and post\n  \
                    vigil --file results/scan.json     Review a report elsewhere\n  \
                    vigil --repo acme/widgets --pr 42  Target a specific PR\n  \
                    vigil --dry-run                    Print the review, skip posting"
)]
struct Cli {
    /// Path to the scan report (default: findings.json)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Repository slug override (owner/name)
    #[arg(long)]
    repo: Option<String>,

    /// Pull request number override
    #[arg(long)]
    pr: Option<u64>,

    /// Model identifier override
    #[arg(long)]
    model: Option<String>,

    /// Generate and print the review but skip posting the comment
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // stdout is reserved for the review text.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Credentials are checked before anything touches the report file.
    let mut config = Config::from_env().into_diagnostic()?;
    if let Some(file) = cli.file {
        config.report_path = file;
    }
    if let Some(repo) = cli.repo {
        config.repo_slug = repo;
    }
    if let Some(pr) = cli.pr {
        config.pr_number = pr;
    }
    if let Some(model) = cli.model {
        config.model = model;
    }

    tracing::info!(
        repo = %config.repo_slug,
        pr = config.pr_number,
        "starting security review run"
    );

    let pipeline = ReviewPipeline::new(config, cli.dry_run);
    match pipeline.run().await.into_diagnostic()? {
        RunOutcome::Posted => tracing::info!("review posted"),
        RunOutcome::PublishFailed => tracing::warn!("review generated but not posted"),
        RunOutcome::DryRun => tracing::info!("dry run complete"),
        RunOutcome::NoFindings | RunOutcome::UnusableReport | RunOutcome::GenerationFailed => {}
    }

    Ok(())
}
