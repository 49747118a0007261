use std::time::Duration;

use anyhow::Context;
use tracing::{error, info};

use super::print_json;
use crate::cli::VerifyArgs;
use crate::config::VerifierConfig;
use crate::exit_codes;
use crate::wiring::build_pipeline;

pub async fn run(args: VerifyArgs, config: &VerifierConfig) -> anyhow::Result<i32> {
    let document = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let pipeline = build_pipeline(config).await?;
    let timeout = Duration::from_secs(args.timeout_secs.unwrap_or(config.verify_timeout_secs));

    info!(file = %args.file.display(), bytes = document.len(), "verifying certificate");

    // On timeout the in-flight verification is dropped and no verdict is printed.
    let verdict = match tokio::time::timeout(timeout, pipeline.verify(&document)).await {
        Ok(verdict) => verdict,
        Err(_) => {
            error!(timeout_secs = timeout.as_secs(), "verification timed out");
            eprintln!("verification timed out after {}s", timeout.as_secs());
            return Ok(exit_codes::TIMED_OUT);
        }
    };

    print_json(&verdict, args.pretty)?;

    Ok(if verdict.is_authenticated() {
        exit_codes::SUCCESS
    } else {
        exit_codes::REJECTED
    })
}
