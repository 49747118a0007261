use anyhow::Context;
use certverify_core::MetadataExtractor;

use super::print_json;
use crate::cli::ExtractArgs;
use crate::config::VerifierConfig;
use crate::exit_codes;
use crate::wiring::build_extractor;

pub async fn run(args: ExtractArgs, config: &VerifierConfig) -> anyhow::Result<i32> {
    let document = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let extractor = build_extractor(&config.extractor);
    match extractor.extract(&document).await {
        Ok(mut claims) => {
            if args.no_text {
                claims.raw_text.clear();
            }
            print_json(&claims, true)?;
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => {
            eprintln!("extraction failed: {e}");
            Ok(exit_codes::REJECTED)
        }
    }
}
