use certverify_core::{ProjectRegistry, RegistryRecord};
use serde_json::json;

use super::print_json;
use crate::cli::LookupArgs;
use crate::config::VerifierConfig;
use crate::exit_codes;
use crate::wiring::build_registry;

pub async fn run(args: LookupArgs, config: &VerifierConfig) -> anyhow::Result<i32> {
    let registry = build_registry(&config.registry).await?;

    let (output, code) = match registry.lookup(&args.project_id).await {
        RegistryRecord::Found(record) => (
            json!({"status": "found", "record": record}),
            exit_codes::SUCCESS,
        ),
        RegistryRecord::NotFound => (json!({"status": "not_found"}), exit_codes::REJECTED),
        RegistryRecord::LookupError(detail) => (
            json!({"status": "error", "detail": detail}),
            exit_codes::LOOKUP_FAILED,
        ),
    };

    print_json(&output, args.pretty)?;
    Ok(code)
}
