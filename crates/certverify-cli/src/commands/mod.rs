use crate::cli::{Cli, Command};
use crate::config::VerifierConfig;

pub mod extract;
pub mod lookup;
pub mod verify;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = VerifierConfig::resolve(&cli.global)?;
    match cli.cmd {
        Command::Verify(args) => verify::run(args, &config).await,
        Command::Lookup(args) => lookup::run(args, &config).await,
        Command::Extract(args) => extract::run(args, &config).await,
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}
