use std::path::PathBuf;

use certverify_registry::RegistryBackend;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::ArchiveBackend;

#[derive(Parser, Debug)]
#[command(
    name = "certverify",
    version,
    about = "Authenticate carbon-offset certificates against a project registry"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify a certificate document and print the verdict as JSON
    Verify(VerifyArgs),
    /// Look up a project identifier in the configured registry
    Lookup(LookupArgs),
    /// Run claim extraction only and print the extracted claims
    Extract(ExtractArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// YAML configuration file
    #[arg(long, global = true, env = "CERTVERIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Minimum accepted trust score
    #[arg(long, global = true)]
    pub min_score: Option<u32>,

    /// Registry backend
    #[arg(long, global = true, value_enum)]
    pub registry: Option<RegistryBackendArg>,

    /// Static registry table (YAML/JSON)
    #[arg(long, global = true)]
    pub registry_table: Option<PathBuf>,

    /// Archival backend
    #[arg(long, global = true, value_enum)]
    pub archive: Option<ArchiveBackendArg>,

    /// Directory for the local archive
    #[arg(long, global = true)]
    pub archive_dir: Option<PathBuf>,

    /// External OCR program reading the document on stdin
    #[arg(long, global = true)]
    pub ocr_command: Option<String>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Certificate document
    pub file: PathBuf,

    /// Give up after this many seconds (overrides configuration)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Pretty-print the verdict
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Project identifier, e.g. VCS-875
    pub project_id: String,

    /// Pretty-print the result
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Certificate document
    pub file: PathBuf,

    /// Omit the recognized text from the output
    #[arg(long)]
    pub no_text: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryBackendArg {
    Static,
    Http,
}

impl From<RegistryBackendArg> for RegistryBackend {
    fn from(arg: RegistryBackendArg) -> Self {
        match arg {
            RegistryBackendArg::Static => RegistryBackend::Static,
            RegistryBackendArg::Http => RegistryBackend::Http,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveBackendArg {
    Local,
    Pinata,
}

impl From<ArchiveBackendArg> for ArchiveBackend {
    fn from(arg: ArchiveBackendArg) -> Self {
        match arg {
            ArchiveBackendArg::Local => ArchiveBackend::Local,
            ArchiveBackendArg::Pinata => ArchiveBackend::Pinata,
        }
    }
}
