//! Project registry backends for certificate verification.
//!
//! Both backends implement [`certverify_core::ProjectRegistry`], so either can
//! back the verification pipeline:
//!
//! - [`HttpRegistry`]: live lookup against a Carbonmark-style projects API
//! - [`StaticRegistry`]: fixed table of known projects (built-in or loaded
//!   from a YAML/JSON file)
//!
//! # Quick Start
//!
//! ```no_run
//! use certverify_core::{ProjectRegistry, RegistryRecord};
//! use certverify_registry::{HttpRegistry, RegistryConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let registry = HttpRegistry::new(RegistryConfig::from_env()?)?;
//!
//! match registry.lookup("VCS-875").await {
//!     RegistryRecord::Found(record) => println!("{}", record.display_name()),
//!     RegistryRecord::NotFound => println!("unknown project"),
//!     RegistryRecord::LookupError(detail) => println!("lookup failed: {detail}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `CERTVERIFY_REGISTRY_BACKEND` | `static` (default) or `http` |
//! | `CERTVERIFY_REGISTRY_URL` | API base URL (default: `https://v17.api.carbonmark.com/api`) |
//! | `CERTVERIFY_REGISTRY_TOKEN` | Bearer token, if the API requires one |
//! | `CERTVERIFY_REGISTRY_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `CERTVERIFY_REGISTRY_TABLE` | YAML/JSON file replacing the built-in static table |

pub mod client;
pub mod error;
mod identifier;
pub mod static_table;
pub mod types;

pub use client::HttpRegistry;
pub use error::{RegistryError, RegistryResult};
pub use identifier::is_valid_project_id;
pub use static_table::StaticRegistry;
pub use types::{RegistryBackend, RegistryConfig};
