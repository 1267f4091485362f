//! Command-line interface for dhcp-scope-metrics
//!
//! The `run` function parses the command line with clap and routes to one of four
//! commands:
//!
//! - **get**: parse item keys such as `windows_dhcp.scope_free[10.0.0.0]`, export them
//!   concurrently through PowerShell, and print one `<item>: <value>` line per item
//! - **list**: print the supported metric keys with their shapes
//! - **init**: write the default `dhcp-metrics.toml`
//! - **validate**: load a configuration file and report whether it is usable
//!
//! All output goes through the [`Host`] trait so commands can be exercised without
//! touching the real process streams.

mod common;
mod config;
mod get;
mod host;
mod init;
mod list;
mod run;
mod validate;

pub use common::LogLevel;
pub use config::{Config, DEFAULT_CONFIG_FILE};
pub use get::{GetArgs, export_items, get_metrics};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use list::{ListArgs, list_metrics};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
