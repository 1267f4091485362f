//! Command dispatch logic for dhcp-scope-metrics

use super::common::{LogLevel, init_logging};
use super::{GetArgs, InitArgs, ListArgs, ValidateArgs, get_metrics, init_config, list_metrics, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "dhcp-scope-metrics", version, author, long_about = None)]
#[command(about = "Report Windows DHCP scope inventory and utilization to a monitoring host")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    /// Diagnostic output written to stderr
    #[arg(long, global = true, value_enum, default_value = "none", value_name = "LEVEL")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: MetricsSubcommand,
}

#[derive(Subcommand, Debug)]
enum MetricsSubcommand {
    /// Export one or more metrics
    Get(GetArgs),
    /// List the supported metric keys
    List(ListArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.log_level);

    match &cli.command {
        MetricsSubcommand::Get(get_args) => get_metrics(host, get_args).await,
        MetricsSubcommand::List(list_args) => list_metrics(host, list_args),
        MetricsSubcommand::Init(init_args) => init_config(host, init_args),
        MetricsSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
