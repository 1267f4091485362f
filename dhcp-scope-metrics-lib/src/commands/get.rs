use super::Host;
use super::config::Config;
use crate::Result;
use crate::exec::Executor;
use crate::metrics::{MetricRequest, parse_item_key};
use crate::query::Exporter;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::bail;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Item keys to export, such as `windows_dhcp.scope_ids` or `windows_dhcp.scope_free[10.0.0.0]`
    #[arg(value_name = "ITEM", required = true)]
    pub items: Vec<String>,

    /// Path to configuration file (default is `dhcp-metrics.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Export the requested items through PowerShell and print one line per item.
pub async fn get_metrics<H: Host>(host: &mut H, args: &GetArgs) -> Result<()> {
    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let exporter = Exporter::new(config.executor(), config.normalize_options());
    export_items(host, &exporter, &args.items).await
}

/// Export items concurrently and report them in the order given.
///
/// Successful items are written to the host's output as `<item>: <value>`, failed
/// ones to its error stream. Every item is reported before the call fails.
///
/// # Errors
///
/// Returns an error if an item key cannot be parsed or any export fails
pub async fn export_items<H: Host, E: Executor>(host: &mut H, exporter: &Exporter<E>, items: &[String]) -> Result<()> {
    let requests = items.iter().map(|item| parse_item_key(item)).collect::<Result<Vec<MetricRequest>>>()?;

    let results = exporter.export_many(&requests).await;

    let mut failures = 0_usize;
    for (item, result) in items.iter().zip(results) {
        match result {
            Ok(value) => {
                let _ = writeln!(host.output(), "{item}: {value}");
            }
            Err(e) => {
                failures += 1;
                let _ = writeln!(host.error(), "{item}: {e}");
            }
        }
    }

    if failures > 0 {
        host.exit(1);
        bail!("{failures} of {} item(s) could not be exported", items.len());
    }

    Ok(())
}
