use super::Host;
use crate::Result;
use crate::metrics::definitions;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show keys without the `windows_dhcp.` prefix
    #[arg(long)]
    pub bare: bool,
}

/// Print every supported metric with its parameters, shape, and description.
pub fn list_metrics<H: Host>(host: &mut H, args: &ListArgs) -> Result<()> {
    let mut out = host.output();

    for def in definitions() {
        let key = if args.bare { def.key.to_string() } else { def.host_key() };
        let key = if def.template.takes_scope_id() { format!("{key}[scope_id]") } else { key };
        let _ = writeln!(out, "{key:<36} {:<13} {}", def.shape.to_string(), def.description);
    }

    Ok(())
}
