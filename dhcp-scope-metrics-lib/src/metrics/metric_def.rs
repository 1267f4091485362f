use super::ExpectedShape;

/// Prefix under which the monitoring host registers every item.
pub const KEY_PREFIX: &str = "windows_dhcp.";

/// Placeholder replaced by the quoted scope identifier in parameterized templates.
pub const SCOPE_ID_SLOT: &str = "{scope_id}";

/// The PowerShell pipeline run for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTemplate {
    /// Command text used as-is; the metric takes no parameters.
    Fixed(&'static str),

    /// Command text with a single [`SCOPE_ID_SLOT`]; the metric takes one scope identifier.
    ScopeId(&'static str),
}

impl CommandTemplate {
    #[must_use]
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Fixed(text) | Self::ScopeId(text) => text,
        }
    }

    #[must_use]
    pub const fn takes_scope_id(&self) -> bool {
        matches!(self, Self::ScopeId(_))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct MetricDef {
    pub key: &'static str,
    pub description: &'static str,
    pub shape: ExpectedShape,
    pub template: CommandTemplate,
}

impl MetricDef {
    /// The key as registered with the monitoring host.
    #[must_use]
    pub fn host_key(&self) -> String {
        format!("{KEY_PREFIX}{}", self.key)
    }
}

macro_rules! metric_def {
    ($key:expr, $description:expr, $shape:ident, $template:expr) => {
        MetricDef {
            key: $key,
            description: $description,
            shape: ExpectedShape::$shape,
            template: $template,
        }
    };
}

pub const METRIC_DEFINITIONS: &[MetricDef] = &[
    metric_def!(
        "scope_ids",
        "The list of DHCP scope IDs.",
        StringList,
        CommandTemplate::Fixed(
            "Get-DhcpServerv4Scope -ErrorAction SilentlyContinue \
             | ForEach-Object { $_.ScopeId.IPAddressToString } \
             | ConvertTo-Json -Compress -ErrorAction SilentlyContinue"
        )
    ),
    metric_def!(
        "scope_free",
        "The number of free IP addresses in the DHCP scope.",
        ScalarInt,
        CommandTemplate::ScopeId(
            "Get-DhcpServerv4ScopeStatistics -ScopeId {scope_id} -ErrorAction SilentlyContinue \
             | Select-Object -ExpandProperty Free -ErrorAction SilentlyContinue"
        )
    ),
    metric_def!(
        "scope_in_use",
        "The number of used IP addresses in the DHCP scope.",
        ScalarInt,
        CommandTemplate::ScopeId(
            "Get-DhcpServerv4ScopeStatistics -ScopeId {scope_id} -ErrorAction SilentlyContinue \
             | Select-Object -ExpandProperty InUse -ErrorAction SilentlyContinue"
        )
    ),
    metric_def!(
        "scope.get",
        "Free and in-use address counts for every DHCP scope.",
        RecordArray,
        CommandTemplate::Fixed(
            "Get-DhcpServerv4ScopeStatistics -ErrorAction SilentlyContinue \
             | Select-Object @{Name='ScopeId';Expression={$_.ScopeId.IPAddressToString}}, Free, InUse \
             | ConvertTo-Json -Compress -ErrorAction SilentlyContinue"
        )
    ),
];

/// Find the definition for a key, accepting both the bare key and the host-prefixed form.
#[must_use]
pub fn lookup(key: &str) -> Option<&'static MetricDef> {
    let key = key.strip_prefix(KEY_PREFIX).unwrap_or(key);
    METRIC_DEFINITIONS.iter().find(|def| def.key == key)
}

/// Iterate over every supported metric.
pub fn definitions() -> impl Iterator<Item = &'static MetricDef> {
    METRIC_DEFINITIONS.iter()
}
