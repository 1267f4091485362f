//! Metric definitions and request types
//!
//! Every metric the monitoring host can query is described by a [`MetricDef`] in a
//! static table. A definition pairs a key with the PowerShell pipeline that produces
//! its data ([`CommandTemplate`]) and the [`ExpectedShape`] the raw output must be
//! normalized into. The table is `const` and never changes at runtime.
//!
//! The host addresses metrics either by their bare key (`scope_free`) or by the key
//! it registered them under (`windows_dhcp.scope_free`). Host item keys carrying
//! parameters (`windows_dhcp.scope_free[10.0.0.0]`) are turned into a
//! [`MetricRequest`] by [`parse_item_key`].

mod item_key;
mod metric_def;
mod metric_request;
mod shape;

pub use item_key::parse_item_key;
pub use metric_def::{CommandTemplate, KEY_PREFIX, METRIC_DEFINITIONS, MetricDef, SCOPE_ID_SLOT, definitions, lookup};
pub use metric_request::MetricRequest;
pub use shape::ExpectedShape;
