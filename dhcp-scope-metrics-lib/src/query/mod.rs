//! Building, running, and interpreting DHCP queries
//!
//! A request flows through three stages, each of which can fail on its own terms:
//!
//! 1. [`build_command`] validates the key and parameters against the metric table and
//!    produces the PowerShell command text ([`BuildError`]).
//! 2. An [`Executor`](crate::exec::Executor) runs the command and returns its combined
//!    output.
//! 3. [`normalize`] maps that output onto the metric's expected shape
//!    ([`NormalizeError`]).
//!
//! The [`Exporter`] strings the stages together and wraps any failure into an
//! [`ExportError`] carrying the metric key and scope identifier.

mod command;
mod error;
mod exporter;
mod normalize;
mod value;

pub use command::{BuiltCommand, build_command};
pub use error::{BuildError, ErrorKind, ExportError, NormalizeError};
pub use exporter::Exporter;
pub use normalize::{NormalizeOptions, normalize};
pub use value::NormalizedValue;
