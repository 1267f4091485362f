#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for dhcp-scope-metrics
//!
//! Answers monitoring-host queries about Windows DHCP scopes by building PowerShell
//! commands, running them, and normalizing their JSON or plain-text output.
//!
//! # Module Organization
//!
//! - [`metrics`]: The metric table and item key parsing
//! - [`query`]: Command building, output normalization, and the exporter
//! - [`exec`]: Running commands through PowerShell
//! - [`commands`]: Command-line interface and configuration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod exec;
pub mod metrics;
pub mod query;

pub use crate::commands::{Host, export_items, run};
