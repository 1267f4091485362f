use crate::Result;
use crate::exec::PowerShell;
use crate::query::NormalizeOptions;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File name looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "dhcp-metrics.toml";

const LOG_TARGET: &str = "    config";

const MAX_TIMEOUT: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Program used to run DHCP queries
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Arguments placed before the query text
    #[serde(default = "default_shell_args")]
    pub shell_args: Vec<String>,

    /// Maximum time a single query may run before it is killed
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Parse record-array output as JSON before returning it
    #[serde(default)]
    pub validate_records: bool,
}

fn default_shell() -> String {
    crate::exec::DEFAULT_PROGRAM.to_string()
}

fn default_shell_args() -> Vec<String> {
    crate::exec::DEFAULT_ARGS.iter().map(ToString::to_string).collect()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `dhcp-metrics.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the shell is empty or the timeout is out of range
    pub fn validate(&self) -> Result<()> {
        if self.shell.trim().is_empty() {
            return Err(app_err!("shell must not be empty"));
        }

        if self.timeout.is_zero() || self.timeout > MAX_TIMEOUT {
            return Err(app_err!(
                "timeout must be greater than zero and at most {}s, got {}ms",
                MAX_TIMEOUT.as_secs(),
                self.timeout.as_millis()
            ));
        }

        Ok(())
    }

    #[must_use]
    pub fn executor(&self) -> PowerShell {
        PowerShell::new(self.shell.clone(), self.shell_args.clone(), self.timeout)
    }

    #[must_use]
    pub const fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            validate_records: self.validate_records,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
