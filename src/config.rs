//! Startup configuration, read once from JSON.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use log::info;
use serde::{Deserialize, Serialize};
use crate::drivers::MonitorError;
/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PKGWATT_CONFIG";
/// Picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "pkgwatt.json";
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Upper clamp for readings and the fixed y axis of the live and summary charts.
    /// Raise it if the CPU's TDP is above 200 W.
    pub max_metric: f64,
    pub smooth_window: usize,
    /// Samples kept in the live view.
    pub history_len: usize,
    pub update_interval_ms: u64,
    pub output_path: PathBuf,
    /// turbostat column to sample.
    pub metric: String,
    pub sample_interval_secs: u32,
    pub use_sudo: bool,
    pub auto_install: bool,
}
impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            max_metric: 200.0,
            smooth_window: 5,
            history_len: 100,
            update_interval_ms: 100,
            output_path: PathBuf::from("pkgwatt.png"),
            metric: "PkgWatt".to_owned(),
            sample_interval_secs: 1,
            use_sudo: true,
            auto_install: true,
        }
    }
}
impl MonitorConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
    pub fn validate(&self) -> Result<(), MonitorError> {
        if !self.max_metric.is_finite() || self.max_metric <= 0.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "max_metric must be a positive number, got {}",
                self.max_metric
            )));
        }
        if self.smooth_window == 0 {
            return Err(MonitorError::InvalidConfig(
                "smooth_window must be at least 1".into(),
            ));
        }
        if self.history_len == 0 {
            return Err(MonitorError::InvalidConfig(
                "history_len must be at least 1".into(),
            ));
        }
        if self.update_interval_ms == 0 {
            return Err(MonitorError::InvalidConfig(
                "update_interval_ms must be at least 1".into(),
            ));
        }
        if self.sample_interval_secs == 0 {
            return Err(MonitorError::InvalidConfig(
                "sample_interval_secs must be at least 1".into(),
            ));
        }
        if self.metric.trim().is_empty() {
            return Err(MonitorError::InvalidConfig("metric cannot be empty".into()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(MonitorError::InvalidConfig(
                "output_path cannot be empty".into(),
            ));
        }
        Ok(())
    }
}
/// Load and validate a config file. Missing fields take their defaults.
pub fn load_config_from_file(path: &Path) -> Result<MonitorConfig, MonitorError> {
    let content = fs::read_to_string(path).map_err(|source| MonitorError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config: MonitorConfig =
        serde_json::from_str(&content).map_err(|source| MonitorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
/// `$PKGWATT_CONFIG` if set, else `./pkgwatt.json` if it exists, else defaults.
pub fn load_config() -> Result<MonitorConfig, MonitorError> {
    let explicit = env::var_os(CONFIG_ENV).map(PathBuf::from);
    resolve_config(explicit, Path::new(DEFAULT_CONFIG_FILE))
}
fn resolve_config(
    explicit: Option<PathBuf>,
    fallback: &Path,
) -> Result<MonitorConfig, MonitorError> {
    if let Some(path) = explicit {
        info!("loading config from {}", path.display());
        return load_config_from_file(&path);
    }
    if fallback.is_file() {
        info!("loading config from {}", fallback.display());
        return load_config_from_file(fallback);
    }
    info!("no config file found, using defaults");
    Ok(MonitorConfig::default())
}
