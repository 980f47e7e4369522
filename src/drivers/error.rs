use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to launch sampler `{command}`: {source}")]
    SamplerLaunch {
        command: String,
        source: std::io::Error,
    },
    #[error("sampler stdout was not captured")]
    SamplerIo,
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("failed to write summary to {path}: {source}")]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for MonitorError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        MonitorError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for MonitorError {
    fn from(value: image::ImageError) -> Self {
        MonitorError::Plot(value.to_string())
    }
}
