pub mod app_config;
pub mod config;
pub mod hotels;
pub mod stay;

pub use app_config::{AppConfig, BackoffKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use hotels::{load_hotels, parse_hotels, Hotel, HotelPrice, HotelsFile, RoomOffer};
pub use stay::{QuoteRequest, StayParams};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read hotels file at {path}: {source}")]
    HotelsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hotels file: {0}")]
    HotelsFileParse(#[from] serde_yaml::Error),

    #[error("hotels validation error: {0}")]
    Validation(String),
}
