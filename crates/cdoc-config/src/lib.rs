pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, Labels};
pub use error::ConfigError;
