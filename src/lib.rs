pub mod auth;
pub mod environment;
pub mod error;
pub mod handler;
pub mod server;

pub use environment::{AbsoluteUrl, AuthConfig, Environment, EnvironmentConfig};
pub use error::ConfigError;
