use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading the environment.
///
/// None of these are recoverable: the process should refuse to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required variable `{var}`")]
    Missing { var: String },

    #[error("variable `{var}` must not be empty")]
    Empty { var: String },

    #[error("variable `{var}` is not a valid absolute URL: {value:?}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error(
        "variable `{var}` must be an http(s) URL with a host and no query, fragment or surrounding whitespace, got {value:?}"
    )]
    UnsupportedUrl { var: &'static str, value: String },

    #[error("variable `{var}` must be a bare tenant name like `acme.eu`, got {value:?}")]
    InvalidDomainPrefix { var: &'static str, value: String },

    #[error("malformed value in `{prefix}*` variables: {message}")]
    Malformed { prefix: &'static str, message: String },

    #[error("failed reading env file {}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

impl ConfigError {
    /// Maps an `envy` failure for the settings read under `prefix`.
    pub(crate) fn from_envy(prefix: &'static str, err: envy::Error) -> Self {
        match err {
            envy::Error::MissingValue(field) => ConfigError::Missing {
                var: format!("{}{}", prefix, field.to_uppercase()),
            },
            envy::Error::Custom(message) => ConfigError::Malformed { prefix, message },
        }
    }
}
