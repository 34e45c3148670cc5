//! The environment descriptor: which API server and which Auth0 tenant the
//! web client talks to.
//!
//! Values come from prefixed environment variables, deserialized with
//! `envy` the same way for every section:
//!
//! | Variable | Field | Required |
//! |----------|-------|----------|
//! | `APP_PRODUCTION` | `production` | no (`false`) |
//! | `APP_API_SERVER_URL` | `apiServerUrl` | yes |
//! | `AUTH0_DOMAIN_PREFIX` | `auth.domainPrefix` | yes |
//! | `AUTH0_AUDIENCE` | `auth.audience` | yes |
//! | `AUTH0_CLIENT_ID` | `auth.clientId` | yes |
//! | `AUTH0_CALLBACK_URL` | `auth.callbackUrl` | yes |

use crate::ConfigError;
use serde::{Deserialize, Serialize, Serializer};
use std::{collections::HashMap, fmt, path::Path, sync::Arc};
use url::Url;

pub const APP_PREFIX: &str = "APP_";
pub const AUTH0_PREFIX: &str = "AUTH0_";

#[derive(Deserialize)]
struct AppVars {
    #[serde(default)]
    production: bool,
    api_server_url: String,
}

#[derive(Deserialize)]
struct Auth0Vars {
    domain_prefix: String,
    audience: String,
    client_id: String,
    callback_url: String,
}

/// Reads `path` as a dotenv file and appends the process environment, so
/// process variables win when both are passed on to `from_vars`.
pub fn vars_from_file(path: impl AsRef<Path>) -> Result<Vec<(String, String)>, ConfigError> {
    let path = path.as_ref();
    let env_file_error = |source| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    let mut vars = Vec::new();
    for item in dotenvy::from_path_iter(path).map_err(env_file_error)? {
        vars.push(item.map_err(env_file_error)?);
    }
    vars.extend(std::env::vars());

    Ok(vars)
}

/// Loaded once at startup and shared read-only afterwards.
///
/// Cloning only bumps a reference count, so the handle can be passed into
/// every component (and used as axum state) without a global.
#[derive(Clone, Debug)]
pub struct Environment {
    config: Arc<EnvironmentConfig>,
}

impl Environment {
    /// Reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Reads `path` as a dotenv file, then the process environment.
    ///
    /// Variables already set in the process take precedence over the file.
    /// The process environment itself is left untouched.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_vars(vars_from_file(path)?)
    }

    /// Builds the environment from explicit key/value pairs. Later pairs
    /// override earlier ones with the same key.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let config = EnvironmentConfig::from_vars(vars)?;
        tracing::debug!(
            production = config.production,
            api_server_url = %config.api_server_url,
            tenant = %config.auth.tenant_domain(),
            "environment loaded"
        );

        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn get(&self) -> &EnvironmentConfig {
        &self.config
    }
}

/// The frozen configuration record.
///
/// Fields are private and only readable through accessors, so a loaded
/// record cannot be changed:
///
/// ```compile_fail,E0616
/// # fn tamper(config: &mut coffee_shop_env::EnvironmentConfig) {
/// config.production = true;
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    production: bool,
    api_server_url: AbsoluteUrl,
    auth: AuthConfig,
}

impl EnvironmentConfig {
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = collect_vars(vars);

        let app = envy::prefixed(APP_PREFIX)
            .from_iter::<_, AppVars>(vars.clone())
            .map_err(|err| ConfigError::from_envy(APP_PREFIX, err))?;
        let auth0 = envy::prefixed(AUTH0_PREFIX)
            .from_iter::<_, Auth0Vars>(vars)
            .map_err(|err| ConfigError::from_envy(AUTH0_PREFIX, err))?;

        Ok(Self {
            production: app.production,
            api_server_url: AbsoluteUrl::parse("APP_API_SERVER_URL", app.api_server_url)?,
            auth: AuthConfig {
                domain_prefix: domain_prefix("AUTH0_DOMAIN_PREFIX", auth0.domain_prefix)?,
                audience: non_empty("AUTH0_AUDIENCE", auth0.audience)?,
                client_id: non_empty("AUTH0_CLIENT_ID", auth0.client_id)?,
                callback_url: AbsoluteUrl::parse("AUTH0_CALLBACK_URL", auth0.callback_url)?,
            },
        })
    }

    pub fn production(&self) -> bool {
        self.production
    }

    pub fn api_server_url(&self) -> &AbsoluteUrl {
        &self.api_server_url
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// Resolves an API path such as `/drinks` against the API server URL,
    /// keeping any path the base URL already has. The base never carries a
    /// query or fragment, so appending to it is safe.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}",
            self.api_server_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

/// Identity-provider settings. URL builders live in [`crate::auth`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    domain_prefix: String,
    audience: String,
    client_id: String,
    callback_url: AbsoluteUrl,
}

impl AuthConfig {
    pub fn domain_prefix(&self) -> &str {
        &self.domain_prefix
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn callback_url(&self) -> &AbsoluteUrl {
        &self.callback_url
    }
}

/// An http(s) URL that remembers the exact text it was given.
///
/// It must be usable as a base for appending paths: no surrounding
/// whitespace, no query, no fragment.
///
/// `Url` normalises its input (`http://host:5000` becomes
/// `http://host:5000/`), so the input text is kept for display and
/// serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbsoluteUrl {
    raw: String,
    parsed: Url,
}

impl AbsoluteUrl {
    fn parse(var: &'static str, value: String) -> Result<Self, ConfigError> {
        let value = non_empty(var, value)?;
        if value.trim() != value {
            return Err(ConfigError::UnsupportedUrl { var, value });
        }
        let parsed = match Url::parse(&value) {
            Ok(parsed) => parsed,
            Err(source) => {
                return Err(ConfigError::InvalidUrl { var, value, source });
            }
        };

        if !matches!(parsed.scheme(), "http" | "https")
            || !parsed.has_host()
            || parsed.query().is_some()
            || parsed.fragment().is_some()
        {
            return Err(ConfigError::UnsupportedUrl { var, value });
        }

        Ok(Self { raw: value, parsed })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.parsed
    }
}

impl fmt::Display for AbsoluteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for AbsoluteUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Later pairs override earlier ones with the same key.
pub(crate) fn collect_vars<I, K, V>(vars: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    vars.into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

fn non_empty(var: &str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Empty {
            var: var.to_owned(),
        });
    }
    Ok(value)
}

// The tenant host is `{prefix}.auth0.com`, so every label must be a valid
// hostname label.
fn domain_prefix(var: &'static str, value: String) -> Result<String, ConfigError> {
    let value = non_empty(var, value)?;
    let valid = value.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    if !valid {
        return Err(ConfigError::InvalidDomainPrefix { var, value });
    }
    Ok(value)
}
