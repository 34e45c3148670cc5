use crate::{environment::collect_vars, handler, ConfigError, Environment};
use axum::{
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::routing::SpaRouter;
use serde::Deserialize;
use std::{net::SocketAddr, time::Duration};
use tower_http::trace::TraceLayer;
use tracing::Span;

pub const SERVER_PREFIX: &str = "SERVER_";

/// Where the environment host listens and which client bundle it serves.
///
/// Read from `SERVER_*` variables in the same variable set as the
/// environment record, so an env file can carry both.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_static_dir() -> String {
    "static".to_owned()
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        envy::prefixed(SERVER_PREFIX)
            .from_iter::<_, Self>(collect_vars(vars))
            .map_err(|err| ConfigError::from_envy(SERVER_PREFIX, err))
    }
}

pub fn router(environment: Environment, static_dir: &str) -> Router {
    Router::new()
        .route("/environment.json", get(handler::environment))
        .route("/login", get(handler::login))
        .route("/logout", get(handler::logout))
        .with_state(environment)
        .merge(SpaRouter::new("/public", static_dir))
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<_>, _span: &Span| {
                    tracing::info!("{} {}", request.method(), request.uri());
                })
                .on_response(|response: &Response, latency: Duration, _span: &Span| {
                    tracing::info!("{} in {:?}", response.status(), latency);
                }),
        )
}

pub async fn start_server(environment: Environment, settings: ServerSettings) -> anyhow::Result<()> {
    let app = router(environment, &settings.static_dir);

    tracing::debug!("listening on {}", settings.listen_addr);
    axum::Server::bind(&settings.listen_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

/// Any handler failure; reported as a bare 500.
#[derive(Debug)]
pub struct InternalError(anyhow::Error);

impl<E> From<E> for InternalError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for InternalError {
    fn into_response(self) -> Response {
        tracing::error!("{:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
