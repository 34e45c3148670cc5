use crate::{Environment, EnvironmentConfig};
use axum::{extract::State, Json};
use tracing::instrument;

/// The record in the shape the web client reads at startup.
#[instrument(skip(environment))]
pub async fn environment(State(environment): State<Environment>) -> Json<EnvironmentConfig> {
    Json(environment.get().clone())
}
