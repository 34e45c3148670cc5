use crate::{server::InternalError, Environment};
use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    callback_path: String,
}

#[instrument(skip(environment))]
pub async fn login(
    State(environment): State<Environment>,
    Query(query): Query<LoginQuery>,
) -> Result<Redirect, InternalError> {
    let login_url = environment.get().auth().login_url(&query.callback_path)?;
    Ok(Redirect::to(login_url.as_ref()))
}
