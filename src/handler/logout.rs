use crate::{server::InternalError, Environment};
use axum::{extract::State, response::Redirect};
use tracing::instrument;

#[instrument(skip(environment))]
pub async fn logout(State(environment): State<Environment>) -> Result<Redirect, InternalError> {
    let logout_url = environment.get().auth().logout_url()?;
    Ok(Redirect::to(logout_url.as_ref()))
}
