//! Routes of the environment host, driven through the router directly.

use axum::{
    body::Body,
    http::{header::LOCATION, Request, StatusCode},
};
use coffee_shop_env::{server::router, Environment};
use serde_json::json;
use std::error::Error;
use tower::ServiceExt;

fn environment() -> Environment {
    Environment::from_vars([
        ("APP_PRODUCTION", "false"),
        ("APP_API_SERVER_URL", "http://127.0.0.1:5000"),
        ("AUTH0_DOMAIN_PREFIX", "erigre.eu"),
        ("AUTH0_AUDIENCE", "coffee"),
        ("AUTH0_CLIENT_ID", "z1ql1gxKPCxwLMIrEftPSRJmr1Vk6AY1"),
        ("AUTH0_CALLBACK_URL", "http://localhost:8100"),
    ])
    .unwrap()
}

#[tokio::test]
async fn serves_environment_as_json() -> Result<(), Box<dyn Error>> {
    let app = router(environment(), "static");
    let request = Request::builder()
        .uri("/environment.json")
        .body(Body::empty())?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = hyper::body::to_bytes(response.into_body()).await?;
    let value: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(
        value,
        json!({
            "production": false,
            "apiServerUrl": "http://127.0.0.1:5000",
            "auth": {
                "domainPrefix": "erigre.eu",
                "audience": "coffee",
                "clientId": "z1ql1gxKPCxwLMIrEftPSRJmr1Vk6AY1",
                "callbackUrl": "http://localhost:8100"
            }
        })
    );

    Ok(())
}

#[tokio::test]
async fn login_redirects_to_tenant() -> Result<(), Box<dyn Error>> {
    let app = router(environment(), "static");
    let request = Request::builder()
        .uri("/login?callback_path=%2Ftabs%2Fuser-page")
        .body(Body::empty())?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(LOCATION)
        .ok_or("no location header")?
        .to_str()?;
    let expected = environment().get().auth().login_url("/tabs/user-page")?;
    assert_eq!(location, expected.as_str());
    assert!(location.starts_with("https://erigre.eu.auth0.com/authorize?"));

    Ok(())
}

#[tokio::test]
async fn logout_redirects_to_tenant() -> Result<(), Box<dyn Error>> {
    let app = router(environment(), "static");
    let request = Request::builder().uri("/logout").body(Body::empty())?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(LOCATION)
        .ok_or("no location header")?
        .to_str()?;
    assert!(location.starts_with("https://erigre.eu.auth0.com/v2/logout?returnTo="));

    Ok(())
}
