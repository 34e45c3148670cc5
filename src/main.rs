use coffee_shop_env::{
    environment::vars_from_file,
    server::{start_server, ServerSettings},
    Environment,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = std::env::var_os("APP_ENV_FILE");
    if env_file.is_none() {
        dotenvy::dotenv().ok();
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coffee_shop_env=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The environment record and the server settings read the same variables.
    let loaded = match env_file {
        Some(path) => vars_from_file(path),
        None => Ok(std::env::vars().collect()),
    }
    .and_then(|vars| {
        let environment = Environment::from_vars(vars.clone())?;
        let settings = ServerSettings::from_vars(vars)?;
        Ok((environment, settings))
    });
    let (environment, settings) = loaded.map_err(|err| {
        tracing::error!("refusing to start: {}", err);
        err
    })?;

    tracing::info!(
        production = environment.get().production(),
        api_server_url = %environment.get().api_server_url(),
        "environment ready"
    );

    start_server(environment, settings).await?;

    Ok(())
}
