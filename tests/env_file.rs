//! Loading from a dotenv file selected per build target.

use coffee_shop_env::{
    environment::vars_from_file, server::ServerSettings, ConfigError, Environment,
};
use std::net::SocketAddr;
use std::io::Write;

#[test]
fn loads_values_from_env_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "# production build\n\
         APP_PRODUCTION=true\n\
         APP_API_SERVER_URL=https://api.coffee.example\n\
         AUTH0_DOMAIN_PREFIX=erigre.eu\n\
         AUTH0_AUDIENCE=coffee\n\
         AUTH0_CLIENT_ID=z1ql1gxKPCxwLMIrEftPSRJmr1Vk6AY1\n\
         AUTH0_CALLBACK_URL=https://coffee.example"
    )
    .unwrap();

    let environment = Environment::load_from_file(file.path()).unwrap();
    let config = environment.get();

    assert!(config.production());
    assert_eq!(config.api_server_url().as_str(), "https://api.coffee.example");
    assert_eq!(config.auth().callback_url().as_str(), "https://coffee.example");
}

#[test]
fn missing_env_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Environment::load_from_file(dir.path().join(".env.production")).unwrap_err();

    assert!(matches!(err, ConfigError::EnvFile { .. }));
}

#[test]
fn server_settings_come_from_the_same_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "APP_API_SERVER_URL=http://127.0.0.1:5000\n\
         AUTH0_DOMAIN_PREFIX=erigre.eu\n\
         AUTH0_AUDIENCE=coffee\n\
         AUTH0_CLIENT_ID=z1ql1gxKPCxwLMIrEftPSRJmr1Vk6AY1\n\
         AUTH0_CALLBACK_URL=http://localhost:8100\n\
         SERVER_LISTEN_ADDR=0.0.0.0:8100\n\
         SERVER_STATIC_DIR=www"
    )
    .unwrap();

    let vars = vars_from_file(file.path()).unwrap();
    let environment = Environment::from_vars(vars.clone()).unwrap();
    let settings = ServerSettings::from_vars(vars).unwrap();

    assert_eq!(environment.get().auth().audience(), "coffee");
    assert_eq!(settings.listen_addr, SocketAddr::from(([0, 0, 0, 0], 8100)));
    assert_eq!(settings.static_dir, "www");
}
