//! Helpers shared by command tests.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use secrecy::SecretString;

use stitchhouse_api::ClientConfig;

use super::App;

/// An [`App`] whose backend refuses every connection and whose session file
/// does not exist. `token` stands in for `STITCHHOUSE_API_TOKEN`.
pub(crate) async fn unreachable_app(name: &str, token: Option<&str>) -> App {
    let mut config = ClientConfig::new("http://127.0.0.1:1/".parse().unwrap());
    config.timeout = Duration::from_secs(5);
    config.api_token = token.map(|t| SecretString::from(t.to_string()));
    config.session_file = Some(std::env::temp_dir().join(format!(
        "stitch-cli-{name}-{}.json",
        std::process::id()
    )));
    App::init(config).await.unwrap()
}
