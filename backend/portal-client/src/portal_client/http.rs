use crate::config::PortalConfig;
use crate::error::PortalClientError;

use log::warn;
use reqwest::Client;
use reqwest::redirect::Policy;

/// Build the HTTP client dedicated to the reporting portal.
///
/// Certificate checks are relaxed on this client only, and only when the
/// config says so. Redirects are not followed so bootstrap cookies come from
/// the bootstrap response itself.
pub fn build_http_client(config: &PortalConfig) -> Result<Client, PortalClientError> {
    let mut builder = Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.as_str())
        .redirect(Policy::none());

    if config.accept_invalid_certs {
        warn!(
            "TLS certificate validation disabled for {} (accept_invalid_certs = true)",
            config.base_url
        );
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder.build()?)
}
