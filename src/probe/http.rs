//! In-process status probe
//!
//! Used instead of shelling out to `curl` when the `http` probe backend is
//! configured. Redirects are not followed so 3xx answers are reported as-is,
//! the same way the `curl` probe sees them.

use crate::probe::Prober;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Builds the HTTP client used for status probes
///
/// # Arguments
///
/// * `user_agent` - Client identity string
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Probes with a `reqwest` GET whose body is never read
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Prober for HttpProber {
    async fn status(&self, url: &str) -> Option<u16> {
        match self.client.get(url).send().await {
            Ok(response) => Some(response.status().as_u16()),
            Err(e) => {
                if e.is_timeout() {
                    tracing::debug!("Status probe for {} timed out", url);
                } else if e.is_connect() {
                    tracing::debug!("Status probe for {} could not connect", url);
                } else {
                    tracing::debug!("Status probe for {} failed: {}", url, e);
                }
                None
            }
        }
    }
}
