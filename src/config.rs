//! Transport configuration for rreq
//!
//! Request builders never decide timeouts, redirects, proxies or TLS
//! policy. Those belong to the shared `reqwest::Client`, which this module
//! knows how to build.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::{Result, RreqError};

/// Proxy configuration
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Settings for the shared HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub follow_redirects: bool,
    pub max_redirects: u32,
    pub proxy: Option<ProxyConfig>,
    pub verify_certs: bool,
    /// Identifying header added by the client to every request that does
    /// not set its own. `None` sends nothing.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(30),
            follow_redirects: false,
            max_redirects: 50,
            proxy: None,
            verify_certs: true,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Build the shared client described by this configuration
    pub fn build_client(&self) -> Result<Client> {
        let mut builder = ClientBuilder::new()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .redirect(if self.follow_redirects {
                reqwest::redirect::Policy::limited(self.max_redirects as usize)
            } else {
                reqwest::redirect::Policy::none()
            });

        if let Some(proxy_config) = &self.proxy {
            let proxy = reqwest::Proxy::all(&proxy_config.url).map_err(|e| {
                RreqError::InvalidRequest(format!("Invalid proxy '{}': {}", proxy_config.url, e))
            })?;

            let proxy = if let (Some(username), Some(password)) =
                (&proxy_config.username, &proxy_config.password)
            {
                proxy.basic_auth(username, password)
            } else {
                proxy
            };

            builder = builder.proxy(proxy);
        }

        if !self.verify_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder.build().map_err(RreqError::Http)
    }
}
