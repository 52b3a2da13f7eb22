//! Best-effort client IP lookup.
//!
//! Calls a public IP-echo service (`GET https://api.ipify.org?format=json`,
//! answering `{"ip": "..."}`). Any failure degrades to [`FALLBACK_IP`]; the
//! lookup never aborts a submission.

use std::net::IpAddr;

use serde::Deserialize;

use crate::error::IpLookupError;

/// Default IP-echo endpoint.
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

/// Placeholder used whenever the lookup fails.
pub const FALLBACK_IP: &str = "127.0.0.1";

#[derive(Debug, Deserialize)]
struct IpEcho {
    ip: Option<String>,
}

/// Client for the IP-echo service.
///
/// Shares the connection pool of the payment client but never sends
/// processor credentials.
#[derive(Debug, Clone)]
pub struct IpLookupClient {
    http: reqwest::Client,
    url: String,
}

impl IpLookupClient {
    pub(crate) fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    /// A lookup client with its own connection pool, for use without a
    /// [`PaymentClient`](crate::PaymentClient).
    pub fn build(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::new(http, url.into()))
    }

    /// The endpoint queried.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The caller's public IP, or [`FALLBACK_IP`] if it cannot be determined.
    pub async fn client_ip(&self) -> String {
        match self.lookup().await {
            Ok(ip) => ip,
            Err(e) => {
                tracing::warn!(
                    url = %self.url,
                    "could not fetch client IP, using {FALLBACK_IP}: {e}"
                );
                FALLBACK_IP.to_string()
            }
        }
    }

    /// One lookup attempt, with the failure reason kept.
    pub async fn lookup(&self) -> Result<String, IpLookupError> {
        let resp = self.http.get(&self.url).send().await?;

        if !resp.status().is_success() {
            return Err(IpLookupError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        let echo: IpEcho =
            serde_json::from_str(&body).map_err(|e| IpLookupError::Malformed(e.to_string()))?;
        let ip = echo
            .ip
            .ok_or_else(|| IpLookupError::Malformed("missing \"ip\"".to_string()))?;
        let ip = ip.trim();
        ip.parse::<IpAddr>()
            .map_err(|_| IpLookupError::Malformed(format!("not an IP address: {ip:?}")))?;

        tracing::debug!(%ip, "resolved client IP");
        Ok(ip.to_string())
    }
}
