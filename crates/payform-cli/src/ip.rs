//! # IP Subcommand
//!
//! Resolves the client IP exactly as a submission would, including the
//! `127.0.0.1` fallback.

use anyhow::{Context, Result};
use clap::Args;
use payform_client::IpLookupClient;

/// Arguments for the `payform ip` subcommand.
#[derive(Args, Debug)]
pub struct IpArgs {
    /// IP-echo endpoint answering `{"ip": "..."}`.
    #[arg(long, default_value = payform_client::DEFAULT_IP_LOOKUP_URL)]
    pub lookup_url: String,

    /// Fail instead of printing the fallback address.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the ip subcommand.
pub async fn run_ip(args: &IpArgs) -> Result<u8> {
    let client =
        IpLookupClient::build(args.lookup_url.as_str()).context("failed to build HTTP client")?;

    if args.strict {
        let ip = client
            .lookup()
            .await
            .with_context(|| format!("IP lookup against {} failed", client.url()))?;
        println!("{ip}");
    } else {
        println!("{}", client.client_ip().await);
    }
    Ok(0)
}
