//! Utilities for the deploy script.

use std::{str::FromStr, time::Duration};

use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use crate::{client::RpcChainClient, errors::DeployError};

/// The log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "warn";

/// Initialize the tracing subscriber, filtered by `RUST_LOG`
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Sets up the client with which to deploy the contract.
///
/// With a private key, transactions are signed locally. Without one, the
/// node's first unlocked account is used and the node signs.
pub async fn setup_client(
    rpc_url: &str,
    priv_key: Option<&str>,
    confirmations: u64,
) -> Result<RpcChainClient, DeployError> {
    let url = Url::parse(rpc_url)
        .map_err(|e| DeployError::ClientInitialization(format!("{rpc_url}: {e}")))?;

    if let Some(priv_key) = priv_key {
        let wallet = PrivateKeySigner::from_str(priv_key)
            .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
        let signer = wallet.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(wallet))
            .connect_http(url)
            .erased();

        return Ok(RpcChainClient::new(provider, signer, confirmations));
    }

    let provider = ProviderBuilder::new().connect_http(url).erased();
    let signer = provider
        .get_accounts()
        .await
        .map_err(|e| DeployError::AccountQuery(e.to_string()))?
        .first()
        .copied()
        .ok_or_else(|| {
            DeployError::ClientInitialization(
                "node has no unlocked accounts, provide a private key".to_string(),
            )
        })?;

    Ok(RpcChainClient::new(provider, signer, confirmations))
}

/// Suspends the deployment between steps
#[async_trait]
pub trait Delay: Send + Sync {
    /// Resume after `duration` has elapsed
    async fn wait(&self, duration: Duration);
}

/// A [`Delay`] backed by the tokio timer
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
