//! Source verification of the deployed contract against a block explorer

use std::process::Stdio;

use alloy::primitives::Address;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::{
    constants::{FORGE_COMMAND, VERIFY_CONTRACT_COMMAND},
    errors::DeployError,
};

/// A request to verify a deployed contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationRequest {
    /// The address the contract was deployed to
    pub address: Address,
    /// The name of the deployed contract
    pub contract_name: String,
}

/// A service that verifies deployed contract sources
#[async_trait]
pub trait Verifier: Send + Sync {
    /// Submit the contract at `request.address` for verification
    async fn verify(&self, request: &VerificationRequest) -> Result<(), DeployError>;
}

/// Verifies contracts by invoking `forge verify-contract`.
///
/// Assumes that `forge` is locally available and run from the project root.
#[derive(Clone, Debug)]
pub struct ForgeVerifier {
    /// The chain the contract was deployed to
    chain_id: u64,
    /// The explorer API key
    etherscan_api_key: Option<String>,
    /// A custom explorer verification endpoint
    verifier_url: Option<String>,
}

impl ForgeVerifier {
    /// Create a verifier for the given chain
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id, etherscan_api_key: None, verifier_url: None }
    }

    /// Authenticate with the explorer using the given API key
    pub fn with_etherscan_api_key(mut self, key: Option<String>) -> Self {
        self.etherscan_api_key = key;
        self
    }

    /// Submit to a custom verification endpoint
    pub fn with_verifier_url(mut self, url: Option<String>) -> Self {
        self.verifier_url = url;
        self
    }

    /// The arguments passed to `forge` for the given request
    pub fn args(&self, request: &VerificationRequest) -> Vec<String> {
        let mut args = vec![
            VERIFY_CONTRACT_COMMAND.to_string(),
            format!("{:#x}", request.address),
            request.contract_name.clone(),
            "--chain".to_string(),
            self.chain_id.to_string(),
            // Poll the explorer until the verification settles
            "--watch".to_string(),
        ];

        if let Some(key) = &self.etherscan_api_key {
            args.push("--etherscan-api-key".to_string());
            args.push(key.clone());
        }
        if let Some(url) = &self.verifier_url {
            args.push("--verifier-url".to_string());
            args.push(url.clone());
        }

        args
    }
}

#[async_trait]
impl Verifier for ForgeVerifier {
    async fn verify(&self, request: &VerificationRequest) -> Result<(), DeployError> {
        info!(address = %request.address, chain_id = self.chain_id, "requesting verification");

        let status = Command::new(FORGE_COMMAND)
            .args(self.args(request))
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| DeployError::Verification(e.to_string()))?;

        if !status.success() {
            return Err(DeployError::Verification(format!(
                "{FORGE_COMMAND} {VERIFY_CONTRACT_COMMAND} failed with status: {status}"
            )));
        }

        Ok(())
    }
}
