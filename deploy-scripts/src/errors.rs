//! Definitions of errors that can occur during deployment of the contract

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur while deploying and verifying the contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeployError {
    /// Error initializing the RPC client or signer
    ClientInitialization(String),
    /// Error querying the deployer account
    AccountQuery(String),
    /// Error reading a compilation artifact from disk
    ReadArtifact(String),
    /// Error parsing a compilation artifact
    ArtifactParsing(String),
    /// Error estimating gas for the deployment transaction
    GasEstimation(String),
    /// Error fetching network fee data
    FeeQuery(String),
    /// Error deploying the contract
    ContractDeployment(String),
    /// Error verifying the contract with the block explorer
    Verification(String),
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            DeployError::AccountQuery(s) => write!(f, "error querying deployer account: {}", s),
            DeployError::ReadArtifact(s) => write!(f, "error reading artifact: {}", s),
            DeployError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            DeployError::GasEstimation(s) => write!(f, "error estimating gas: {}", s),
            DeployError::FeeQuery(s) => write!(f, "error fetching fee data: {}", s),
            DeployError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            DeployError::Verification(s) => write!(f, "error verifying contract: {}", s),
        }
    }
}

impl Error for DeployError {}
