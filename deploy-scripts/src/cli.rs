//! Definitions of CLI arguments for the deploy script

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    artifact::ContractArtifact,
    commands::{deploy_and_verify, DeploySettings, DeploymentOutcome},
    constants::{
        CONTRACT_NAME, DEFAULT_ARTIFACTS_DIR, DEFAULT_RPC_URL, NUM_DEPLOY_CONFIRMATIONS,
        VERIFY_DELAY_SECS,
    },
    errors::DeployError,
    reporter::Reporter,
    utils::{setup_client, TokioDelay},
    verify::ForgeVerifier,
};

/// Deploy the `V3PositionHelper` contract and verify it on the block explorer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Private key of the deployer. If omitted, the node's first unlocked
    /// account deploys the contract
    #[arg(long = "pkey", env = "PKEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// The contract to deploy
    #[arg(short, long, default_value = CONTRACT_NAME)]
    pub contract: String,

    /// Directory containing the compilation artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Seconds to wait after deployment before requesting verification
    #[arg(long, default_value_t = VERIFY_DELAY_SECS)]
    pub verify_delay_secs: u64,

    /// Confirmations to wait for the deployment transaction
    #[arg(long, default_value_t = NUM_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Block explorer API key used for verification
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub etherscan_api_key: Option<String>,

    /// Custom block explorer verification endpoint
    #[arg(long, env = "VERIFIER_URL")]
    pub verifier_url: Option<String>,
}

impl Cli {
    /// Load the artifact, connect to the node, and run the deployment
    pub async fn run(self, reporter: &impl Reporter) -> Result<DeploymentOutcome, DeployError> {
        let Cli {
            rpc_url,
            priv_key,
            contract,
            artifacts_dir,
            verify_delay_secs,
            confirmations,
            etherscan_api_key,
            verifier_url,
        } = self;

        let artifact = ContractArtifact::load(&artifacts_dir, &contract)?;
        let client = setup_client(&rpc_url, priv_key.as_deref(), confirmations).await?;

        let chain_id = client.chain_id().await?;
        let verifier = ForgeVerifier::new(chain_id)
            .with_etherscan_api_key(etherscan_api_key)
            .with_verifier_url(verifier_url);

        let settings = DeploySettings {
            contract_name: artifact.name,
            bytecode: artifact.bytecode,
            verify_delay: Duration::from_secs(verify_delay_secs),
        };

        deploy_and_verify(&settings, &client, &verifier, reporter, &TokioDelay).await
    }
}
