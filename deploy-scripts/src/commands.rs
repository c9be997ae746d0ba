//! Implementation of the deploy script

use std::time::Duration;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    rpc::types::TransactionRequest,
};
use tracing::info;

use crate::{
    client::ChainClient,
    constants::{GAS_ESTIMATION_FAILED_MSG, NO_FEE_DATA_MSG},
    errors::DeployError,
    fees::{format_eth, format_gwei, CostEstimate},
    reporter::Reporter,
    utils::Delay,
    verify::{VerificationRequest, Verifier},
};

/// What to deploy and how long to wait before verifying it
#[derive(Clone, Debug)]
pub struct DeploySettings {
    /// The name of the contract, used for reporting and verification
    pub contract_name: String,
    /// The creation bytecode; the constructor takes no arguments
    pub bytecode: Bytes,
    /// The pause between confirmation and the verification request
    pub verify_delay: Duration,
}

/// The result of a successful run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeploymentOutcome {
    /// The account that deployed the contract
    pub deployer: Address,
    /// The address of the deployed contract
    pub address: Address,
}

/// Deploy the contract and submit it for verification.
///
/// Cost estimation is best-effort: its failures are reported and the
/// deployment proceeds. Every other failure aborts the run. Nothing is
/// rolled back, a contract deployed before a failed verification stays
/// deployed.
pub async fn deploy_and_verify(
    settings: &DeploySettings,
    client: &impl ChainClient,
    verifier: &impl Verifier,
    reporter: &impl Reporter,
    delay: &impl Delay,
) -> Result<DeploymentOutcome, DeployError> {
    let name = &settings.contract_name;

    let deployer = client.signer_address().await?;
    reporter.info(&format!("Deployer address: {deployer}"));

    let balance = client.balance(deployer).await?;
    reporter.info(&format!("Deployer balance: {} ETH", format_eth(balance)));

    reporter.info(&format!("Preparing to deploy {name}..."));
    let deploy_tx = TransactionRequest::default()
        .with_from(deployer)
        .with_deploy_code(settings.bytecode.clone());

    match estimate_deploy_cost(client, &deploy_tx).await {
        Ok(estimate) => report_cost_estimate(reporter, &estimate),
        Err(err) => {
            reporter.warn(GAS_ESTIMATION_FAILED_MSG);
            reporter.warn(&format!("Error: {err}"));
        }
    }

    reporter.info(&format!("Deploying {name}..."));
    let address = client.deploy(deploy_tx).await?;
    reporter.info(&format!("{name} deployed to: {address}"));

    reporter.info(&format!(
        "Waiting {} seconds before verifying...",
        settings.verify_delay.as_secs()
    ));
    delay.wait(settings.verify_delay).await;

    let request = VerificationRequest { address, contract_name: name.clone() };
    verifier.verify(&request).await?;
    info!(%address, "verification submitted");

    Ok(DeploymentOutcome { deployer, address })
}

/// Estimate the gas used by the deployment, then price it with the
/// current fee data
pub async fn estimate_deploy_cost(
    client: &impl ChainClient,
    deploy_tx: &TransactionRequest,
) -> Result<CostEstimate, DeployError> {
    let gas = client.estimate_gas(deploy_tx).await?;
    let fees = client.fee_data().await?;
    Ok(CostEstimate::new(gas, &fees))
}

/// Report a cost estimate to the operator
fn report_cost_estimate(reporter: &impl Reporter, estimate: &CostEstimate) {
    reporter.info(&format!("Estimated Gas: {} units", estimate.gas()));

    match *estimate {
        CostEstimate::Eip1559 { max_fee_per_gas, max_priority_fee_per_gas, total_cost, .. } => {
            reporter.info(&format!("Estimated Cost (EIP-1559): {} ETH", format_eth(total_cost)));
            reporter.info(&format!("  ↳ Max Fee Per Gas: {} gwei", format_gwei(max_fee_per_gas)));
            reporter.info(&format!(
                "  ↳ Max Priority Fee: {} gwei",
                format_gwei(max_priority_fee_per_gas)
            ));
        }
        CostEstimate::Legacy { gas_price, total_cost, .. } => {
            reporter.info(&format!("Estimated Cost (Legacy): {} ETH", format_eth(total_cost)));
            reporter.info(&format!("  ↳ Gas Price: {} gwei", format_gwei(gas_price)));
        }
        CostEstimate::Unavailable { .. } => reporter.warn(NO_FEE_DATA_MSG),
    }
}
