//! The chain client used by the deploy script, and its JSON-RPC implementation

use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Address, U256},
    providers::{DynProvider, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    constants::DEFAULT_PRIORITY_FEE_WEI,
    errors::DeployError,
    fees::{derive_max_fee_per_gas, FeeData},
};

/// The chain operations the deploy script depends on
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The address of the account that signs the deployment
    async fn signer_address(&self) -> Result<Address, DeployError>;

    /// The native token balance of `address`, in wei
    async fn balance(&self, address: Address) -> Result<U256, DeployError>;

    /// Estimate the gas units consumed by `tx`
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, DeployError>;

    /// Read the current network fee parameters
    async fn fee_data(&self) -> Result<FeeData, DeployError>;

    /// Submit a contract creation transaction, wait for it to be confirmed,
    /// and return the address of the created contract
    async fn deploy(&self, tx: TransactionRequest) -> Result<Address, DeployError>;
}

/// A [`ChainClient`] backed by a JSON-RPC node
#[derive(Clone)]
pub struct RpcChainClient {
    /// The provider, with a wallet attached if a private key was given
    provider: DynProvider,
    /// The deployer account
    signer: Address,
    /// The number of confirmations to wait for the deployment transaction
    confirmations: u64,
}

impl RpcChainClient {
    /// Wrap a provider that can sign transactions on behalf of `signer`
    pub fn new(provider: DynProvider, signer: Address, confirmations: u64) -> Self {
        Self { provider, signer, confirmations }
    }

    /// The chain ID reported by the node
    pub async fn chain_id(&self) -> Result<u64, DeployError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| DeployError::ClientInitialization(e.to_string()))
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn signer_address(&self) -> Result<Address, DeployError> {
        Ok(self.signer)
    }

    async fn balance(&self, address: Address) -> Result<U256, DeployError> {
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| DeployError::AccountQuery(e.to_string()))
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<u64, DeployError> {
        self.provider
            .estimate_gas(tx.clone())
            .await
            .map_err(|e| DeployError::GasEstimation(e.to_string()))
    }

    async fn fee_data(&self) -> Result<FeeData, DeployError> {
        let gas_price = match self.provider.get_gas_price().await {
            Ok(price) => Some(price),
            Err(err) => {
                debug!(%err, "node does not report a gas price");
                None
            }
        };

        let latest = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(|e| DeployError::FeeQuery(e.to_string()))?;

        // Pre-London chains have no base fee, only the legacy price applies
        let Some(base_fee) = latest.and_then(|block| block.header.base_fee_per_gas) else {
            return Ok(FeeData { gas_price, ..Default::default() });
        };

        let max_priority_fee_per_gas = match self.provider.get_max_priority_fee_per_gas().await {
            Ok(fee) => fee,
            Err(err) => {
                debug!(%err, "node does not suggest a priority fee, using default");
                DEFAULT_PRIORITY_FEE_WEI
            }
        };

        Ok(FeeData {
            gas_price,
            max_fee_per_gas: Some(derive_max_fee_per_gas(base_fee, max_priority_fee_per_gas)),
            max_priority_fee_per_gas: Some(max_priority_fee_per_gas),
        })
    }

    async fn deploy(&self, tx: TransactionRequest) -> Result<Address, DeployError> {
        let pending_tx = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;

        let tx_hash = *pending_tx.tx_hash();
        info!(%tx_hash, "waiting for deployment tx to be mined");

        let receipt = pending_tx
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| DeployError::ContractDeployment(e.to_string()))?;
        info!(%receipt.gas_used, %tx_hash, "deployment tx mined");

        deployed_address(&receipt)
    }
}

/// The address created by a confirmed deployment transaction
fn deployed_address(receipt: &TransactionReceipt) -> Result<Address, DeployError> {
    let tx_hash = receipt.transaction_hash;
    if !receipt.status() {
        return Err(DeployError::ContractDeployment(format!(
            "deployment tx {tx_hash} reverted"
        )));
    }

    receipt.contract_address.ok_or_else(|| {
        DeployError::ContractDeployment(format!("receipt for {tx_hash} has no contract address"))
    })
}

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::address,
        providers::{mock::Asserter, ProviderBuilder},
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::constants::NUM_DEPLOY_CONFIRMATIONS;

    /// The address of the contract a successful receipt reports
    const DEPLOYED: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

    /// A client whose JSON-RPC responses are queued on `asserter`
    fn mocked_client(asserter: &Asserter) -> RpcChainClient {
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone()).erased();
        RpcChainClient::new(provider, Address::ZERO, NUM_DEPLOY_CONFIRMATIONS)
    }

    /// A latest-block response, with a base fee if one is given
    fn latest_block(base_fee: Option<&str>) -> Value {
        let zero_hash = format!("0x{}", "0".repeat(64));
        let mut block = json!({
            "hash": format!("0x{}", "1".repeat(64)),
            "parentHash": zero_hash,
            "sha3Uncles": zero_hash,
            "miner": format!("{:#x}", Address::ZERO),
            "stateRoot": zero_hash,
            "transactionsRoot": zero_hash,
            "receiptsRoot": zero_hash,
            "logsBloom": format!("0x{}", "0".repeat(512)),
            "difficulty": "0x0",
            "number": "0x10",
            "gasLimit": "0x1c9c380",
            "gasUsed": "0x0",
            "timestamp": "0x6553f100",
            "extraData": "0x",
            "mixHash": zero_hash,
            "nonce": "0x0000000000000000",
            "uncles": [],
            "transactions": [],
        });
        if let Some(base_fee) = base_fee {
            block["baseFeePerGas"] = json!(base_fee);
        }
        block
    }

    /// A deployment receipt with the given status and created address
    fn receipt(status: &str, contract_address: Option<Address>) -> TransactionReceipt {
        let receipt = json!({
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": format!("0x{}", "0".repeat(512)),
            "transactionHash": format!("0x{}", "a".repeat(64)),
            "transactionIndex": "0x0",
            "blockHash": format!("0x{}", "b".repeat(64)),
            "blockNumber": "0x11",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "from": format!("{:#x}", Address::ZERO),
            "to": null,
            "contractAddress": contract_address,
        });
        serde_json::from_value(receipt).unwrap()
    }

    #[tokio::test]
    async fn test_fee_data_eip1559() {
        let asserter = Asserter::new();
        asserter.push_success(&"0x7");
        asserter.push_success(&latest_block(Some("0xa")));
        asserter.push_success(&"0x3");

        let fees = mocked_client(&asserter).fee_data().await.unwrap();
        assert_eq!(
            fees,
            FeeData {
                gas_price: Some(7),
                max_fee_per_gas: Some(23),
                max_priority_fee_per_gas: Some(3),
            }
        );
    }

    #[tokio::test]
    async fn test_fee_data_without_base_fee_is_legacy() {
        let asserter = Asserter::new();
        asserter.push_success(&"0x7");
        asserter.push_success(&latest_block(None));

        let fees = mocked_client(&asserter).fee_data().await.unwrap();
        assert_eq!(fees, FeeData { gas_price: Some(7), ..Default::default() });
    }

    #[tokio::test]
    async fn test_priority_fee_falls_back_to_default() {
        let asserter = Asserter::new();
        asserter.push_success(&"0x7");
        asserter.push_success(&latest_block(Some("0xa")));
        asserter.push_failure_msg("method eth_maxPriorityFeePerGas not supported");

        let fees = mocked_client(&asserter).fee_data().await.unwrap();
        assert_eq!(fees.max_priority_fee_per_gas, Some(DEFAULT_PRIORITY_FEE_WEI));
        assert_eq!(fees.max_fee_per_gas, Some(20 + DEFAULT_PRIORITY_FEE_WEI));
    }

    #[tokio::test]
    async fn test_missing_gas_price_keeps_eip1559_fees() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("method eth_gasPrice not supported");
        asserter.push_success(&latest_block(Some("0xa")));
        asserter.push_success(&"0x3");

        let fees = mocked_client(&asserter).fee_data().await.unwrap();
        assert_eq!(
            fees,
            FeeData {
                gas_price: None,
                max_fee_per_gas: Some(23),
                max_priority_fee_per_gas: Some(3),
            }
        );
    }

    #[tokio::test]
    async fn test_no_gas_price_and_no_base_fee() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("method eth_gasPrice not supported");
        asserter.push_success(&latest_block(None));

        let fees = mocked_client(&asserter).fee_data().await.unwrap();
        assert_eq!(fees, FeeData::default());
    }

    #[tokio::test]
    async fn test_block_query_failure() {
        let asserter = Asserter::new();
        asserter.push_success(&"0x7");
        asserter.push_failure_msg("internal error");

        let err = mocked_client(&asserter).fee_data().await.unwrap_err();
        assert!(matches!(err, DeployError::FeeQuery(_)));
    }

    #[test]
    fn test_deployed_address() {
        let address = deployed_address(&receipt("0x1", Some(DEPLOYED))).unwrap();
        assert_eq!(address, DEPLOYED);
    }

    #[test]
    fn test_reverted_deployment() {
        let err = deployed_address(&receipt("0x0", Some(DEPLOYED))).unwrap_err();
        assert!(matches!(err, DeployError::ContractDeployment(msg) if msg.contains("reverted")));
    }

    #[test]
    fn test_receipt_without_contract_address() {
        let err = deployed_address(&receipt("0x1", None)).unwrap_err();
        let DeployError::ContractDeployment(msg) = &err else {
            panic!("unexpected error: {err}");
        };
        assert!(msg.contains("no contract address"));
    }
}
