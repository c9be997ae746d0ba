//! Fee snapshots and deployment cost estimates

use alloy::primitives::{
    utils::{format_ether, format_units},
    U256,
};

use crate::constants::{BASE_FEE_MULTIPLIER, FEE_DISPLAY_UNIT};

/// A point-in-time read of the network's fee parameters, all in wei
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeData {
    /// The legacy gas price
    pub gas_price: Option<u128>,
    /// The EIP-1559 max fee per gas
    pub max_fee_per_gas: Option<u128>,
    /// The EIP-1559 max priority fee per gas
    pub max_priority_fee_per_gas: Option<u128>,
}

/// The estimated cost of the deployment transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostEstimate {
    /// Cost under EIP-1559 fee semantics
    Eip1559 {
        /// The estimated gas units
        gas: u64,
        /// The max fee per gas, in wei
        max_fee_per_gas: u128,
        /// The max priority fee per gas, in wei
        max_priority_fee_per_gas: u128,
        /// `gas * max_fee_per_gas`, in wei
        total_cost: U256,
    },
    /// Cost under legacy gas price semantics
    Legacy {
        /// The estimated gas units
        gas: u64,
        /// The gas price, in wei
        gas_price: u128,
        /// `gas * gas_price`, in wei
        total_cost: U256,
    },
    /// The node reported no usable fee data
    Unavailable {
        /// The estimated gas units
        gas: u64,
    },
}

impl CostEstimate {
    /// Price the given gas estimate, preferring EIP-1559 semantics when both
    /// of its fee components are present
    pub fn new(gas: u64, fees: &FeeData) -> Self {
        match (fees.max_fee_per_gas, fees.max_priority_fee_per_gas, fees.gas_price) {
            (Some(max_fee_per_gas), Some(max_priority_fee_per_gas), _) => CostEstimate::Eip1559 {
                gas,
                max_fee_per_gas,
                max_priority_fee_per_gas,
                total_cost: U256::from(gas) * U256::from(max_fee_per_gas),
            },
            (_, _, Some(gas_price)) => CostEstimate::Legacy {
                gas,
                gas_price,
                total_cost: U256::from(gas) * U256::from(gas_price),
            },
            _ => CostEstimate::Unavailable { gas },
        }
    }

    /// The estimated gas units
    pub fn gas(&self) -> u64 {
        match self {
            CostEstimate::Eip1559 { gas, .. }
            | CostEstimate::Legacy { gas, .. }
            | CostEstimate::Unavailable { gas } => *gas,
        }
    }

    /// The total estimated cost in wei, if fee data was available
    pub fn total_cost(&self) -> Option<U256> {
        match self {
            CostEstimate::Eip1559 { total_cost, .. } | CostEstimate::Legacy { total_cost, .. } => {
                Some(*total_cost)
            }
            CostEstimate::Unavailable { .. } => None,
        }
    }
}

/// Derive the EIP-1559 max fee per gas from the latest base fee and the
/// suggested priority fee
pub fn derive_max_fee_per_gas(base_fee_per_gas: u64, max_priority_fee_per_gas: u128) -> u128 {
    u128::from(base_fee_per_gas)
        .saturating_mul(BASE_FEE_MULTIPLIER)
        .saturating_add(max_priority_fee_per_gas)
}

/// Format a wei amount in ether
pub fn format_eth(wei: U256) -> String {
    format_ether(wei)
}

/// Format a per-gas fee, given in wei, in gwei
pub fn format_gwei(wei: u128) -> String {
    // Formatting into a fixed, valid unit cannot fail
    format_units(U256::from(wei), FEE_DISPLAY_UNIT).unwrap_or_else(|_| format!("{wei} wei"))
}
