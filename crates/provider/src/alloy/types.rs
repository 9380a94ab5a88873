// This file is part of Minter.
//
// Minter is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Minter is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Minter.
// If not, see https://www.gnu.org/licenses/.

//! JSON-RPC wire formats for bundler and paymaster requests.

use alloy_primitives::{Address, Bytes, U128, U256};
use minter_types::{GasFees, SponsorshipData, UserOperation};
use serde::{Deserialize, Serialize};

/// User operation as sent over `eth_sendUserOperation` and paymaster methods
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcUserOperation {
    sender: Address,
    nonce: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    factory: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    factory_data: Option<Bytes>,
    call_data: Bytes,
    call_gas_limit: U128,
    verification_gas_limit: U128,
    pre_verification_gas: U128,
    max_fee_per_gas: U128,
    max_priority_fee_per_gas: U128,
    #[serde(skip_serializing_if = "Option::is_none")]
    paymaster: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paymaster_verification_gas_limit: Option<U128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paymaster_post_op_gas_limit: Option<U128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paymaster_data: Option<Bytes>,
    signature: Bytes,
}

impl From<&UserOperation> for RpcUserOperation {
    fn from(uo: &UserOperation) -> Self {
        let sponsored = uo.paymaster.is_some();
        RpcUserOperation {
            sender: uo.sender,
            nonce: uo.nonce,
            factory: uo.factory,
            factory_data: uo.factory.map(|_| uo.factory_data.clone()),
            call_data: uo.call_data.clone(),
            call_gas_limit: U128::from(uo.call_gas_limit),
            verification_gas_limit: U128::from(uo.verification_gas_limit),
            pre_verification_gas: U128::from(uo.pre_verification_gas),
            max_fee_per_gas: U128::from(uo.max_fee_per_gas),
            max_priority_fee_per_gas: U128::from(uo.max_priority_fee_per_gas),
            paymaster: uo.paymaster,
            paymaster_verification_gas_limit: sponsored
                .then(|| U128::from(uo.paymaster_verification_gas_limit)),
            paymaster_post_op_gas_limit: sponsored
                .then(|| U128::from(uo.paymaster_post_op_gas_limit)),
            paymaster_data: sponsored.then(|| uo.paymaster_data.clone()),
            signature: uo.signature.clone(),
        }
    }
}

/// Parameters of `zd_sponsorUserOperation`
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcSponsorshipRequest {
    pub(crate) chain_id: u64,
    pub(crate) user_op: RpcUserOperation,
    pub(crate) entry_point_address: Address,
    pub(crate) should_override_fee: bool,
    pub(crate) should_consume: bool,
}

/// Result of `zd_sponsorUserOperation` for entry point v0.7
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcSponsorship {
    paymaster: Address,
    paymaster_data: Bytes,
    paymaster_verification_gas_limit: U128,
    paymaster_post_op_gas_limit: U128,
    call_gas_limit: U128,
    verification_gas_limit: U128,
    pre_verification_gas: U128,
    #[serde(default)]
    max_fee_per_gas: Option<U128>,
    #[serde(default)]
    max_priority_fee_per_gas: Option<U128>,
}

impl From<RpcSponsorship> for SponsorshipData {
    fn from(s: RpcSponsorship) -> Self {
        let gas_fees = match (s.max_fee_per_gas, s.max_priority_fee_per_gas) {
            (Some(max_fee), Some(priority_fee)) => Some(GasFees {
                max_fee_per_gas: max_fee.to(),
                max_priority_fee_per_gas: priority_fee.to(),
            }),
            _ => None,
        };
        SponsorshipData {
            paymaster: s.paymaster,
            paymaster_data: s.paymaster_data,
            paymaster_verification_gas_limit: s.paymaster_verification_gas_limit.to(),
            paymaster_post_op_gas_limit: s.paymaster_post_op_gas_limit.to(),
            call_gas_limit: s.call_gas_limit.to(),
            verification_gas_limit: s.verification_gas_limit.to(),
            pre_verification_gas: s.pre_verification_gas.to(),
            gas_fees,
        }
    }
}
