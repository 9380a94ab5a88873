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

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;
use minter_contracts::entry_point::PackedUserOperation;

use crate::GasFees;

/// User operation for entry point v0.7
///
/// Offchain (unpacked) version, as sent over the bundler RPC. Must be packed
/// before hashing or sending onchain.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserOperation {
    /// Sender
    pub sender: Address,
    /// Semi-abstracted nonce, upper 192 bits are the key
    pub nonce: U256,
    /// Factory, set only when the sender is not yet deployed
    pub factory: Option<Address>,
    /// Factory data
    pub factory_data: Bytes,
    /// Call data
    pub call_data: Bytes,
    /// Call gas limit
    pub call_gas_limit: u128,
    /// Verification gas limit
    pub verification_gas_limit: u128,
    /// Pre verification gas
    pub pre_verification_gas: u128,
    /// Max priority fee per gas
    pub max_priority_fee_per_gas: u128,
    /// Max fee per gas
    pub max_fee_per_gas: u128,
    /// Paymaster
    pub paymaster: Option<Address>,
    /// Paymaster verification gas limit
    pub paymaster_verification_gas_limit: u128,
    /// Paymaster post-op gas limit
    pub paymaster_post_op_gas_limit: u128,
    /// Paymaster data
    pub paymaster_data: Bytes,
    /// Signature
    pub signature: Bytes,
}

impl UserOperation {
    /// Hash of the operation as computed by the entry point, excludes the signature
    pub fn hash(&self, entry_point: Address, chain_id: u64) -> B256 {
        let packed = self.pack();
        let encoded = (
            packed.sender,
            packed.nonce,
            keccak256(&packed.initCode),
            keccak256(&packed.callData),
            packed.accountGasLimits,
            packed.preVerificationGas,
            packed.gasFees,
            keccak256(&packed.paymasterAndData),
        )
            .abi_encode_params();

        keccak256((keccak256(encoded), entry_point, U256::from(chain_id)).abi_encode_params())
    }

    /// Pack into the onchain representation
    pub fn pack(&self) -> PackedUserOperation {
        PackedUserOperation {
            sender: self.sender,
            nonce: self.nonce,
            initCode: self.init_code(),
            callData: self.call_data.clone(),
            accountGasLimits: concat_128(self.verification_gas_limit, self.call_gas_limit),
            preVerificationGas: U256::from(self.pre_verification_gas),
            gasFees: concat_128(self.max_priority_fee_per_gas, self.max_fee_per_gas),
            paymasterAndData: self.paymaster_and_data(),
            signature: self.signature.clone(),
        }
    }

    /// `factory | factory_data`, empty when the sender is deployed
    pub fn init_code(&self) -> Bytes {
        match self.factory {
            Some(factory) => {
                let mut init_code = factory.to_vec();
                init_code.extend_from_slice(&self.factory_data);
                init_code.into()
            }
            None => Bytes::new(),
        }
    }

    /// `paymaster | verification gas | post-op gas | paymaster_data`, empty without a paymaster
    pub fn paymaster_and_data(&self) -> Bytes {
        match self.paymaster {
            Some(paymaster) => {
                let mut data = paymaster.to_vec();
                data.extend_from_slice(&self.paymaster_verification_gas_limit.to_be_bytes());
                data.extend_from_slice(&self.paymaster_post_op_gas_limit.to_be_bytes());
                data.extend_from_slice(&self.paymaster_data);
                data.into()
            }
            None => Bytes::new(),
        }
    }

    /// Set the fee fields
    pub fn set_gas_fees(&mut self, fees: GasFees) {
        self.max_fee_per_gas = fees.max_fee_per_gas;
        self.max_priority_fee_per_gas = fees.max_priority_fee_per_gas;
    }
}

fn concat_128(high: u128, low: u128) -> B256 {
    let mut out = [0_u8; 32];
    out[..16].copy_from_slice(&high.to_be_bytes());
    out[16..].copy_from_slice(&low.to_be_bytes());
    B256::from(out)
}
