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

//! Validation modules an account can sign user operations with

use alloy_primitives::{hex, Address, Bytes, B256};
use minter_provider::EvmProvider;
use minter_types::{
    chain::ChainSpec,
    kernel::{validation_id, KernelVersion, ValidationId, ValidatorType},
};

use crate::{AccountError, AccountResult};

mod ecdsa;
pub use ecdsa::EcdsaValidator;

mod permission;
pub use permission::PermissionValidator;

/// ECDSA signature of the right length and shape for gas estimation.
/// Never valid for any key.
pub(crate) const DUMMY_ECDSA_SIGNATURE: [u8; 65] = hex!(
    "fffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c"
);

/// A validation module installed (or installable) on a Kernel account
pub trait KernelValidator: Send + Sync {
    /// Kind of module
    fn validator_type(&self) -> ValidatorType;

    /// 20 byte identifier used in nonce keys and validation ids
    fn identifier(&self) -> [u8; 20];

    /// Validation id the account stores the module under
    fn validation_id(&self) -> ValidationId {
        validation_id(self.validator_type(), self.identifier())
    }

    /// Data the module is installed with
    fn enable_data(&self) -> Bytes;

    /// Address of the key signing for this module
    fn signer_address(&self) -> Address;

    /// Placeholder signature used while estimating gas
    fn dummy_signature(&self) -> Bytes;

    /// Sign a user operation hash in the format the module verifies
    fn sign_user_operation_hash(&self, hash: &B256) -> AccountResult<Bytes>;
}

/// Check that `evm` is connected to the configured chain and that the chain's
/// entry point matches the kernel version.
pub(crate) async fn check_network<E>(
    evm: &E,
    chain_spec: &ChainSpec,
    kernel_version: KernelVersion,
) -> AccountResult<()>
where
    E: EvmProvider + ?Sized,
{
    if chain_spec.entry_point_version != kernel_version.entry_point_version() {
        return Err(AccountError::Validator(format!(
            "kernel {kernel_version} requires entry point {}, {} uses {}",
            kernel_version.entry_point_version(),
            chain_spec.name,
            chain_spec.entry_point_version
        )));
    }

    let chain_id = evm
        .get_chain_id()
        .await
        .map_err(|e| AccountError::Validator(format!("failed to query chain id: {e}")))?;
    if chain_id != chain_spec.id {
        return Err(AccountError::Validator(format!(
            "provider is connected to chain {chain_id}, expected {} ({})",
            chain_spec.id, chain_spec.name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;

    use super::*;

    #[test]
    fn test_dummy_signature_shape() {
        assert_eq!(DUMMY_ECDSA_SIGNATURE.len(), 65);
        assert_eq!(DUMMY_ECDSA_SIGNATURE[64], 0x1c);

        // low s, so bundlers accept it for simulation
        let s = U256::from_be_slice(&DUMMY_ECDSA_SIGNATURE[32..64]);
        let half_n = U256::from_be_slice(&hex!(
            "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0"
        ));
        assert!(s <= half_n);
    }
}
