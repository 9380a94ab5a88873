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

use alloy_primitives::{Address, Bytes, B256};
use minter_provider::EvmProvider;
use minter_signer::LocalSigner;
use minter_types::{
    chain::ChainSpec,
    kernel::{KernelVersion, ValidatorType},
};

use super::{check_network, KernelValidator, DUMMY_ECDSA_SIGNATURE};
use crate::AccountResult;

/// Kernel's ECDSA validator module, owned by a single key.
///
/// Used as the account's root ("sudo") validator.
#[derive(Debug, Clone)]
pub struct EcdsaValidator {
    signer: LocalSigner,
    module: Address,
    kernel_version: KernelVersion,
}

impl EcdsaValidator {
    /// Create a validator for `signer` on the chain `evm` is connected to
    pub async fn new<E>(
        evm: &E,
        chain_spec: &ChainSpec,
        signer: LocalSigner,
        kernel_version: KernelVersion,
    ) -> AccountResult<Self>
    where
        E: EvmProvider + ?Sized,
    {
        check_network(evm, chain_spec, kernel_version).await?;
        Ok(Self {
            signer,
            module: kernel_version.addresses().ecdsa_validator,
            kernel_version,
        })
    }

    /// Validator module address
    pub fn module(&self) -> Address {
        self.module
    }

    /// Kernel version the validator was built for
    pub fn kernel_version(&self) -> KernelVersion {
        self.kernel_version
    }

    /// Sign a digest without a message prefix, e.g. an EIP-712 hash
    pub fn sign_hash(&self, hash: &B256) -> AccountResult<Bytes> {
        Ok(self.signer.sign_hash(hash)?)
    }
}

impl KernelValidator for EcdsaValidator {
    fn validator_type(&self) -> ValidatorType {
        ValidatorType::Validator
    }

    fn identifier(&self) -> [u8; 20] {
        self.module.into_array()
    }

    fn enable_data(&self) -> Bytes {
        Bytes::copy_from_slice(self.signer.address().as_slice())
    }

    fn signer_address(&self) -> Address {
        self.signer.address()
    }

    fn dummy_signature(&self) -> Bytes {
        Bytes::from_static(&DUMMY_ECDSA_SIGNATURE)
    }

    fn sign_user_operation_hash(&self, hash: &B256) -> AccountResult<Bytes> {
        Ok(self.signer.sign_message(hash.as_slice())?)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{keccak256, Signature};
    use minter_provider::{MockEvmProvider, ProviderError};
    use minter_types::EntryPointVersion;

    use super::*;
    use crate::AccountError;

    fn amoy() -> ChainSpec {
        ChainSpec {
            name: "Polygon Amoy".to_string(),
            id: 80002,
            ..Default::default()
        }
    }

    fn evm_on(chain_id: u64) -> MockEvmProvider {
        let mut evm = MockEvmProvider::default();
        evm.expect_get_chain_id().returning(move || Ok(chain_id));
        evm
    }

    #[tokio::test]
    async fn test_new() {
        let signer = LocalSigner::random();
        let owner = signer.address();
        let validator = EcdsaValidator::new(&evm_on(80002), &amoy(), signer, KernelVersion::V3_1)
            .await
            .unwrap();

        assert_eq!(validator.module(), KernelVersion::V3_1.addresses().ecdsa_validator);
        assert_eq!(validator.signer_address(), owner);
        assert_eq!(&validator.enable_data()[..], owner.as_slice());
        assert_eq!(validator.validation_id()[0], ValidatorType::Validator as u8);
        assert_eq!(&validator.validation_id()[1..], validator.module().as_slice());
    }

    #[tokio::test]
    async fn test_chain_mismatch() {
        let err = EcdsaValidator::new(
            &evm_on(1),
            &amoy(),
            LocalSigner::random(),
            KernelVersion::V3_1,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AccountError::Validator(msg) if msg.contains("chain 1")));
    }

    #[tokio::test]
    async fn test_unreachable_chain() {
        let mut evm = MockEvmProvider::default();
        evm.expect_get_chain_id()
            .returning(|| Err(ProviderError::ContractError("connection refused".to_string())));
        let err = EcdsaValidator::new(&evm, &amoy(), LocalSigner::random(), KernelVersion::V3_1)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validator(_)));
    }

    #[tokio::test]
    async fn test_entry_point_mismatch() {
        let mut chain_spec = amoy();
        chain_spec.entry_point_version = EntryPointVersion::V0_6;
        let mut evm = MockEvmProvider::default();
        evm.expect_get_chain_id().never();
        let err = EcdsaValidator::new(&evm, &chain_spec, LocalSigner::random(), KernelVersion::V3_1)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validator(msg) if msg.contains("v0.7")));
    }

    #[tokio::test]
    async fn test_sign_user_operation_hash() {
        let validator = EcdsaValidator::new(
            &evm_on(80002),
            &amoy(),
            LocalSigner::random(),
            KernelVersion::V3_1,
        )
        .await
        .unwrap();
        let hash = keccak256(b"op");
        let sig = validator.sign_user_operation_hash(&hash).unwrap();
        let recovered = Signature::try_from(&sig[..])
            .unwrap()
            .recover_address_from_msg(hash.as_slice())
            .unwrap();
        assert_eq!(recovered, validator.signer_address());
        assert_eq!(validator.dummy_signature().len(), 65);
    }
}
