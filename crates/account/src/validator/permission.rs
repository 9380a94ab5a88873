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

use alloy_primitives::{keccak256, Address, Bytes, B256};
use alloy_sol_types::SolValue;
use minter_provider::EvmProvider;
use minter_signer::LocalSigner;
use minter_types::{
    chain::ChainSpec,
    kernel::{permission_identifier, KernelVersion, ValidatorType},
    policy::{CallPolicy, PolicyViolation},
    Call,
};

use super::{check_network, KernelValidator, DUMMY_ECDSA_SIGNATURE};
use crate::{AccountError, AccountResult};

// policy applies to every validation path (user operations and ERC-1271)
const POLICY_FLAG_FOR_ALL_VALIDATION: [u8; 2] = [0x00, 0x00];
// signature prefix selecting the signer rather than a policy
const SIGNER_SIGNATURE_PREFIX: u8 = 0xff;

/// A Kernel permission: an ECDSA signer restricted by call policies.
///
/// Installed on the account under a permission id derived from its
/// policies and signer.
#[derive(Debug, Clone)]
pub struct PermissionValidator {
    signer: LocalSigner,
    signer_module: Address,
    policies: Vec<CallPolicy>,
    permission_id: [u8; 4],
    kernel_version: KernelVersion,
}

impl PermissionValidator {
    /// Create a permission for `signer` restricted by `policies`
    pub async fn new<E>(
        evm: &E,
        chain_spec: &ChainSpec,
        signer: LocalSigner,
        policies: Vec<CallPolicy>,
        kernel_version: KernelVersion,
    ) -> AccountResult<Self>
    where
        E: EvmProvider + ?Sized,
    {
        if policies.is_empty() {
            return Err(AccountError::Validator(
                "permission requires at least one policy".to_string(),
            ));
        }
        check_network(evm, chain_spec, kernel_version).await?;

        let mut validator = Self {
            signer,
            signer_module: kernel_version.addresses().ecdsa_signer,
            policies,
            permission_id: [0; 4],
            kernel_version,
        };
        let id = keccak256(validator.enable_data());
        validator.permission_id.copy_from_slice(&id[..4]);
        Ok(validator)
    }

    /// Permission id the account stores this permission under
    pub fn permission_id(&self) -> [u8; 4] {
        self.permission_id
    }

    /// Policies restricting the signer
    pub fn policies(&self) -> &[CallPolicy] {
        &self.policies
    }

    /// Kernel version the permission was built for
    pub fn kernel_version(&self) -> KernelVersion {
        self.kernel_version
    }

    /// Check a call against every policy of this permission
    pub fn check_call(&self, call: &Call) -> Result<(), PolicyViolation> {
        self.policies.iter().try_for_each(|p| p.check_call(call))
    }

    fn prefixed(signature: &[u8]) -> Bytes {
        let mut out = Vec::with_capacity(signature.len() + 1);
        out.push(SIGNER_SIGNATURE_PREFIX);
        out.extend_from_slice(signature);
        out.into()
    }
}

impl KernelValidator for PermissionValidator {
    fn validator_type(&self) -> ValidatorType {
        ValidatorType::Permission
    }

    fn identifier(&self) -> [u8; 20] {
        permission_identifier(self.permission_id)
    }

    fn enable_data(&self) -> Bytes {
        let mut entries: Vec<Bytes> = self
            .policies
            .iter()
            .map(|policy| {
                [
                    POLICY_FLAG_FOR_ALL_VALIDATION.as_slice(),
                    policy.address().as_slice(),
                    &policy.policy_data(),
                ]
                .concat()
                .into()
            })
            .collect();
        entries.push(
            [
                POLICY_FLAG_FOR_ALL_VALIDATION.as_slice(),
                self.signer_module.as_slice(),
                self.signer.address().as_slice(),
            ]
            .concat()
            .into(),
        );
        entries.abi_encode().into()
    }

    fn signer_address(&self) -> Address {
        self.signer.address()
    }

    fn dummy_signature(&self) -> Bytes {
        Self::prefixed(&DUMMY_ECDSA_SIGNATURE)
    }

    fn sign_user_operation_hash(&self, hash: &B256) -> AccountResult<Bytes> {
        let signature = self.signer.sign_message(hash.as_slice())?;
        Ok(Self::prefixed(&signature))
    }
}
