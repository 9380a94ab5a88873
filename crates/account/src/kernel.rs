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

//! Kernel v3 account descriptor: address derivation, call data and
//! signature encodings.

use alloy_primitives::{aliases::U192, Address, Bytes, FixedBytes, B256, U256};
use alloy_sol_types::{Eip712Domain, SolCall, SolStruct, SolValue};
use minter_contracts::kernel::{Enable, Execution, IFactoryStaker, IKernel, IKernelFactory};
use minter_provider::EvmProvider;
use minter_types::{
    chain::ChainSpec,
    kernel::{encode_nonce_key, KernelVersion, ValidatorMode, ValidatorType},
    Call,
};
use tracing::debug;

use crate::{
    contract,
    validator::{EcdsaValidator, KernelValidator, PermissionValidator},
    AccountError, AccountResult,
};

const CALL_TYPE_BATCH: u8 = 0x01;

/// A Kernel smart account.
///
/// The account may not be deployed yet; its address is the counterfactual
/// address the factory will deploy it to.
#[derive(Debug, Clone)]
pub struct KernelAccount {
    address: Address,
    kernel_version: KernelVersion,
    index: u64,
    chain_id: u64,
    entry_point: Address,
    sudo: EcdsaValidator,
    regular: Option<PermissionValidator>,
}

impl KernelAccount {
    /// Build the account owned by `sudo`, optionally with a regular
    /// validator installed on first use.
    ///
    /// `index` selects one of many accounts with the same owner.
    pub async fn new<E>(
        evm: &E,
        chain_spec: &ChainSpec,
        kernel_version: KernelVersion,
        sudo: EcdsaValidator,
        regular: Option<PermissionValidator>,
        index: u64,
    ) -> AccountResult<Self>
    where
        E: EvmProvider + ?Sized,
    {
        if chain_spec.entry_point_version != kernel_version.entry_point_version() {
            return Err(AccountError::Construction(format!(
                "kernel {kernel_version} requires entry point {}, found {}",
                kernel_version.entry_point_version(),
                chain_spec.entry_point_version
            )));
        }
        if sudo.kernel_version() != kernel_version
            || regular
                .as_ref()
                .is_some_and(|r| r.kernel_version() != kernel_version)
        {
            return Err(AccountError::Construction(format!(
                "validators were not built for kernel {kernel_version}"
            )));
        }

        let mut account = Self {
            address: Address::ZERO,
            kernel_version,
            index,
            chain_id: chain_spec.id,
            entry_point: chain_spec.entry_point_address,
            sudo,
            regular,
        };

        let factory = kernel_version.addresses().factory;
        let address = contract::read(
            evm,
            factory,
            IKernelFactory::getAddressCall {
                data: account.initialize_call_data(),
                salt: account.salt(),
            },
        )
        .await
        .map_err(|e| AccountError::Construction(format!("failed to get account address: {e}")))?
        ._0;
        if address.is_zero() {
            return Err(AccountError::Construction(
                "factory returned the zero address".to_string(),
            ));
        }
        debug!("Kernel account {address} at index {index}");

        account.address = address;
        Ok(account)
    }

    /// Account address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Kernel version
    pub fn kernel_version(&self) -> KernelVersion {
        self.kernel_version
    }

    /// Entry point the account validates user operations for
    pub fn entry_point(&self) -> Address {
        self.entry_point
    }

    /// Chain the account lives on
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Root validator
    pub fn sudo(&self) -> &EcdsaValidator {
        &self.sudo
    }

    /// Regular validator, if any
    pub fn regular(&self) -> Option<&PermissionValidator> {
        self.regular.as_ref()
    }

    fn salt(&self) -> B256 {
        B256::from(U256::from(self.index))
    }

    fn initialize_call_data(&self) -> Bytes {
        let mut root_validator = [0_u8; 21];
        root_validator[0] = self.sudo.validator_type() as u8;
        root_validator[1..].copy_from_slice(&self.sudo.identifier());

        IKernel::initializeCall {
            rootValidator: FixedBytes::from(root_validator),
            hook: Address::ZERO,
            validatorData: self.sudo.enable_data(),
            hookData: Bytes::new(),
            initConfig: vec![],
        }
        .abi_encode()
        .into()
    }

    /// Factory and factory data deploying the account
    pub fn factory_call(&self) -> (Address, Bytes) {
        let addresses = self.kernel_version.addresses();
        let data = IFactoryStaker::deployWithFactoryCall {
            factory: addresses.factory,
            createData: self.initialize_call_data(),
            salt: self.salt(),
        }
        .abi_encode();
        (addresses.meta_factory, data.into())
    }

    /// Encode calls as the account's `execute` call data.
    ///
    /// A single call uses the single execution mode, several calls the batch mode.
    pub fn encode_calls(&self, calls: &[Call]) -> AccountResult<Bytes> {
        let (mode, execution_calldata) = match calls {
            [] => {
                return Err(AccountError::Encoding(
                    "at least one call is required".to_string(),
                ))
            }
            [call] => {
                let data = [
                    call.to.as_slice(),
                    &call.value.to_be_bytes::<32>(),
                    &call.data,
                ]
                .concat();
                (B256::ZERO, data)
            }
            calls => {
                let executions = calls
                    .iter()
                    .map(|c| Execution {
                        target: c.to,
                        value: c.value,
                        callData: c.data.clone(),
                    })
                    .collect::<Vec<_>>();
                let mut mode = B256::ZERO;
                mode[0] = CALL_TYPE_BATCH;
                (mode, executions.abi_encode())
            }
        };

        Ok(IKernel::executeCall {
            execMode: mode,
            executionCalldata: execution_calldata.into(),
        }
        .abi_encode()
        .into())
    }

    /// Entry point nonce key for the root validator
    pub fn sudo_nonce_key(&self) -> U192 {
        encode_nonce_key(
            ValidatorMode::Default,
            ValidatorType::Root,
            self.sudo.identifier(),
            0,
        )
    }

    /// Entry point nonce key for a regular validator, in enable mode if it
    /// is installed by the operation
    pub fn regular_nonce_key(&self, validator: &dyn KernelValidator, enable: bool) -> U192 {
        let mode = if enable {
            ValidatorMode::Enable
        } else {
            ValidatorMode::Default
        };
        encode_nonce_key(mode, validator.validator_type(), validator.identifier(), 0)
    }

    /// Selector data granting the enabled validator access to `execute`.
    ///
    /// Only the selector is sent. Longer data makes the account install a
    /// selector module as well, which `execute` has no use for.
    fn enable_selector_data() -> Bytes {
        Bytes::copy_from_slice(&IKernel::executeCall::SELECTOR)
    }

    fn enable_struct(&self, validator: &dyn KernelValidator, enable_nonce: u32) -> Enable {
        Enable {
            validationId: validator.validation_id(),
            nonce: enable_nonce,
            hook: Address::ZERO,
            validatorData: validator.enable_data(),
            hookData: Bytes::new(),
            selectorData: Self::enable_selector_data(),
        }
    }

    /// EIP-712 digest the root validator signs to install `validator`
    pub fn enable_hash(&self, validator: &dyn KernelValidator, enable_nonce: u32) -> B256 {
        let domain = Eip712Domain::new(
            Some(self.kernel_version.domain_name().into()),
            Some(self.kernel_version.domain_version().into()),
            Some(U256::from(self.chain_id)),
            Some(self.address),
            None,
        );
        self.enable_struct(validator, enable_nonce)
            .eip712_signing_hash(&domain)
    }

    /// Signature installing `validator` and validating the operation with it
    pub fn encode_enable_signature(
        &self,
        validator: &dyn KernelValidator,
        enable_nonce: u32,
        enable_signature: Bytes,
        user_op_signature: Bytes,
    ) -> Bytes {
        let enable = self.enable_struct(validator, enable_nonce);
        let encoded = (
            enable.validatorData,
            enable.hookData,
            enable.selectorData,
            enable_signature,
            user_op_signature,
        )
            .abi_encode_params();
        [enable.hook.as_slice(), &encoded].concat().into()
    }
}
