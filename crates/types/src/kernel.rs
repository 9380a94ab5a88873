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

//! Kernel smart account constants and identifier encodings

use alloy_primitives::{address, aliases::U192, Address, FixedBytes};
use serde::{Deserialize, Serialize};

use crate::EntryPointVersion;

/// Kernel account implementation version
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize, strum::Display)]
pub enum KernelVersion {
    /// Kernel v3.1
    #[default]
    #[serde(rename = "0.3.1")]
    #[strum(serialize = "0.3.1")]
    V3_1,
}

/// Module deployments for a kernel version
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KernelAddresses {
    /// Factory creating account proxies
    pub factory: Address,
    /// Staked meta factory forwarding to `factory`, used as the user operation factory
    pub meta_factory: Address,
    /// ECDSA validator module
    pub ecdsa_validator: Address,
    /// ECDSA signer module used by permission validators
    pub ecdsa_signer: Address,
}

const KERNEL_V3_1_ADDRESSES: KernelAddresses = KernelAddresses {
    factory: address!("aac5D4240AF87249B3f71BC8E4A2cae074A3E419"),
    meta_factory: address!("d703aaE79538628d27099B8c4f621bE4CCd142d5"),
    ecdsa_validator: address!("845ADb2C711129d4f3966735eD98a9F09fC4cE57"),
    ecdsa_signer: address!("6A6F069E2a08c2468e7724Ab3250CdBFBA14D4FF"),
};

impl KernelVersion {
    /// The entry point version this kernel version validates against
    pub fn entry_point_version(&self) -> EntryPointVersion {
        match self {
            KernelVersion::V3_1 => EntryPointVersion::V0_7,
        }
    }

    /// Module deployments for this version
    pub fn addresses(&self) -> &'static KernelAddresses {
        match self {
            KernelVersion::V3_1 => &KERNEL_V3_1_ADDRESSES,
        }
    }

    /// EIP-712 domain name used by the account
    pub fn domain_name(&self) -> &'static str {
        "Kernel"
    }

    /// EIP-712 domain version used by the account
    pub fn domain_version(&self) -> &'static str {
        match self {
            KernelVersion::V3_1 => "0.3.1",
        }
    }
}

/// How the account should treat the validator encoded in a nonce
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ValidatorMode {
    /// Validator is already installed
    Default = 0x00,
    /// Validator is installed by the user operation itself
    Enable = 0x01,
}

/// Kind of validation module
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ValidatorType {
    /// The account's root ("sudo") validator
    Root = 0x00,
    /// A standalone validator module
    Validator = 0x01,
    /// A permission (signer + policies)
    Permission = 0x02,
}

/// Identifies a validation module to the account: type byte followed by a
/// 20 byte identifier (validator address, or permission id right padded).
pub type ValidationId = FixedBytes<21>;

/// Build a validation id from a type and identifier
pub fn validation_id(validator_type: ValidatorType, identifier: [u8; 20]) -> ValidationId {
    let mut id = [0_u8; 21];
    id[0] = validator_type as u8;
    id[1..].copy_from_slice(&identifier);
    ValidationId::from(id)
}

/// Encode the 192-bit entry point nonce key selecting a validator.
///
/// Layout: `mode(1) | type(1) | identifier(20) | key(2)`
pub fn encode_nonce_key(
    mode: ValidatorMode,
    validator_type: ValidatorType,
    identifier: [u8; 20],
    key: u16,
) -> U192 {
    let mut bytes = [0_u8; 24];
    bytes[0] = mode as u8;
    bytes[1] = validator_type as u8;
    bytes[2..22].copy_from_slice(&identifier);
    bytes[22..].copy_from_slice(&key.to_be_bytes());
    U192::from_be_bytes(bytes)
}

/// Right pad a 4 byte permission id into a 20 byte identifier
pub fn permission_identifier(permission_id: [u8; 4]) -> [u8; 20] {
    let mut identifier = [0_u8; 20];
    identifier[..4].copy_from_slice(&permission_id);
    identifier
}
