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

use std::time::Duration;

use alloy_primitives::{address, Address, U256};
use minter_types::chain::ChainSpec;
use secrecy::SecretString;

use crate::MintError;

/// ZeroDev v2 bundler endpoint, the project id is appended
pub const DEFAULT_BUNDLER_RPC_BASE: &str = "https://rpc.zerodev.app/api/v2/bundler";
/// ZeroDev v2 paymaster endpoint, the project id is appended
pub const DEFAULT_PAYMASTER_RPC_BASE: &str = "https://rpc.zerodev.app/api/v2/paymaster";
/// Vehicle registry the worker may mint on
pub const DEFAULT_TARGET_CONTRACT: Address = address!("5eAA326fB2fc97fAcCe6A79A304876daD0F2e96c");

/// Configuration of a flow run
#[derive(Debug)]
pub struct MintConfig {
    /// ZeroDev project id
    pub project_id: String,
    /// Secret key of the sudo signer, hex encoded
    pub private_key: Option<SecretString>,
    /// Chain to run on
    pub chain_spec: ChainSpec,
    /// Bundler endpoint without the project id
    pub bundler_rpc_base: String,
    /// Paymaster endpoint without the project id
    pub paymaster_rpc_base: String,
    /// Only contract the worker may call
    pub target_contract: Address,
    /// Arguments of the mint call
    pub mint: MintArgs,
    /// How long to wait for a receipt
    pub receipt_timeout: Duration,
    /// Wait between receipt lookups
    pub receipt_poll_interval: Duration,
    /// Account index, selects one of many accounts with the same owner
    pub account_index: u64,
    /// Per request timeout of the RPC clients
    pub provider_client_timeout_seconds: u64,
}

impl MintConfig {
    /// Bundler RPC url for the project. Also used for chain reads.
    pub fn bundler_url(&self) -> String {
        format!("{}/{}", self.bundler_rpc_base.trim_end_matches('/'), self.project_id)
    }

    /// Paymaster RPC url for the project
    pub fn paymaster_url(&self) -> String {
        format!(
            "{}/{}",
            self.paymaster_rpc_base.trim_end_matches('/'),
            self.project_id
        )
    }

    /// Check that the required settings are present
    pub fn validate(&self) -> Result<(), MintError> {
        if self.project_id.trim().is_empty() {
            return Err(MintError::Configuration("PROJECT_ID is not set".to_string()));
        }
        if self.private_key.is_none() {
            return Err(MintError::Configuration("PRIVATE_KEY is not set".to_string()));
        }
        if self.receipt_timeout.is_zero() {
            return Err(MintError::Configuration(
                "receipt timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            private_key: None,
            chain_spec: ChainSpec::default(),
            bundler_rpc_base: DEFAULT_BUNDLER_RPC_BASE.to_string(),
            paymaster_rpc_base: DEFAULT_PAYMASTER_RPC_BASE.to_string(),
            target_contract: DEFAULT_TARGET_CONTRACT,
            mint: MintArgs::default(),
            receipt_timeout: Duration::from_secs(15),
            receipt_poll_interval: Duration::from_secs(1),
            account_index: 0,
            provider_client_timeout_seconds: 10,
        }
    }
}

/// Arguments of `mintVehicleWithDeviceDefinition`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintArgs {
    /// Manufacturer node id
    pub manufacturer_node: U256,
    /// Owner of the minted vehicle, checked before anything is sent
    pub owner: String,
    /// Device definition id
    pub device_definition_id: String,
    /// (attribute, info) pairs
    pub attributes: Vec<(String, String)>,
}

impl Default for MintArgs {
    fn default() -> Self {
        Self {
            manufacturer_node: U256::from(19),
            owner: "0xd744468B9192301650f8Cb5e390BdD824DFA6Dd9".to_string(),
            device_definition_id: "cadillac_lyriq_2023".to_string(),
            attributes: [("Make", "Cadillac"), ("Model", "Lyriq"), ("Year", "2023")]
                .into_iter()
                .map(|(a, i)| (a.to_string(), i.to_string()))
                .collect(),
        }
    }
}
