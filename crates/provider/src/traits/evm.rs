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

//! Trait for interacting with chain data and contracts.

use alloy_primitives::{Address, Bytes};
#[cfg(feature = "test-utils")]
use mockall::automock;
use minter_types::GasFees;

use super::error::ProviderResult;

/// Trait for interacting with chain data and contracts.
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait EvmProvider: Send + Sync {
    /// Get the chain id the provider is connected to
    async fn get_chain_id(&self) -> ProviderResult<u64>;

    /// Execute a read-only call against the latest block
    async fn call(&self, to: Address, data: Bytes) -> ProviderResult<Bytes>;

    /// Get the code at an address, empty if nothing is deployed
    async fn get_code(&self, address: Address) -> ProviderResult<Bytes>;

    /// Estimate fees for inclusion in the next few blocks
    async fn estimate_fees(&self) -> ProviderResult<GasFees>;
}
