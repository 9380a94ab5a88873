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

//! Trait for requesting gas sponsorship.

use alloy_primitives::Address;
#[cfg(feature = "test-utils")]
use mockall::automock;
use minter_types::{SponsorshipData, UserOperation};

use super::error::ProviderResult;

/// Where a sponsored operation will be executed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SponsorshipContext {
    /// Chain the operation targets
    pub chain_id: u64,
    /// Entry point the operation is submitted to
    pub entry_point: Address,
}

/// Trait for a paymaster service sponsoring user operations
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait PaymasterProvider: Send + Sync {
    /// Request sponsorship for an unsigned user operation.
    ///
    /// The operation must carry a dummy signature of the final length so
    /// the paymaster can estimate verification gas.
    async fn sponsor_user_operation(
        &self,
        user_op: &UserOperation,
        context: SponsorshipContext,
    ) -> ProviderResult<SponsorshipData>;
}
