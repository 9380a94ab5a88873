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

//! Trait for submitting user operations to a bundler.

use alloy_primitives::{Address, B256};
#[cfg(feature = "test-utils")]
use mockall::automock;
use minter_types::{UserOperation, UserOperationReceipt};

use super::error::ProviderResult;

/// Trait for a bundler's user operation RPC namespace
#[cfg_attr(feature = "test-utils", automock)]
#[async_trait::async_trait]
pub trait BundlerProvider: Send + Sync {
    /// Entry points the bundler accepts operations for
    async fn supported_entry_points(&self) -> ProviderResult<Vec<Address>>;

    /// Submit a signed user operation, returning the hash the bundler assigned it
    async fn send_user_operation(
        &self,
        user_op: &UserOperation,
        entry_point: Address,
    ) -> ProviderResult<B256>;

    /// Look up the receipt of a user operation, `None` while it is pending
    async fn get_user_operation_receipt(
        &self,
        hash: B256,
    ) -> ProviderResult<Option<UserOperationReceipt>>;
}
