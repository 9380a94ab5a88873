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

use std::marker::PhantomData;

use alloy_primitives::{Address, B256};
use alloy_provider::Provider as AlloyProvider;
use alloy_transport::Transport;
use minter_types::{UserOperation, UserOperationReceipt};
use tracing::instrument;

use super::types::RpcUserOperation;
use crate::{BundlerProvider, ProviderResult};

/// Bundler provider speaking the ERC-4337 `eth_` user operation namespace
pub struct AlloyBundlerProvider<AP, T> {
    inner: AP,
    _marker: PhantomData<T>,
}

impl<AP, T> AlloyBundlerProvider<AP, T> {
    /// Create a new `AlloyBundlerProvider`
    pub fn new(inner: AP) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<AP: Clone, T> Clone for AlloyBundlerProvider<AP, T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

#[async_trait::async_trait]
impl<AP, T> BundlerProvider for AlloyBundlerProvider<AP, T>
where
    T: Transport + Clone,
    AP: AlloyProvider<T>,
{
    async fn supported_entry_points(&self) -> ProviderResult<Vec<Address>> {
        Ok(self
            .inner
            .raw_request("eth_supportedEntryPoints".into(), ())
            .await?)
    }

    #[instrument(skip_all, fields(sender = %user_op.sender, nonce = %user_op.nonce))]
    async fn send_user_operation(
        &self,
        user_op: &UserOperation,
        entry_point: Address,
    ) -> ProviderResult<B256> {
        Ok(self
            .inner
            .raw_request(
                "eth_sendUserOperation".into(),
                (RpcUserOperation::from(user_op), entry_point),
            )
            .await?)
    }

    async fn get_user_operation_receipt(
        &self,
        hash: B256,
    ) -> ProviderResult<Option<UserOperationReceipt>> {
        Ok(self
            .inner
            .raw_request("eth_getUserOperationReceipt".into(), (hash,))
            .await?)
    }
}
