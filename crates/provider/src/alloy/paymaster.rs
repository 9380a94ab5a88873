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

use alloy_provider::Provider as AlloyProvider;
use alloy_transport::Transport;
use minter_types::{SponsorshipData, UserOperation};
use tracing::instrument;

use super::types::{RpcSponsorship, RpcSponsorshipRequest, RpcUserOperation};
use crate::{PaymasterProvider, ProviderResult, SponsorshipContext};

/// Paymaster provider for the ZeroDev `zd_sponsorUserOperation` method
pub struct AlloyPaymasterProvider<AP, T> {
    inner: AP,
    _marker: PhantomData<T>,
}

impl<AP, T> AlloyPaymasterProvider<AP, T> {
    /// Create a new `AlloyPaymasterProvider`
    pub fn new(inner: AP) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<AP: Clone, T> Clone for AlloyPaymasterProvider<AP, T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

#[async_trait::async_trait]
impl<AP, T> PaymasterProvider for AlloyPaymasterProvider<AP, T>
where
    T: Transport + Clone,
    AP: AlloyProvider<T>,
{
    #[instrument(skip_all, fields(sender = %user_op.sender, chain_id = context.chain_id))]
    async fn sponsor_user_operation(
        &self,
        user_op: &UserOperation,
        context: SponsorshipContext,
    ) -> ProviderResult<SponsorshipData> {
        let request = RpcSponsorshipRequest {
            chain_id: context.chain_id,
            user_op: RpcUserOperation::from(user_op),
            entry_point_address: context.entry_point,
            should_override_fee: false,
            should_consume: true,
        };
        let sponsorship: RpcSponsorship = self
            .inner
            .raw_request("zd_sponsorUserOperation".into(), (request,))
            .await?;
        Ok(sponsorship.into())
    }
}
