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

use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use minter_provider::{EvmProvider, ProviderError, ProviderResult};

/// Read-only contract call through an [`EvmProvider`]
pub(crate) async fn read<E, C>(evm: &E, to: Address, call: C) -> ProviderResult<C::Return>
where
    E: EvmProvider + ?Sized,
    C: SolCall + Send,
{
    let output = evm.call(to, call.abi_encode().into()).await?;
    C::abi_decode_returns(&output, true).map_err(|e| {
        ProviderError::ContractError(format!("failed to decode {}: {e}", C::SIGNATURE))
    })
}
