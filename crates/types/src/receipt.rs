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

use alloy_primitives::{Address, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// Receipt of an included user operation, as returned by `eth_getUserOperationReceipt`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationReceipt {
    /// The hash of the user operation
    pub user_op_hash: B256,
    /// The entry point address this operation was sent to
    pub entry_point: Address,
    /// The sender of this user operation
    pub sender: Address,
    /// The nonce of this user operation
    pub nonce: U256,
    /// The paymaster used by this operation, zero if none used
    #[serde(default)]
    pub paymaster: Address,
    /// The gas cost of this operation
    pub actual_gas_cost: U256,
    /// The gas used by this operation
    pub actual_gas_used: U256,
    /// Whether this operation's execution was successful
    pub success: bool,
    /// If not successful, the revert reason
    #[serde(default)]
    pub reason: String,
    /// The transaction that included this operation
    pub receipt: InclusionReceipt,
}

/// The parts of the bundle transaction receipt Minter reports
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InclusionReceipt {
    /// Bundle transaction hash
    pub transaction_hash: B256,
    /// Block hash
    pub block_hash: B256,
    /// Block number
    pub block_number: U64,
}
