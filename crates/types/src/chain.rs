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

//! Chain specification for Minter

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::EntryPointVersion;

const JIFFYSCAN_USER_OP_URL: &str = "https://jiffyscan.xyz/userOpHash/";

/// Chain specification for Minter
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChainSpec {
    /// name for logging purposes, e.g. "Polygon Amoy", no logic is performed on this
    pub name: String,
    /// chain id
    pub id: u64,
    /// entry point the bundler accepts user operations for
    pub entry_point_address: Address,
    /// version of the entry point at `entry_point_address`
    pub entry_point_version: EntryPointVersion,
    /// prefix of a block explorer page for user operations, the hash is appended
    pub user_operation_explorer_url: String,
}

impl ChainSpec {
    /// Link to the explorer page of a user operation
    pub fn user_operation_url(&self, hash: B256) -> String {
        format!("{}{hash}", self.user_operation_explorer_url)
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        let entry_point_version = EntryPointVersion::V0_7;
        Self {
            name: "Unknown".to_string(),
            id: 0,
            entry_point_address: entry_point_version.canonical_address(),
            entry_point_version,
            user_operation_explorer_url: JIFFYSCAN_USER_OP_URL.to_string(),
        }
    }
}
