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

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Canonical entry point v0.6 deployment
pub const ENTRY_POINT_ADDRESS_V0_6: Address = address!("5FF137D4b0FDCD49DcA30c7CF57E578a026d2789");
/// Canonical entry point v0.7 deployment
pub const ENTRY_POINT_ADDRESS_V0_7: Address = address!("0000000071727De22E5E9d8BAf0edAc6f37da032");

/// Entry point version
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Deserialize,
    Serialize,
    strum::Display,
)]
pub enum EntryPointVersion {
    /// Version 0.6
    #[serde(rename = "v0_6")]
    #[strum(serialize = "v0.6")]
    V0_6,
    /// Version 0.7
    #[default]
    #[serde(rename = "v0_7")]
    #[strum(serialize = "v0.7")]
    V0_7,
}

impl EntryPointVersion {
    /// Canonical address of this entry point version
    pub fn canonical_address(&self) -> Address {
        match self {
            EntryPointVersion::V0_6 => ENTRY_POINT_ADDRESS_V0_6,
            EntryPointVersion::V0_7 => ENTRY_POINT_ADDRESS_V0_7,
        }
    }
}
