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

use alloy_primitives::{Address, Bytes, U256};

/// A single call executed by a smart account
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Call {
    /// Target contract or account
    pub to: Address,
    /// Native value sent with the call
    pub value: U256,
    /// Call data
    pub data: Bytes,
}

impl Call {
    /// Create a call without value
    pub fn new(to: Address, data: Bytes) -> Self {
        Self {
            to,
            value: U256::ZERO,
            data,
        }
    }

    /// The 4-byte function selector of this call, if the data is long enough to hold one
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4).map(|s| [s[0], s[1], s[2], s[3]])
    }
}
