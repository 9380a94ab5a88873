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

use alloy_primitives::{Address, Bytes};

use crate::{GasFees, UserOperation};

/// Sponsorship returned by a paymaster for a user operation
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SponsorshipData {
    /// Paymaster paying for the operation
    pub paymaster: Address,
    /// Paymaster data, usually carrying the paymaster's signature
    pub paymaster_data: Bytes,
    /// Paymaster verification gas limit
    pub paymaster_verification_gas_limit: u128,
    /// Paymaster post-op gas limit
    pub paymaster_post_op_gas_limit: u128,
    /// Call gas limit estimated by the paymaster
    pub call_gas_limit: u128,
    /// Verification gas limit estimated by the paymaster
    pub verification_gas_limit: u128,
    /// Pre verification gas estimated by the paymaster
    pub pre_verification_gas: u128,
    /// Fees the sponsorship was priced with, when the paymaster overrides them
    pub gas_fees: Option<GasFees>,
}

impl SponsorshipData {
    /// Attach the sponsorship to an operation. The operation must be signed after this.
    pub fn apply(&self, uo: &mut UserOperation) {
        uo.paymaster = Some(self.paymaster);
        uo.paymaster_data = self.paymaster_data.clone();
        uo.paymaster_verification_gas_limit = self.paymaster_verification_gas_limit;
        uo.paymaster_post_op_gas_limit = self.paymaster_post_op_gas_limit;
        uo.call_gas_limit = self.call_gas_limit;
        uo.verification_gas_limit = self.verification_gas_limit;
        uo.pre_verification_gas = self.pre_verification_gas;
        if let Some(fees) = self.gas_fees {
            uo.set_gas_fees(fees);
        }
    }
}
