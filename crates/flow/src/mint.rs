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
use minter_contracts::vehicle::{AttributeInfoPair, IVehicleId};
use minter_types::Call;

use crate::{MintArgs, MintError};

impl MintArgs {
    /// Parse the owner address
    pub fn owner_address(&self) -> Result<Address, MintError> {
        self.owner
            .parse()
            .map_err(|e| MintError::Encoding(format!("invalid owner address {:?}: {e}", self.owner)))
    }
}

/// Encode a `mintVehicleWithDeviceDefinition` call on `target`
pub fn encode_mint_call(target: Address, args: &MintArgs) -> Result<Call, MintError> {
    let data = IVehicleId::mintVehicleWithDeviceDefinitionCall {
        manufacturerNode: args.manufacturer_node,
        owner: args.owner_address()?,
        deviceDefinitionId: args.device_definition_id.clone(),
        attrInfo: args
            .attributes
            .iter()
            .map(|(attribute, info)| AttributeInfoPair {
                attribute: attribute.clone(),
                info: info.clone(),
            })
            .collect(),
    }
    .abi_encode();
    Ok(Call::new(target, data.into()))
}
