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

//! Vehicle registry bindings

use alloy_sol_macro::sol;

sol!(
    #[allow(missing_docs)]
    #[derive(Default, Debug, PartialEq, Eq)]
    struct AttributeInfoPair {
        string attribute;
        string info;
    }

    #[allow(missing_docs)]
    interface IVehicleId {
        function mintVehicleWithDeviceDefinition(
            uint256 manufacturerNode,
            address owner,
            string calldata deviceDefinitionId,
            AttributeInfoPair[] calldata attrInfo
        ) external;
    }
);
