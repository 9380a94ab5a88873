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

// Contracts from https://github.com/zerodevapp/kernel/tree/v3.1

//! Kernel v3.1 account, factory and module bindings

use alloy_sol_macro::sol;

sol!(
    #[allow(missing_docs)]
    #[derive(Default, Debug, PartialEq, Eq)]
    struct ValidationConfig {
        uint32 nonce;
        address hook;
    }

    #[allow(missing_docs)]
    #[derive(Default, Debug, PartialEq, Eq)]
    struct Execution {
        address target;
        uint256 value;
        bytes callData;
    }

    /// EIP-712 message signed by the root validator to install a validator
    /// from inside a user operation
    #[allow(missing_docs)]
    #[derive(Default, Debug, PartialEq, Eq)]
    struct Enable {
        bytes21 validationId;
        uint32 nonce;
        address hook;
        bytes validatorData;
        bytes hookData;
        bytes selectorData;
    }

    #[allow(missing_docs)]
    interface IKernel {
        function execute(bytes32 execMode, bytes calldata executionCalldata) external payable;

        function initialize(
            bytes21 rootValidator,
            address hook,
            bytes calldata validatorData,
            bytes calldata hookData,
            bytes[] calldata initConfig
        ) external;

        function currentNonce() external view returns (uint32);

        function validationConfig(bytes21 vId) external view returns (ValidationConfig memory);
    }

    #[allow(missing_docs)]
    interface IKernelFactory {
        function getAddress(bytes calldata data, bytes32 salt) external view returns (address);
    }

    #[allow(missing_docs)]
    interface IFactoryStaker {
        function deployWithFactory(address factory, bytes calldata createData, bytes32 salt)
            external
            payable
            returns (address);
    }
);
