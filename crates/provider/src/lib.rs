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

#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Minter providers
//! A provider is a type that provides access to chain data, a bundler or a paymaster

mod alloy;
pub use alloy::{
    bundler::AlloyBundlerProvider, evm::AlloyEvmProvider, new_alloy_bundler_provider,
    new_alloy_evm_provider, new_alloy_paymaster_provider, new_alloy_provider,
    paymaster::AlloyPaymasterProvider,
};

mod traits;
pub use traits::*;
