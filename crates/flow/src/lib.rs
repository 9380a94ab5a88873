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

//! The sponsored mint flow: build a Kernel account with a restricted worker
//! signer and mint a vehicle through it

mod config;
pub use config::{
    MintArgs, MintConfig, DEFAULT_BUNDLER_RPC_BASE, DEFAULT_PAYMASTER_RPC_BASE,
    DEFAULT_TARGET_CONTRACT,
};

mod error;
pub use error::MintError;

mod flow;
pub use flow::{
    resolve_addresses, run_deploy_flow, run_mint_flow, AccountAddresses, MintOutcome, Providers,
};

mod mint;
pub use mint::encode_mint_call;
