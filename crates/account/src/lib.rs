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

//! Kernel smart accounts: validators, the account descriptor and a
//! sponsored client submitting user operations through a bundler

mod client;
pub use client::{KernelAccountClient, ValidatorSelection};

mod contract;

mod error;
pub use error::{AccountError, AccountResult};

mod kernel;
pub use kernel::KernelAccount;

pub mod validator;
pub use validator::{EcdsaValidator, KernelValidator, PermissionValidator};
