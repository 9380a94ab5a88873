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

//! Minter common types

pub mod chain;

mod call;
pub use call::Call;

mod entry_point;
pub use entry_point::EntryPointVersion;

mod gas;
pub use gas::GasFees;

pub mod kernel;

pub mod policy;

mod receipt;
pub use receipt::{InclusionReceipt, UserOperationReceipt};

mod sponsorship;
pub use sponsorship::SponsorshipData;

mod user_operation;
pub use user_operation::UserOperation;
