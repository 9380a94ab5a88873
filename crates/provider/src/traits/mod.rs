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

//! Traits for the provider module.

mod bundler;
#[cfg(feature = "test-utils")]
pub use bundler::MockBundlerProvider;
pub use bundler::BundlerProvider;

mod error;
pub use error::{ProviderError, ProviderResult};

mod evm;
#[cfg(feature = "test-utils")]
pub use evm::MockEvmProvider;
pub use evm::EvmProvider;

mod paymaster;
#[cfg(feature = "test-utils")]
pub use paymaster::MockPaymasterProvider;
pub use paymaster::{PaymasterProvider, SponsorshipContext};
