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

use std::time::Duration;

use alloy_primitives::{Address, B256};
use minter_provider::ProviderError;
use minter_types::policy::PolicyViolation;

/// Error enumeration for account operations
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// A validator could not be built
    #[error("validator construction failed: {0}")]
    Validator(String),
    /// The account could not be built
    #[error("account construction failed: {0}")]
    Construction(String),
    /// Calls could not be encoded for the account
    #[error("encoding failed: {0}")]
    Encoding(String),
    /// A call is outside the signing validator's policy
    #[error("policy violation: {0}")]
    PolicyViolation(#[from] PolicyViolation),
    /// Chain state needed to fill the operation could not be read
    #[error("failed to prepare user operation: {0}")]
    Prepare(ProviderError),
    /// The paymaster refused or failed to sponsor the operation
    #[error("sponsorship failed: {0}")]
    Sponsorship(ProviderError),
    /// Signing failed
    #[error(transparent)]
    Signing(#[from] minter_signer::Error),
    /// The bundler does not accept operations for this entry point
    #[error("bundler does not support entry point {0}")]
    UnsupportedEntryPoint(Address),
    /// The bundler rejected the operation
    #[error("submission failed: {0}")]
    Submission(ProviderError),
    /// Receipt lookup failed
    #[error("receipt lookup failed: {0}")]
    Receipt(ProviderError),
    /// No receipt before the deadline
    #[error("user operation {hash} not included within {timeout:?}")]
    ReceiptTimeout {
        /// User operation hash
        hash: B256,
        /// Deadline that passed
        timeout: Duration,
    },
}

/// Result of an account operation
pub type AccountResult<T> = Result<T, AccountError>;
