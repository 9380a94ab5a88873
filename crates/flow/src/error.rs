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

use alloy_primitives::B256;
use minter_account::AccountError;
use minter_types::policy::PolicyViolation;

/// Why a flow run failed. Every failure aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum MintError {
    /// Missing or malformed configuration
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A validator could not be built
    #[error("validator construction failed: {0}")]
    ValidatorConstruction(String),
    /// The account could not be built
    #[error("account construction failed: {0}")]
    AccountConstruction(String),
    /// The paymaster refused or failed to sponsor the operation
    #[error("sponsorship failed: {0}")]
    Sponsorship(String),
    /// Call arguments or call data could not be encoded
    #[error("encoding failed: {0}")]
    Encoding(String),
    /// The operation was outside the worker's policy
    #[error("policy violation: {0}")]
    PolicyViolation(#[from] PolicyViolation),
    /// The operation could not be prepared, signed or submitted
    #[error("submission failed: {0}")]
    Submission(String),
    /// No receipt before the deadline
    #[error("user operation {hash} not included within {timeout:?}")]
    ReceiptTimeout {
        /// User operation hash
        hash: B256,
        /// Deadline that passed
        timeout: Duration,
    },
}

impl From<AccountError> for MintError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::Validator(e) => MintError::ValidatorConstruction(e),
            AccountError::Construction(e) => MintError::AccountConstruction(e),
            AccountError::Encoding(e) => MintError::Encoding(e),
            AccountError::PolicyViolation(e) => MintError::PolicyViolation(e),
            AccountError::Sponsorship(e) => MintError::Sponsorship(e.to_string()),
            AccountError::ReceiptTimeout { hash, timeout } => {
                MintError::ReceiptTimeout { hash, timeout }
            }
            e @ (AccountError::Prepare(_)
            | AccountError::Signing(_)
            | AccountError::UnsupportedEntryPoint(_)
            | AccountError::Submission(_)
            | AccountError::Receipt(_)) => MintError::Submission(e.to_string()),
        }
    }
}
