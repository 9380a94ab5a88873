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

use std::fmt;

use alloy_primitives::{Address, Bytes, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// A secp256k1 key held in memory.
///
/// The key is never printed; `Debug` only shows the address.
#[derive(Clone)]
pub struct LocalSigner {
    inner: PrivateKeySigner,
}

impl LocalSigner {
    /// Parse a hex encoded private key, with or without a `0x` prefix
    pub fn from_secret(private_key: &SecretString) -> Result<Self> {
        let inner = private_key
            .expose_secret()
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|e| Error::InvalidKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Generate a fresh key from the OS random source
    pub fn random() -> Self {
        Self {
            inner: PrivateKeySigner::random(),
        }
    }

    /// Address controlled by the key
    pub fn address(&self) -> Address {
        self.inner.address()
    }

    /// Sign a message with the EIP-191 personal message prefix.
    ///
    /// Returns the 65 byte `r || s || v` encoding with `v` in {27, 28}.
    pub fn sign_message(&self, message: &[u8]) -> Result<Bytes> {
        let signature = self.inner.sign_message_sync(message)?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }

    /// Sign a 32 byte digest as is
    pub fn sign_hash(&self, hash: &B256) -> Result<Bytes> {
        let signature = self.inner.sign_hash_sync(hash)?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, keccak256, Signature};

    use super::*;

    // anvil's first dev account
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_from_secret() {
        let signer = LocalSigner::from_secret(&SecretString::from(DEV_KEY.to_string())).unwrap();
        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );

        let unprefixed =
            LocalSigner::from_secret(&SecretString::from(DEV_KEY[2..].to_string())).unwrap();
        assert_eq!(unprefixed.address(), signer.address());
    }

    #[test]
    fn test_malformed_keys() {
        for key in ["", "0x", "0x1234", "not hex at all", &DEV_KEY[..60]] {
            assert!(
                matches!(
                    LocalSigner::from_secret(&SecretString::from(key.to_string())),
                    Err(Error::InvalidKey(_))
                ),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_random_signers_differ() {
        assert_ne!(LocalSigner::random().address(), LocalSigner::random().address());
    }

    #[test]
    fn test_debug_hides_key() {
        let signer = LocalSigner::from_secret(&SecretString::from(DEV_KEY.to_string())).unwrap();
        let debug = format!("{signer:?}");
        assert!(!debug.contains(&DEV_KEY[2..]));
        assert!(debug.contains("address"));
    }

    #[test]
    fn test_signatures_recover() {
        let signer = LocalSigner::random();
        let hash = keccak256(b"user operation");

        let sig = signer.sign_message(hash.as_slice()).unwrap();
        assert_eq!(sig.len(), 65);
        assert!(sig[64] == 27 || sig[64] == 28);
        let recovered = Signature::try_from(&sig[..])
            .unwrap()
            .recover_address_from_msg(hash.as_slice())
            .unwrap();
        assert_eq!(recovered, signer.address());

        let sig = signer.sign_hash(&hash).unwrap();
        let recovered = Signature::try_from(&sig[..])
            .unwrap()
            .recover_address_from_prehash(&hash)
            .unwrap();
        assert_eq!(recovered, signer.address());
    }
}
