//! Public key material.
//!
//! Key recovery and signature verification happen upstream in the signature
//! verification subsystem; authorization only ever compares keys for
//! equality and order.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;

/// A 32-byte Ed25519 public key.
#[serde_as]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PublicKey(#[serde_as(as = "Bytes")] pub [u8; 32]);

impl PublicKey {
    /// Deterministic test/fixture key derived from a single byte.
    pub fn from_byte(b: u8) -> Self {
        PublicKey([b; 32])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BCC")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}
