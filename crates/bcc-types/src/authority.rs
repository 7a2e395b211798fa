//! # Weighted Threshold Authorities
//!
//! An `Authority` is the heart of the permission system: a threshold plus
//! three weighted component lists (keys, permission levels, waits). A
//! permission is satisfied when the weights of its matched components reach
//! the threshold.
//!
//! ## Shape Invariants
//!
//! - `threshold > 0`
//! - each component list is strictly sorted and deduplicated by its
//!   non-weight component
//! - every weight is nonzero
//! - the (saturating) sum of all weights reaches the threshold
//!
//! [`Authority::validate`] checks all four; stores must refuse authorities
//! that fail it.

use crate::keys::PublicKey;
use crate::names::{AccountName, PermissionName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An `(account, permission)` pair naming one permission in one account's
/// tree.
///
/// Orders by actor, ties broken by permission name. This ordering is
/// consensus-critical: authorization obligations are discharged in ascending
/// `PermissionLevel` order.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PermissionLevel {
    pub actor: AccountName,
    pub permission: PermissionName,
}

impl PermissionLevel {
    pub fn new(actor: AccountName, permission: PermissionName) -> Self {
        PermissionLevel { actor, permission }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.actor, self.permission)
    }
}

/// A public key contributing `weight` when provided with the transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyWeight {
    pub key: PublicKey,
    pub weight: u16,
}

/// A permission level contributing `weight` when provided outright or
/// recursively satisfied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLevelWeight {
    pub permission: PermissionLevel,
    pub weight: u16,
}

/// A wait contributing `weight` when the effective transaction delay is at
/// least `wait_sec`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitWeight {
    pub wait_sec: u32,
    pub weight: u16,
}

/// A weighted threshold combination of keys, permission levels, and waits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub threshold: u32,
    pub keys: Vec<KeyWeight>,
    pub accounts: Vec<PermissionLevelWeight>,
    pub waits: Vec<WaitWeight>,
}

impl Authority {
    /// Builds an authority, sorting each component list into its canonical
    /// order. Does not validate; call [`Authority::validate`] before storing.
    pub fn new(
        threshold: u32,
        mut keys: Vec<KeyWeight>,
        mut accounts: Vec<PermissionLevelWeight>,
        mut waits: Vec<WaitWeight>,
    ) -> Self {
        keys.sort_by(|a, b| a.key.cmp(&b.key));
        accounts.sort_by(|a, b| a.permission.cmp(&b.permission));
        waits.sort_by(|a, b| a.wait_sec.cmp(&b.wait_sec));
        Authority {
            threshold,
            keys,
            accounts,
            waits,
        }
    }

    /// Single-key authority with threshold 1.
    pub fn single_key(key: PublicKey) -> Self {
        Authority {
            threshold: 1,
            keys: vec![KeyWeight { key, weight: 1 }],
            accounts: vec![],
            waits: vec![],
        }
    }

    /// Single delegated-permission authority with threshold 1.
    pub fn single_account(permission: PermissionLevel) -> Self {
        Authority {
            threshold: 1,
            keys: vec![],
            accounts: vec![PermissionLevelWeight {
                permission,
                weight: 1,
            }],
            waits: vec![],
        }
    }

    /// Saturating sum of all component weights.
    pub fn total_weight(&self) -> u32 {
        let mut total: u32 = 0;
        for k in &self.keys {
            total = total.saturating_add(u32::from(k.weight));
        }
        for a in &self.accounts {
            total = total.saturating_add(u32::from(a.weight));
        }
        for w in &self.waits {
            total = total.saturating_add(u32::from(w.weight));
        }
        total
    }

    /// Checks the shape invariants.
    pub fn validate(&self) -> bool {
        if self.threshold == 0 {
            return false;
        }
        let keys_ok = self.keys.windows(2).all(|w| w[0].key < w[1].key)
            && self.keys.iter().all(|k| k.weight > 0);
        let accounts_ok = self
            .accounts
            .windows(2)
            .all(|w| w[0].permission < w[1].permission)
            && self.accounts.iter().all(|a| a.weight > 0);
        let waits_ok = self.waits.windows(2).all(|w| w[0].wait_sec < w[1].wait_sec)
            && self.waits.iter().all(|w| w.weight > 0);
        keys_ok && accounts_ok && waits_ok && self.total_weight() >= self.threshold
    }
}
