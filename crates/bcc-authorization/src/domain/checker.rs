//! # Authority Checker — Bounded Recursive Threshold Evaluation
//!
//! Decides whether a permission is satisfied by a provided key/permission
//! set under a delay budget. An authority is satisfied at delay `D` when a
//! weighted subset of its components reaches the threshold:
//!
//! - a key matches when it was provided with the transaction
//! - a wait matches when `D` covers its wait seconds
//! - a permission level matches when provided outright, or when the
//!   referenced authority is itself satisfied at `D` (bounded recursion)
//!
//! ## Recursion Budget
//!
//! Every descent into a nested permission level consumes one unit of the
//! depth budget; exhausting it fails the whole query with
//! `AuthorityTooHigh`. Cycles among permission references need no explicit
//! detection: the budget cuts them off. A plain counter travels through the
//! recursion; no visited set is allocated.
//!
//! ## Tally Order
//!
//! Within one authority, components tally greedily over the sorted lists:
//! waits by seconds ascending, then keys, then permission levels, with an
//! early exit once the threshold is reached. Duplicates were excluded when
//! the authority was validated.
//!
//! ## Key Usage
//!
//! Keys consumed by successful matches are tracked across all `satisfied`
//! calls on one checker instance; an authority that fails to reach its
//! threshold releases the keys it touched. The driver uses the final bitmap
//! to reject transactions bearing irrelevant signatures.

use super::errors::AuthorizationError;
use bcc_types::{Authority, Micros, PermissionLevel, PublicKey};
use std::collections::BTreeSet;

/// Host callback polled during long-running checks; returns an error to
/// abort the current evaluation.
pub type CheckTime<'a> = &'a dyn Fn() -> Result<(), AuthorizationError>;

/// Default no-op checktime.
pub fn noop_checktime() -> Result<(), AuthorizationError> {
    Ok(())
}

/// Evaluates weighted threshold authorities against provided keys,
/// permissions, and a delay budget.
///
/// `F` resolves a permission level to its authority; a `PermissionQuery`
/// failure there contributes zero weight (the referenced permission may have
/// been deleted out from under a link), while every other error aborts the
/// evaluation.
pub struct AuthorityChecker<'a, F>
where
    F: Fn(&PermissionLevel) -> Result<Authority, AuthorizationError>,
{
    authority_of: F,
    recursion_depth_limit: u16,
    provided_keys: Vec<PublicKey>,
    used_keys: Vec<bool>,
    provided_permissions: BTreeSet<PermissionLevel>,
    provided_delay: Micros,
    checktime: CheckTime<'a>,
}

impl<'a, F> AuthorityChecker<'a, F>
where
    F: Fn(&PermissionLevel) -> Result<Authority, AuthorizationError>,
{
    pub fn new(
        authority_of: F,
        recursion_depth_limit: u16,
        provided_keys: &BTreeSet<PublicKey>,
        provided_permissions: &BTreeSet<PermissionLevel>,
        provided_delay: Micros,
        checktime: CheckTime<'a>,
    ) -> Self {
        let provided_keys: Vec<PublicKey> = provided_keys.iter().copied().collect();
        let used_keys = vec![false; provided_keys.len()];
        AuthorityChecker {
            authority_of,
            recursion_depth_limit,
            provided_keys,
            used_keys,
            provided_permissions: provided_permissions.clone(),
            provided_delay,
            checktime,
        }
    }

    /// Whether `level` is satisfied at the construction-time delay.
    pub fn satisfied(&mut self, level: &PermissionLevel) -> Result<bool, AuthorizationError> {
        self.satisfied_at(level, self.provided_delay)
    }

    /// Whether `level` is satisfied at delay `delay`.
    pub fn satisfied_at(
        &mut self,
        level: &PermissionLevel,
        delay: Micros,
    ) -> Result<bool, AuthorizationError> {
        (self.checktime)()?;
        let auth = match (self.authority_of)(level) {
            Ok(auth) => auth,
            Err(AuthorizationError::PermissionQuery(_)) => return Ok(false),
            Err(e) => return Err(e),
        };
        self.authority_satisfied(&auth, delay, 0)
    }

    /// True when every provided key was consumed by some successful match.
    pub fn all_keys_used(&self) -> bool {
        self.used_keys.iter().all(|u| *u)
    }

    pub fn used_keys(&self) -> BTreeSet<PublicKey> {
        self.partition_keys(true)
    }

    pub fn unused_keys(&self) -> BTreeSet<PublicKey> {
        self.partition_keys(false)
    }

    fn partition_keys(&self, used: bool) -> BTreeSet<PublicKey> {
        self.provided_keys
            .iter()
            .zip(&self.used_keys)
            .filter(|(_, u)| **u == used)
            .map(|(k, _)| *k)
            .collect()
    }

    fn authority_satisfied(
        &mut self,
        auth: &Authority,
        delay: Micros,
        depth: u16,
    ) -> Result<bool, AuthorizationError> {
        // Keys consumed here are released again if this authority fails to
        // reach its threshold.
        let saved_keys = self.used_keys.clone();
        let threshold = u64::from(auth.threshold);
        let mut total: u64 = 0;

        for w in &auth.waits {
            if total >= threshold {
                break;
            }
            if delay >= Micros::seconds(i64::from(w.wait_sec)) {
                total += u64::from(w.weight);
            }
        }

        if total < threshold {
            for kw in &auth.keys {
                if let Ok(i) = self.provided_keys.binary_search(&kw.key) {
                    self.used_keys[i] = true;
                    total += u64::from(kw.weight);
                    if total >= threshold {
                        break;
                    }
                }
            }
        }

        if total < threshold {
            for pw in &auth.accounts {
                total += u64::from(self.permission_weight(pw.weight, &pw.permission, delay, depth)?);
                if total >= threshold {
                    break;
                }
            }
        }

        let ok = total >= threshold;
        if !ok {
            self.used_keys = saved_keys;
        }
        Ok(ok)
    }

    fn permission_weight(
        &mut self,
        weight: u16,
        level: &PermissionLevel,
        delay: Micros,
        depth: u16,
    ) -> Result<u16, AuthorizationError> {
        if self.provided_permissions.contains(level) {
            return Ok(weight);
        }
        if depth >= self.recursion_depth_limit {
            return Err(AuthorizationError::AuthorityTooHigh);
        }
        (self.checktime)()?;
        let auth = match (self.authority_of)(level) {
            Ok(auth) => auth,
            // Dangling reference: the named permission no longer exists.
            Err(AuthorizationError::PermissionQuery(_)) => return Ok(0),
            Err(e) => return Err(e),
        };
        if self.authority_satisfied(&auth, delay, depth + 1)? {
            Ok(weight)
        } else {
            Ok(0)
        }
    }
}
