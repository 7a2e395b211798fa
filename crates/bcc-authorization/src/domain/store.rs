//! # Permission Store — Multi-Index Rows
//!
//! Owns permission rows, their paired usage rows, and permission links.
//!
//! ## Indices
//!
//! - `by_id`: O(log n) lookup by dense permission id
//! - `by_owner`: O(log n) lookup by `(owner, name)`; also enforces the
//!   per-owner name uniqueness invariant
//! - `by_parent`: O(log n) child range scans for the delete check
//! - `by_action_name`: link lookup by `(owner, contract, action)`
//!
//! All indices are B-tree keyed, so every range scan is lexicographic on the
//! compound key. The authorization driver depends on that order being total
//! and stable.
//!
//! ## Invariants Enforced Here
//!
//! - id 0 is reserved for the root sentinel and never reassigned
//! - `(owner, name)` unique across non-zero permissions (insert check)
//! - every non-zero permission has exactly one usage row, created and
//!   removed in lockstep
//!
//! The acyclicity of the parent graph and the child-freedom delete rule are
//! enforced by the graph operations in the service layer.

use super::entities::{
    Permission, PermissionId, PermissionLink, PermissionUsage, RESERVED_PERMISSION_ID,
};
use super::errors::AuthorizationError;
use bcc_types::{AccountName, ActionName, Authority, PermissionName, TimePoint};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory multi-index store for the authorization subsystem.
///
/// Mutations execute within the host's transactional scope; the host rolls
/// the whole store back on failure, so no undo bookkeeping happens here.
#[derive(Clone, Debug, Default)]
pub struct PermissionIndex {
    permissions: BTreeMap<PermissionId, Permission>,
    usages: BTreeMap<PermissionId, PermissionUsage>,
    by_owner: BTreeMap<(AccountName, PermissionName), PermissionId>,
    by_parent: BTreeSet<(PermissionId, PermissionId)>,
    links: BTreeMap<(AccountName, AccountName, ActionName), PermissionLink>,
    next_permission_id: PermissionId,
    next_usage_id: PermissionId,
}

impl PermissionIndex {
    pub fn new() -> Self {
        PermissionIndex {
            next_permission_id: 1,
            next_usage_id: 1,
            ..Default::default()
        }
    }

    /// Reserves permission 0, the sentinel every parent chain terminates at.
    ///
    /// Genesis-only; snapshot restore rebuilds the sentinel from its emitted
    /// row instead.
    pub fn initialize(&mut self) {
        self.permissions
            .insert(RESERVED_PERMISSION_ID, Permission::reserved());
    }

    pub fn permission_count(&self) -> usize {
        self.permissions.len()
    }

    // =========================================================================
    // PERMISSION ROWS
    // =========================================================================

    pub fn find(&self, id: PermissionId) -> Option<&Permission> {
        self.permissions.get(&id)
    }

    pub fn get(&self, id: PermissionId) -> Result<&Permission, AuthorizationError> {
        self.permissions
            .get(&id)
            .ok_or_else(|| AuthorizationError::PermissionQuery(format!("no permission with id {id}")))
    }

    pub fn find_by_owner(&self, owner: &AccountName, name: &PermissionName) -> Option<&Permission> {
        let id = self.by_owner.get(&(owner.clone(), name.clone()))?;
        self.permissions.get(id)
    }

    /// Inserts a new permission row, assigning the next dense id.
    ///
    /// # Errors
    /// `PermissionQuery` if `(owner, name)` is already taken.
    pub fn insert_permission(
        &mut self,
        owner: AccountName,
        name: PermissionName,
        parent: PermissionId,
        auth: Authority,
        last_updated: TimePoint,
        usage_id: PermissionId,
    ) -> Result<&Permission, AuthorizationError> {
        let key = (owner.clone(), name.clone());
        if self.by_owner.contains_key(&key) {
            return Err(AuthorizationError::PermissionQuery(format!(
                "permission {owner}@{name} already exists"
            )));
        }
        let id = self.next_permission_id;
        self.next_permission_id += 1;

        let row = Permission {
            id,
            usage_id,
            parent,
            owner,
            name,
            last_updated,
            auth,
        };
        self.by_owner.insert(key, id);
        self.by_parent.insert((parent, id));
        self.permissions.insert(id, row);
        Ok(&self.permissions[&id])
    }

    /// Replaces a permission's authority and update instant.
    pub fn set_authority(
        &mut self,
        id: PermissionId,
        auth: Authority,
        last_updated: TimePoint,
    ) -> Result<(), AuthorizationError> {
        let row = self.permissions.get_mut(&id).ok_or_else(|| {
            AuthorizationError::PermissionQuery(format!("no permission with id {id}"))
        })?;
        row.auth = auth;
        row.last_updated = last_updated;
        Ok(())
    }

    /// Removes a permission row and its indices. The paired usage row is the
    /// caller's responsibility, as is the child-freedom check.
    pub fn remove_permission(&mut self, id: PermissionId) -> Result<(), AuthorizationError> {
        let row = self.permissions.remove(&id).ok_or_else(|| {
            AuthorizationError::PermissionQuery(format!("no permission with id {id}"))
        })?;
        self.by_owner.remove(&(row.owner.clone(), row.name.clone()));
        self.by_parent.remove(&(row.parent, id));
        Ok(())
    }

    /// True if any permission names `id` as its parent.
    pub fn has_children(&self, id: PermissionId) -> bool {
        self.by_parent
            .range((id, PermissionId::MIN)..=(id, PermissionId::MAX))
            .next()
            .is_some()
    }

    /// Permissions in ascending id order (snapshot emission order).
    pub fn iter_permissions(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.values()
    }

    // =========================================================================
    // USAGE ROWS
    // =========================================================================

    pub fn insert_usage(&mut self, last_used: TimePoint) -> PermissionId {
        let id = self.next_usage_id;
        self.next_usage_id += 1;
        self.usages.insert(id, PermissionUsage { id, last_used });
        id
    }

    pub fn usage(&self, usage_id: PermissionId) -> Result<&PermissionUsage, AuthorizationError> {
        self.usages.get(&usage_id).ok_or_else(|| {
            AuthorizationError::PermissionQuery(format!("no permission usage with id {usage_id}"))
        })
    }

    pub fn set_last_used(
        &mut self,
        usage_id: PermissionId,
        last_used: TimePoint,
    ) -> Result<(), AuthorizationError> {
        let row = self.usages.get_mut(&usage_id).ok_or_else(|| {
            AuthorizationError::PermissionQuery(format!("no permission usage with id {usage_id}"))
        })?;
        row.last_used = last_used;
        Ok(())
    }

    pub fn remove_usage(&mut self, usage_id: PermissionId) -> Result<(), AuthorizationError> {
        self.usages.remove(&usage_id).ok_or_else(|| {
            AuthorizationError::PermissionQuery(format!("no permission usage with id {usage_id}"))
        })?;
        Ok(())
    }

    // =========================================================================
    // PERMISSION LINKS
    // =========================================================================

    pub fn find_link(
        &self,
        owner: &AccountName,
        contract: &AccountName,
        action: &ActionName,
    ) -> Option<&PermissionLink> {
        self.links
            .get(&(owner.clone(), contract.clone(), action.clone()))
    }

    /// Inserts or replaces the link keyed by `(owner, contract, action)`.
    pub fn set_link(&mut self, link: PermissionLink) {
        let key = (link.owner.clone(), link.contract.clone(), link.action.clone());
        self.links.insert(key, link);
    }

    /// Removes a link; true if one existed.
    pub fn erase_link(
        &mut self,
        owner: &AccountName,
        contract: &AccountName,
        action: &ActionName,
    ) -> bool {
        self.links
            .remove(&(owner.clone(), contract.clone(), action.clone()))
            .is_some()
    }

    /// Links in ascending `(owner, contract, action)` order.
    pub fn iter_links(&self) -> impl Iterator<Item = &PermissionLink> {
        self.links.values()
    }

    // =========================================================================
    // STRUCTURAL SATISFACTION
    // =========================================================================

    /// Whether `candidate` structurally covers `min`: equal to it, or an
    /// ancestor of it. Walks `min` toward the root via `parent`, bounded by
    /// `max_depth` steps. Both must share an owner.
    pub fn satisfies(&self, candidate: &Permission, min: &Permission, max_depth: u16) -> bool {
        if candidate.owner != min.owner {
            return false;
        }
        let mut current = min;
        for _ in 0..=max_depth {
            if current.id == candidate.id {
                return true;
            }
            if current.parent == RESERVED_PERMISSION_ID {
                return false;
            }
            current = match self.permissions.get(&current.parent) {
                Some(p) => p,
                None => return false,
            };
        }
        false
    }
}
