//! # Snapshot Row Shapes
//!
//! Two sections round-trip the authorization state: "permission" and
//! "permission_link". Usage rows are not emitted separately; each permission
//! row inlines its `last_used` instant. Parents are emitted by name and
//! resolved back to ids through the `(owner, name)` index on read.
//!
//! Reserved permission 0 is emitted like any other row but must carry exact
//! sentinel values; restore rejects anything else.

use bcc_types::{AccountName, ActionName, Authority, PermissionName, TimePoint};
use serde::{Deserialize, Serialize};

/// One row of the "permission" section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPermissionRow {
    /// Parent permission name within the same owner; empty for top-level
    /// permissions and for the reserved row.
    pub parent: PermissionName,
    pub owner: AccountName,
    pub name: PermissionName,
    pub last_updated: TimePoint,
    pub auth: Authority,
    /// Inlined usage instant.
    pub last_used: TimePoint,
}

impl SnapshotPermissionRow {
    /// Whether this row carries the exact sentinel values of reserved
    /// permission 0.
    pub fn is_reserved_sentinel(&self) -> bool {
        self.parent.is_empty()
            && self.owner.is_empty()
            && self.name.is_empty()
            && self.auth.threshold == 0
            && self.auth.keys.is_empty()
            && self.auth.accounts.is_empty()
            && self.auth.waits.is_empty()
            && self.last_updated == TimePoint::ZERO
    }
}

/// One row of the "permission_link" section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPermissionLinkRow {
    pub owner: AccountName,
    pub contract: AccountName,
    pub action: ActionName,
    pub required_permission: PermissionName,
}

/// The authorization manager's complete snapshot contribution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationSnapshot {
    pub permissions: Vec<SnapshotPermissionRow>,
    pub permission_links: Vec<SnapshotPermissionLinkRow>,
}
