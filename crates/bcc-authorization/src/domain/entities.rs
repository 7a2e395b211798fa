use bcc_types::{AccountName, ActionName, Authority, PermissionName, TimePoint, TransactionId};
use serde::{Deserialize, Serialize};

/// Stable dense permission identifier. Id 0 is reserved: the root sentinel
/// every parent chain terminates at.
pub type PermissionId = u64;

/// The reserved root sentinel id.
pub const RESERVED_PERMISSION_ID: PermissionId = 0;

/// One node of an account's permission tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    /// Paired usage record, created and removed in lockstep.
    pub usage_id: PermissionId,
    /// Parent permission, or 0 for top-level permissions.
    pub parent: PermissionId,
    pub owner: AccountName,
    pub name: PermissionName,
    /// Instant of the most recent authority change.
    pub last_updated: TimePoint,
    pub auth: Authority,
}

impl Permission {
    /// The reserved permission 0: empty names, zero threshold, empty lists,
    /// zero instant.
    pub fn reserved() -> Self {
        Permission {
            id: RESERVED_PERMISSION_ID,
            usage_id: 0,
            parent: 0,
            owner: AccountName::empty(),
            name: PermissionName::empty(),
            last_updated: TimePoint::ZERO,
            auth: Authority::default(),
        }
    }
}

/// Usage record paired one-to-one with a permission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionUsage {
    pub id: PermissionId,
    pub last_used: TimePoint,
}

/// Persisted mapping from `(owner, contract, action)` to a required
/// permission name. An empty action means "contract-wide default".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLink {
    pub owner: AccountName,
    pub contract: AccountName,
    pub action: ActionName,
    pub required_permission: PermissionName,
}

/// Consensus configuration consumed from the controller's global properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Provided delays at or above this bound (seconds) are treated as
    /// unbounded.
    pub max_transaction_delay_sec: u32,
    /// Bound on parent-chain walks and checker recursion.
    pub max_authority_depth: u16,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            max_transaction_delay_sec: 45 * 24 * 3600,
            max_authority_depth: 6,
        }
    }
}

/// A deferred generated-transaction record, read through the controller when
/// authorizing `canceldelay`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTransaction {
    pub trx_id: TransactionId,
    /// Originating contract account; empty for user-originated delayed
    /// transactions.
    pub sender: AccountName,
    pub published: TimePoint,
    pub delay_until: TimePoint,
    /// Packed original transaction.
    pub packed_trx: Vec<u8>,
}
