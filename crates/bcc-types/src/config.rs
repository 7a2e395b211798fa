//! Well-known chain names.

use crate::names::{AccountName, Name, PermissionName};

/// The chain's system account, owner of the native authorization actions.
pub fn system_account_name() -> AccountName {
    Name::well_known("bccio")
}

/// Default minimum permission when no link overrides it.
pub fn active_name() -> PermissionName {
    Name::well_known("active")
}

/// Root permission of every account's tree.
pub fn owner_name() -> PermissionName {
    Name::well_known("owner")
}

/// Wildcard link target: any declared authorization suffices.
pub fn any_name() -> PermissionName {
    Name::well_known("bccio.any")
}
