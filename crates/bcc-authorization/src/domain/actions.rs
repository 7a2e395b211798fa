//! # Native Authorization Actions
//!
//! The five permission-management actions of the system contract. Dispatch
//! is a tagged switch on `(contract, action_name)`; each payload is a
//! distinct record type sharing the common bincode decoder on
//! [`bcc_types::Action`].
//!
//! None of the five may appear as a permission-link target; they are the
//! "unlinkable" actions.

use bcc_types::{
    AccountName, ActionName, Authority, Name, PermissionLevel, PermissionName, TransactionId,
};
use serde::{Deserialize, Serialize};

/// Creates or replaces a permission's authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAuth {
    pub account: AccountName,
    pub permission: PermissionName,
    pub parent: PermissionName,
    pub auth: Authority,
}

/// Deletes a child-free permission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAuth {
    pub account: AccountName,
    pub permission: PermissionName,
}

/// Links `(account, contract, action)` to a required permission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAuth {
    pub account: AccountName,
    pub contract: AccountName,
    pub action: ActionName,
    pub requirement: PermissionName,
}

/// Removes a previously created link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlinkAuth {
    pub account: AccountName,
    pub contract: AccountName,
    pub action: ActionName,
}

/// Cancels a user-originated deferred transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelDelay {
    pub canceling_auth: PermissionLevel,
    pub trx_id: TransactionId,
}

// Literals here are all within the name alphabet, so construction cannot
// fail.
fn static_name(s: &'static str) -> ActionName {
    Name::new(s).expect("action name literal is valid")
}

impl UpdateAuth {
    pub fn action_name() -> ActionName {
        static_name("updateauth")
    }
}

impl DeleteAuth {
    pub fn action_name() -> ActionName {
        static_name("deleteauth")
    }
}

impl LinkAuth {
    pub fn action_name() -> ActionName {
        static_name("linkauth")
    }
}

impl UnlinkAuth {
    pub fn action_name() -> ActionName {
        static_name("unlinkauth")
    }
}

impl CancelDelay {
    pub fn action_name() -> ActionName {
        static_name("canceldelay")
    }
}

/// Whether `action` is one of the five actions forbidden as link targets.
pub fn is_unlinkable_action(action: &ActionName) -> bool {
    *action == UpdateAuth::action_name()
        || *action == DeleteAuth::action_name()
        || *action == LinkAuth::action_name()
        || *action == UnlinkAuth::action_name()
        || *action == CancelDelay::action_name()
}
