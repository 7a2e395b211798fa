//! Shared harness for authorization scenarios.
//!
//! Builds a manager over the in-memory controller, seeds accounts with the
//! default owner/active tree, and assembles actions the way the transaction
//! layer would hand them over.

use bcc_authorization::{
    AuthorizationManager, GeneratedTransaction, MemoryController, PermissionId,
};
use bcc_types::{
    config, AccountName, Action, ActionName, Authority, Name, PermissionLevel, PublicKey,
    TimePoint, Transaction,
};
use serde::Serialize;
use std::collections::BTreeSet;

pub fn name(s: &str) -> Name {
    Name::new(s).unwrap()
}

pub fn level(actor: &str, permission: &str) -> PermissionLevel {
    PermissionLevel::new(name(actor), name(permission))
}

pub fn keyset(keys: &[PublicKey]) -> BTreeSet<PublicKey> {
    keys.iter().copied().collect()
}

pub fn levelset(levels: &[PermissionLevel]) -> BTreeSet<PermissionLevel> {
    levels.iter().cloned().collect()
}

/// A manager over a fresh chain at block time 1000s.
pub fn authz() -> AuthorizationManager<MemoryController> {
    let control = MemoryController::new();
    control.set_pending_block_time(TimePoint::from_seconds(1_000));
    let mut manager = AuthorizationManager::new(control);
    manager.initialize();
    manager
}

/// Creates the default owner/active tree for `account`, each permission
/// guarded by its own key. Returns (owner_id, active_id).
pub fn create_account(
    manager: &mut AuthorizationManager<MemoryController>,
    account: &str,
    owner_key: PublicKey,
    active_key: PublicKey,
) -> (PermissionId, PermissionId) {
    let owner = manager
        .create_permission(
            name(account),
            config::owner_name(),
            0,
            Authority::single_key(owner_key),
            None,
        )
        .unwrap()
        .id;
    let active = manager
        .create_permission(
            name(account),
            config::active_name(),
            owner,
            Authority::single_key(active_key),
            None,
        )
        .unwrap()
        .id;
    (owner, active)
}

/// An action on a regular (non-system) contract; the payload is opaque to
/// authorization.
pub fn contract_action(contract: &str, action: &str, auths: &[PermissionLevel]) -> Action {
    Action {
        account: name(contract),
        name: name(action),
        authorization: auths.to_vec(),
        data: vec![],
    }
}

/// An action on the system contract carrying a native payload.
pub fn system_action<T: Serialize>(
    action_name: ActionName,
    auths: &[PermissionLevel],
    payload: &T,
) -> Action {
    Action::from_payload(
        config::system_account_name(),
        action_name,
        auths.to_vec(),
        payload,
    )
    .unwrap()
}

/// Publishes a user-originated deferred transaction and returns its id.
pub fn push_deferred(
    manager: &AuthorizationManager<MemoryController>,
    original: &Transaction,
    published_sec: i64,
    delay_until_sec: i64,
    sender: Option<AccountName>,
) -> bcc_types::TransactionId {
    let trx_id = original.id().unwrap();
    manager
        .controller()
        .push_generated_transaction(GeneratedTransaction {
            trx_id,
            sender: sender.unwrap_or_else(Name::empty),
            published: TimePoint::from_seconds(published_sec),
            delay_until: TimePoint::from_seconds(delay_until_sec),
            packed_trx: original.pack().unwrap(),
        });
    trx_id
}
