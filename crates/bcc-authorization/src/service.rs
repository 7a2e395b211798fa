//! # Authorization Manager Service
//!
//! Composes the permission store, the linkage resolver, and the authority
//! checker behind the controller port. This is the only writer of the
//! permission graph; authorization checking itself is read-only.
//!
//! ## Native Action Special Cases
//!
//! Actions on the system account dispatch to dedicated sub-checks before
//! the generic minimum-permission rule:
//!
//! | Action | Minimum authority |
//! |--------------|---------------------------------------------|
//! | `updateauth` | The affected permission, or its declared parent when creating |
//! | `deleteauth` | The permission being deleted |
//! | `linkauth` | The link target resolved via the linkage resolver |
//! | `unlinkauth` | The currently linked permission |
//! | `canceldelay`| The canceling authority named in the action |
//!
//! `canceldelay` additionally contributes the deferred transaction's
//! remaining delay to its action's obligation.

use crate::domain::{
    is_unlinkable_action, AuthorityChecker, AuthorizationError, AuthorizationSnapshot, CancelDelay,
    CheckTime, DeleteAuth, LinkAuth, Permission, PermissionId, PermissionIndex, PermissionLink,
    SnapshotPermissionLinkRow, SnapshotPermissionRow, UnlinkAuth, UpdateAuth,
    RESERVED_PERMISSION_ID,
};
use crate::domain::checker::noop_checktime;
use crate::ports::{ChainController, ProtocolFeature};
use bcc_types::{
    config, AccountName, Action, ActionName, Authority, Micros, PermissionLevel, PermissionName,
    PublicKey, TimePoint, Transaction, TransactionId,
};
use std::collections::{BTreeMap, BTreeSet};

fn trx_id_hex(trx_id: &TransactionId) -> String {
    trx_id.iter().map(|b| format!("{b:02x}")).collect()
}

/// The authorization manager: owns the permission graph, resolves linkages,
/// and drives transaction authorization.
pub struct AuthorizationManager<C: ChainController> {
    control: C,
    db: PermissionIndex,
}

impl<C: ChainController> AuthorizationManager<C> {
    pub fn new(control: C) -> Self {
        AuthorizationManager {
            control,
            db: PermissionIndex::new(),
        }
    }

    /// Reserves permission 0. Genesis-only; snapshot restore rebuilds the
    /// sentinel from its emitted row instead.
    pub fn initialize(&mut self) {
        self.db.initialize();
    }

    pub fn controller(&self) -> &C {
        &self.control
    }

    pub fn permission_index(&self) -> &PermissionIndex {
        &self.db
    }

    // =========================================================================
    // PERMISSION GRAPH OPERATIONS
    // =========================================================================

    /// Creates a permission and its paired usage record.
    ///
    /// A zero or omitted `initial_creation_time` means "now": the
    /// controller's pending block time.
    ///
    /// # Errors
    /// - `InvalidAuthority` if `auth` violates its shape invariants
    /// - `PermissionQuery` if `parent` does not exist or `(account, name)`
    ///   is already taken
    pub fn create_permission(
        &mut self,
        account: AccountName,
        name: PermissionName,
        parent: PermissionId,
        auth: Authority,
        initial_creation_time: Option<TimePoint>,
    ) -> Result<&Permission, AuthorizationError> {
        if !auth.validate() {
            return Err(AuthorizationError::InvalidAuthority(format!(
                "authority for {account}@{name} fails validation"
            )));
        }
        if parent != RESERVED_PERMISSION_ID {
            self.db.get(parent)?;
        }

        let creation_time = match initial_creation_time {
            Some(t) if t != TimePoint::ZERO => t,
            _ => self.control.pending_block_time(),
        };

        let usage_id = self.db.insert_usage(creation_time);
        let perm = self
            .db
            .insert_permission(account, name, parent, auth, creation_time, usage_id)?;
        tracing::debug!(
            "[authz] created permission {}@{} (id {}, parent {})",
            perm.owner,
            perm.name,
            perm.id,
            perm.parent
        );
        Ok(perm)
    }

    /// Replaces a permission's authority; `last_updated` becomes the pending
    /// block time. Parent and name never change here.
    pub fn modify_permission(
        &mut self,
        id: PermissionId,
        auth: Authority,
    ) -> Result<(), AuthorizationError> {
        if id == RESERVED_PERMISSION_ID {
            return Err(AuthorizationError::ActionValidate(
                "Cannot modify reserved permission 0.".to_string(),
            ));
        }
        if !auth.validate() {
            return Err(AuthorizationError::InvalidAuthority(format!(
                "replacement authority for permission id {id} fails validation"
            )));
        }
        let now = self.control.pending_block_time();
        self.db.set_authority(id, auth, now)?;
        tracing::debug!("[authz] modified permission id {}", id);
        Ok(())
    }

    /// Removes a permission and its usage record.
    ///
    /// # Errors
    /// `ActionValidate` if any permission still names this one as parent.
    pub fn remove_permission(&mut self, id: PermissionId) -> Result<(), AuthorizationError> {
        if id == RESERVED_PERMISSION_ID {
            return Err(AuthorizationError::ActionValidate(
                "Cannot remove reserved permission 0.".to_string(),
            ));
        }
        if self.db.has_children(id) {
            return Err(AuthorizationError::ActionValidate(
                "Cannot remove a permission which has children. Remove the children first."
                    .to_string(),
            ));
        }
        let usage_id = self.db.get(id)?.usage_id;
        self.db.remove_usage(usage_id)?;
        self.db.remove_permission(id)?;
        tracing::debug!("[authz] removed permission id {}", id);
        Ok(())
    }

    /// Stamps the permission's usage record with the pending block time.
    /// Called once per authorizing permission per successful transaction.
    pub fn update_permission_usage(&mut self, id: PermissionId) -> Result<(), AuthorizationError> {
        let usage_id = self.db.get(id)?.usage_id;
        let now = self.control.pending_block_time();
        self.db.set_last_used(usage_id, now)
    }

    pub fn get_permission_last_used(
        &self,
        id: PermissionId,
    ) -> Result<TimePoint, AuthorizationError> {
        let usage_id = self.db.get(id)?.usage_id;
        Ok(self.db.usage(usage_id)?.last_used)
    }

    /// Looks up a permission by level; `Ok(None)` when absent.
    ///
    /// # Errors
    /// `InvalidPermission` on an empty actor or permission name.
    pub fn find_permission(
        &self,
        level: &PermissionLevel,
    ) -> Result<Option<&Permission>, AuthorizationError> {
        if level.actor.is_empty() || level.permission.is_empty() {
            return Err(AuthorizationError::InvalidPermission(level.clone()));
        }
        Ok(self.db.find_by_owner(&level.actor, &level.permission))
    }

    /// Like [`AuthorizationManager::find_permission`] but absence is an
    /// error.
    pub fn get_permission(
        &self,
        level: &PermissionLevel,
    ) -> Result<&Permission, AuthorizationError> {
        self.find_permission(level)?.ok_or_else(|| {
            AuthorizationError::PermissionQuery(format!("failed to retrieve permission: {level}"))
        })
    }

    // =========================================================================
    // PERMISSION LINKS
    // =========================================================================

    /// Creates or replaces the link `(owner, contract, action) →
    /// requirement`.
    ///
    /// # Errors
    /// `PermissionQuery` if `requirement` does not name one of `owner`'s
    /// permissions (the wildcard sentinel is always linkable).
    pub fn create_link(
        &mut self,
        owner: AccountName,
        contract: AccountName,
        action: ActionName,
        requirement: PermissionName,
    ) -> Result<(), AuthorizationError> {
        if requirement != config::any_name() {
            self.get_permission(&PermissionLevel::new(owner.clone(), requirement.clone()))?;
        }
        tracing::debug!(
            "[authz] linked {}::{} for {} to {}",
            contract,
            action,
            owner,
            requirement
        );
        self.db.set_link(PermissionLink {
            owner,
            contract,
            action,
            required_permission: requirement,
        });
        Ok(())
    }

    /// Removes a link; `Ok(false)` when none existed.
    pub fn remove_link(
        &mut self,
        owner: &AccountName,
        contract: &AccountName,
        action: &ActionName,
    ) -> Result<bool, AuthorizationError> {
        Ok(self.db.erase_link(owner, contract, action))
    }

    // =========================================================================
    // LINKAGE RESOLVER
    // =========================================================================

    /// Resolves the linked permission for `(authorizer, contract, action)`:
    /// the exact link first, then the contract-wide default.
    pub fn lookup_linked_permission(
        &self,
        authorizer: &AccountName,
        contract: &AccountName,
        action: &ActionName,
    ) -> Option<PermissionName> {
        let link = self
            .db
            .find_link(authorizer, contract, action)
            .or_else(|| self.db.find_link(authorizer, contract, &ActionName::empty()))?;
        Some(link.required_permission.clone())
    }

    /// Resolves the minimum permission required to authorize
    /// `(contract, action)` for `authorizer`.
    ///
    /// Returns `None` when the link targets the "any authorization"
    /// wildcard; defaults to `active` when no link exists.
    ///
    /// # Errors
    /// `UnlinkableMinPermissionAction` when called on one of the native
    /// authorization actions, which are never routed through linkage.
    pub fn lookup_minimum_permission(
        &self,
        authorizer: &AccountName,
        contract: &AccountName,
        action: &ActionName,
    ) -> Result<Option<PermissionName>, AuthorizationError> {
        if *contract == config::system_account_name() && is_unlinkable_action(action) {
            return Err(AuthorizationError::UnlinkableMinPermissionAction(
                action.clone(),
            ));
        }

        match self.lookup_linked_permission(authorizer, contract, action) {
            None => Ok(Some(config::active_name())),
            Some(linked) if linked == config::any_name() => Ok(None),
            Some(linked) => Ok(Some(linked)),
        }
    }

    // =========================================================================
    // NATIVE ACTION SUB-CHECKS
    // =========================================================================

    fn sole_declared_auth<'x>(
        auths: &'x [PermissionLevel],
        action: &str,
        account: Option<&AccountName>,
    ) -> Result<&'x PermissionLevel, AuthorizationError> {
        if auths.len() != 1 {
            return Err(AuthorizationError::IrrelevantAuth(format!(
                "{action} action should only have one declared authorization"
            )));
        }
        let auth = &auths[0];
        if let Some(account) = account {
            if auth.actor != *account {
                return Err(AuthorizationError::IrrelevantAuth(
                    "the owner of the affected permission needs to be the actor of the \
                     declared authorization"
                        .to_string(),
                ));
            }
        }
        Ok(auth)
    }

    /// Requires that `declared` structurally covers `min`: `declared` lies
    /// on the path from `min` toward the root of its tree.
    fn assert_satisfies(
        &self,
        declared: &PermissionLevel,
        min: &Permission,
        context: &str,
    ) -> Result<(), AuthorizationError> {
        let declared_perm = self.get_permission(declared)?;
        let max_depth = self.control.chain_config().max_authority_depth;
        if !self.db.satisfies(declared_perm, min, max_depth) {
            return Err(AuthorizationError::IrrelevantAuth(format!(
                "{context} declares irrelevant authority '{declared}'; minimum authority is {}",
                PermissionLevel::new(min.owner.clone(), min.name.clone())
            )));
        }
        Ok(())
    }

    pub fn check_updateauth_authorization(
        &self,
        update: &UpdateAuth,
        auths: &[PermissionLevel],
    ) -> Result<(), AuthorizationError> {
        let auth = Self::sole_declared_auth(auths, "updateauth", Some(&update.account))?;

        // An existing permission is its own minimum; a new one is guarded by
        // the parent named in the action.
        let target = PermissionLevel::new(update.account.clone(), update.permission.clone());
        let min = match self.find_permission(&target)? {
            Some(existing) => existing,
            None => self.get_permission(&PermissionLevel::new(
                update.account.clone(),
                update.parent.clone(),
            ))?,
        };

        self.assert_satisfies(auth, min, "updateauth action")
    }

    pub fn check_deleteauth_authorization(
        &self,
        del: &DeleteAuth,
        auths: &[PermissionLevel],
    ) -> Result<(), AuthorizationError> {
        let auth = Self::sole_declared_auth(auths, "deleteauth", Some(&del.account))?;
        let min = self.get_permission(&PermissionLevel::new(
            del.account.clone(),
            del.permission.clone(),
        ))?;
        self.assert_satisfies(auth, min, "deleteauth action")
    }

    pub fn check_linkauth_authorization(
        &self,
        link: &LinkAuth,
        auths: &[PermissionLevel],
    ) -> Result<(), AuthorizationError> {
        let auth = Self::sole_declared_auth(auths, "linkauth", Some(&link.account))?;

        let restriction_in_force = link.contract == config::system_account_name()
            || !self
                .control
                .is_builtin_activated(ProtocolFeature::FixLinkauthRestriction);
        if restriction_in_force && is_unlinkable_action(&link.action) {
            return Err(AuthorizationError::ActionValidate(format!(
                "Cannot link bccio::{} to a minimum permission",
                link.action
            )));
        }

        let linked_permission_name =
            self.lookup_minimum_permission(&link.account, &link.contract, &link.action)?;

        // Linked to the "any" wildcard: nothing further to satisfy.
        let Some(linked_permission_name) = linked_permission_name else {
            return Ok(());
        };

        let min = self.get_permission(&PermissionLevel::new(
            link.account.clone(),
            linked_permission_name,
        ))?;
        self.assert_satisfies(auth, min, "link action")
    }

    pub fn check_unlinkauth_authorization(
        &self,
        unlink: &UnlinkAuth,
        auths: &[PermissionLevel],
    ) -> Result<(), AuthorizationError> {
        let auth = Self::sole_declared_auth(auths, "unlink", Some(&unlink.account))?;

        let unlinked_permission_name =
            self.lookup_linked_permission(&unlink.account, &unlink.contract, &unlink.action);
        let Some(unlinked_permission_name) = unlinked_permission_name else {
            return Err(AuthorizationError::Transaction(format!(
                "cannot unlink non-existent permission link of account '{}' for actions \
                 matching '{}::{}'",
                unlink.account, unlink.contract, unlink.action
            )));
        };

        if unlinked_permission_name == config::any_name() {
            return Ok(());
        }

        let min = self.get_permission(&PermissionLevel::new(
            unlink.account.clone(),
            unlinked_permission_name,
        ))?;
        self.assert_satisfies(auth, min, "unlink action")
    }

    /// Checks a `canceldelay` action and returns the canceled transaction's
    /// delay as a contribution to this action's obligation.
    pub fn check_canceldelay_authorization(
        &self,
        cancel: &CancelDelay,
        auths: &[PermissionLevel],
    ) -> Result<Micros, AuthorizationError> {
        let auth = Self::sole_declared_auth(auths, "canceldelay", None)?;
        let min = self.get_permission(&cancel.canceling_auth)?;
        self.assert_satisfies(auth, min, "canceldelay action")?;

        let gtx = self
            .control
            .find_generated_transaction(&cancel.trx_id)
            .filter(|gtx| gtx.sender.is_empty())
            .ok_or_else(|| AuthorizationError::TxNotFound(trx_id_hex(&cancel.trx_id)))?;

        let trx = Transaction::unpack(&gtx.packed_trx)?;
        let found = trx
            .actions
            .iter()
            .flat_map(|act| &act.authorization)
            .any(|declared| *declared == cancel.canceling_auth);
        if !found {
            return Err(AuthorizationError::ActionValidate(
                "canceling_auth in canceldelay action was not found as authorization in the \
                 original delayed transaction"
                    .to_string(),
            ));
        }

        Ok(gtx.delay_until - gtx.published)
    }

    // =========================================================================
    // TRANSACTION AUTHORIZATION DRIVER
    // =========================================================================

    /// Checks authorization across a transaction's actions.
    ///
    /// Builds one authority checker for the whole call, applies the native
    /// special cases, assembles the `(declared authorization → delay)`
    /// obligation map (keeping the minimum delay on collision), and
    /// discharges obligations in ascending `(actor, permission)` order.
    ///
    /// Unless `allow_unused_keys` is set, every provided key must have been
    /// consumed by some successful match.
    #[allow(clippy::too_many_arguments)]
    pub fn check_authorization(
        &self,
        actions: &[Action],
        provided_keys: &BTreeSet<PublicKey>,
        provided_permissions: &BTreeSet<PermissionLevel>,
        provided_delay: Micros,
        checktime: Option<CheckTime<'_>>,
        allow_unused_keys: bool,
        satisfied_authorizations: &BTreeSet<PermissionLevel>,
    ) -> Result<(), AuthorizationError> {
        let checktime: CheckTime<'_> = checktime.unwrap_or(&noop_checktime);

        let chain_config = self.control.chain_config();
        let delay_max_limit = Micros::seconds(i64::from(chain_config.max_transaction_delay_sec));
        let effective_provided_delay = if provided_delay >= delay_max_limit {
            Micros::MAX
        } else {
            provided_delay
        };

        let mut checker = AuthorityChecker::new(
            |level: &PermissionLevel| self.get_permission(level).map(|p| p.auth.clone()),
            chain_config.max_authority_depth,
            provided_keys,
            provided_permissions,
            effective_provided_delay,
            checktime,
        );

        let mut permissions_to_satisfy: BTreeMap<PermissionLevel, Micros> = BTreeMap::new();

        for act in actions {
            let mut special_case = false;
            let mut delay = effective_provided_delay;

            if act.account == config::system_account_name() {
                special_case = true;

                if act.name == UpdateAuth::action_name() {
                    self.check_updateauth_authorization(&act.data_as()?, &act.authorization)?;
                } else if act.name == DeleteAuth::action_name() {
                    self.check_deleteauth_authorization(&act.data_as()?, &act.authorization)?;
                } else if act.name == LinkAuth::action_name() {
                    self.check_linkauth_authorization(&act.data_as()?, &act.authorization)?;
                } else if act.name == UnlinkAuth::action_name() {
                    self.check_unlinkauth_authorization(&act.data_as()?, &act.authorization)?;
                } else if act.name == CancelDelay::action_name() {
                    let contributed =
                        self.check_canceldelay_authorization(&act.data_as()?, &act.authorization)?;
                    delay = delay.max(contributed);
                } else {
                    special_case = false;
                }
            }

            for declared_auth in &act.authorization {
                checktime()?;

                if !special_case {
                    let min_permission_name = self.lookup_minimum_permission(
                        &declared_auth.actor,
                        &act.account,
                        &act.name,
                    )?;
                    // Only the "any" wildcard leaves this empty; special
                    // cases were already handled above.
                    if let Some(min_permission_name) = min_permission_name {
                        let min = self.get_permission(&PermissionLevel::new(
                            declared_auth.actor.clone(),
                            min_permission_name,
                        ))?;
                        self.assert_satisfies(declared_auth, min, "action")?;
                    }
                }

                if !satisfied_authorizations.contains(declared_auth) {
                    permissions_to_satisfy
                        .entry(declared_auth.clone())
                        .and_modify(|existing| {
                            // A permission covering multiple actions must
                            // meet the tightest delay among them.
                            if *existing > delay {
                                *existing = delay;
                            }
                        })
                        .or_insert(delay);
                }
            }
        }

        // The obligation map iterates in ascending (actor, permission)
        // order; the protocol fixes this sequential traversal so that every
        // node accounts the same work.
        for (level, delay) in &permissions_to_satisfy {
            checktime()?;
            if !checker.satisfied_at(level, *delay)? {
                return Err(AuthorizationError::UnsatisfiedAuthorization(format!(
                    "transaction declares authority '{level}', but does not have signatures \
                     for it under a provided delay of {} ms and a delay max limit of {} ms",
                    provided_delay.as_millis(),
                    delay_max_limit.as_millis()
                )));
            }
        }

        if !allow_unused_keys && !checker.all_keys_used() {
            return Err(AuthorizationError::TxIrrelevantSig {
                keys: checker.unused_keys().into_iter().collect(),
            });
        }

        Ok(())
    }

    /// Checks a single permission against provided keys and permissions.
    #[allow(clippy::too_many_arguments)]
    pub fn check_permission_authorization(
        &self,
        account: AccountName,
        permission: PermissionName,
        provided_keys: &BTreeSet<PublicKey>,
        provided_permissions: &BTreeSet<PermissionLevel>,
        provided_delay: Micros,
        checktime: Option<CheckTime<'_>>,
        allow_unused_keys: bool,
    ) -> Result<(), AuthorizationError> {
        let checktime: CheckTime<'_> = checktime.unwrap_or(&noop_checktime);

        let chain_config = self.control.chain_config();
        let delay_max_limit = Micros::seconds(i64::from(chain_config.max_transaction_delay_sec));
        let effective_provided_delay = if provided_delay >= delay_max_limit {
            Micros::MAX
        } else {
            provided_delay
        };

        let mut checker = AuthorityChecker::new(
            |level: &PermissionLevel| self.get_permission(level).map(|p| p.auth.clone()),
            chain_config.max_authority_depth,
            provided_keys,
            provided_permissions,
            effective_provided_delay,
            checktime,
        );

        let level = PermissionLevel::new(account, permission);
        if !checker.satisfied(&level)? {
            return Err(AuthorizationError::UnsatisfiedAuthorization(format!(
                "permission '{level}' was not satisfied under a provided delay of {} ms and a \
                 delay max limit of {} ms",
                provided_delay.as_millis(),
                delay_max_limit.as_millis()
            )));
        }

        if !allow_unused_keys && !checker.all_keys_used() {
            return Err(AuthorizationError::TxIrrelevantSig {
                keys: checker.unused_keys().into_iter().collect(),
            });
        }

        Ok(())
    }

    /// Returns the subset of `candidate_keys` a transaction's declared
    /// authorizations actually need at `provided_delay`.
    pub fn get_required_keys(
        &self,
        trx: &Transaction,
        candidate_keys: &BTreeSet<PublicKey>,
        provided_delay: Micros,
    ) -> Result<BTreeSet<PublicKey>, AuthorizationError> {
        let no_permissions = BTreeSet::new();
        let mut checker = AuthorityChecker::new(
            |level: &PermissionLevel| self.get_permission(level).map(|p| p.auth.clone()),
            self.control.chain_config().max_authority_depth,
            candidate_keys,
            &no_permissions,
            provided_delay,
            &noop_checktime,
        );

        for act in &trx.actions {
            for declared_auth in &act.authorization {
                if !checker.satisfied(declared_auth)? {
                    return Err(AuthorizationError::UnsatisfiedAuthorization(format!(
                        "transaction declares authority '{declared_auth}', but does not have \
                         signatures for it."
                    )));
                }
            }
        }

        Ok(checker.used_keys())
    }

    // =========================================================================
    // SNAPSHOT ROUND-TRIP
    // =========================================================================

    /// Emits every permission (usage inlined) and every link.
    pub fn snapshot(&self) -> Result<AuthorizationSnapshot, AuthorizationError> {
        let mut permissions = Vec::with_capacity(self.db.permission_count());
        for perm in self.db.iter_permissions() {
            let parent_name = self.db.get(perm.parent)?.name.clone();
            let last_used = if perm.id == RESERVED_PERMISSION_ID {
                TimePoint::ZERO
            } else {
                self.db.usage(perm.usage_id)?.last_used
            };
            permissions.push(SnapshotPermissionRow {
                parent: parent_name,
                owner: perm.owner.clone(),
                name: perm.name.clone(),
                last_updated: perm.last_updated,
                auth: perm.auth.clone(),
                last_used,
            });
        }

        let permission_links = self
            .db
            .iter_links()
            .map(|link| SnapshotPermissionLinkRow {
                owner: link.owner.clone(),
                contract: link.contract.clone(),
                action: link.action.clone(),
                required_permission: link.required_permission.clone(),
            })
            .collect();

        Ok(AuthorizationSnapshot {
            permissions,
            permission_links,
        })
    }

    /// Rebuilds the store from snapshot rows.
    ///
    /// The first permission row must be the reserved sentinel; each later
    /// row resolves its parent by `(owner, parent_name)`, so parents must
    /// precede children.
    pub fn restore_from_snapshot(
        &mut self,
        snapshot: &AuthorizationSnapshot,
    ) -> Result<(), AuthorizationError> {
        self.db = PermissionIndex::new();

        for (position, row) in snapshot.permissions.iter().enumerate() {
            if position == 0 {
                Self::check_reserved_row(row)?;
                self.db.initialize();
                continue;
            }

            if !row.auth.validate() {
                return Err(AuthorizationError::Snapshot(format!(
                    "authority of snapshot permission {}@{} fails validation",
                    row.owner, row.name
                )));
            }

            let parent = if row.parent.is_empty() {
                RESERVED_PERMISSION_ID
            } else {
                let parent = self
                    .db
                    .find_by_owner(&row.owner, &row.parent)
                    .ok_or_else(|| {
                        AuthorizationError::Snapshot(format!(
                            "parent '{}' of snapshot permission {}@{} not found; parents must \
                             precede children",
                            row.parent, row.owner, row.name
                        ))
                    })?;
                if parent.id == RESERVED_PERMISSION_ID {
                    return Err(AuthorizationError::Snapshot(
                        "Unexpected mapping to reserved permission 0".to_string(),
                    ));
                }
                parent.id
            };

            let usage_id = self.db.insert_usage(row.last_used);
            self.db.insert_permission(
                row.owner.clone(),
                row.name.clone(),
                parent,
                row.auth.clone(),
                row.last_updated,
                usage_id,
            )?;
        }

        for row in &snapshot.permission_links {
            self.db.set_link(PermissionLink {
                owner: row.owner.clone(),
                contract: row.contract.clone(),
                action: row.action.clone(),
                required_permission: row.required_permission.clone(),
            });
        }

        tracing::debug!(
            "[authz] restored {} permissions and {} links from snapshot",
            snapshot.permissions.len(),
            snapshot.permission_links.len()
        );
        Ok(())
    }

    fn check_reserved_row(row: &SnapshotPermissionRow) -> Result<(), AuthorizationError> {
        if !row.parent.is_empty() {
            return Err(AuthorizationError::Snapshot(
                "Unexpected parent name on reserved permission 0".to_string(),
            ));
        }
        if !row.name.is_empty() {
            return Err(AuthorizationError::Snapshot(
                "Unexpected permission name on reserved permission 0".to_string(),
            ));
        }
        if !row.owner.is_empty() {
            return Err(AuthorizationError::Snapshot(
                "Unexpected owner name on reserved permission 0".to_string(),
            ));
        }
        if !row.auth.accounts.is_empty() || !row.auth.keys.is_empty() || !row.auth.waits.is_empty()
        {
            return Err(AuthorizationError::Snapshot(
                "Unexpected authority components on reserved permission 0".to_string(),
            ));
        }
        if row.auth.threshold != 0 {
            return Err(AuthorizationError::Snapshot(
                "Unexpected auth threshold on reserved permission 0".to_string(),
            ));
        }
        if row.last_updated != TimePoint::ZERO {
            return Err(AuthorizationError::Snapshot(
                "Unexpected last updated on reserved permission 0".to_string(),
            ));
        }
        Ok(())
    }
}
