use bcc_types::{ActionName, PermissionLevel, PublicKey, TypesError};
use thiserror::Error;

/// Error surface of the authorization manager.
///
/// Every failure aborts the current check; nothing is recovered internally.
/// No partial state is observable because checking performs no mutation.
#[derive(Debug, Error)]
pub enum AuthorizationError {
    #[error("invalid permission {0}")]
    InvalidPermission(PermissionLevel),

    #[error("failed to retrieve permission: {0}")]
    PermissionQuery(String),

    #[error("irrelevant authority: {0}")]
    IrrelevantAuth(String),

    #[error("action validation failed: {0}")]
    ActionValidate(String),

    #[error(
        "cannot call lookup_minimum_permission on native action '{0}' \
         that is not allowed to be linked to minimum permissions"
    )]
    UnlinkableMinPermissionAction(ActionName),

    #[error("transaction error: {0}")]
    Transaction(String),

    #[error("cannot cancel trx_id={0}, there is no deferred transaction with that transaction id")]
    TxNotFound(String),

    #[error("unsatisfied authorization: {0}")]
    UnsatisfiedAuthorization(String),

    #[error("transaction bears irrelevant signatures from these keys: {keys:?}")]
    TxIrrelevantSig { keys: Vec<PublicKey> },

    #[error("snapshot row violates invariants: {0}")]
    Snapshot(String),

    #[error("recursion budget exhausted while evaluating authority")]
    AuthorityTooHigh,

    #[error("authority violates its structural invariants: {0}")]
    InvalidAuthority(String),

    #[error("checktime deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    Types(#[from] TypesError),
}
