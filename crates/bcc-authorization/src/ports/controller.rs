use crate::domain::{ChainConfig, GeneratedTransaction};
use bcc_types::{TimePoint, TransactionId};

/// Consensus protocol upgrades gated on activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProtocolFeature {
    /// When active, non-system contracts may link the native authorization
    /// actions; the restriction stays in force for the system contract.
    FixLinkauthRestriction,
}

/// Read-only view of the controller consumed by the authorization manager.
///
/// Timestamps and configuration read here are pure inputs: the controller
/// serializes all chain mutations, so nothing observed through this trait
/// changes during one authorization call.
pub trait ChainController {
    /// Timestamp of the block being produced or replayed.
    fn pending_block_time(&self) -> TimePoint;

    /// Consensus configuration from the global properties.
    fn chain_config(&self) -> ChainConfig;

    /// Whether a builtin protocol feature has been activated.
    fn is_builtin_activated(&self, feature: ProtocolFeature) -> bool;

    /// Looks up a deferred generated transaction by id.
    fn find_generated_transaction(&self, trx_id: &TransactionId) -> Option<GeneratedTransaction>;
}
