//! In-memory controller adapter.
//!
//! Backs the `ChainController` port for genesis tooling and tests: block
//! time, chain config, activated features, and the deferred transaction
//! queue all live behind `parking_lot` locks so the surrounding harness can
//! advance them between authorization calls.

use crate::domain::{ChainConfig, GeneratedTransaction};
use crate::ports::{ChainController, ProtocolFeature};
use bcc_types::{TimePoint, TransactionId};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};

/// `ChainController` implementation over plain memory.
#[derive(Debug, Default)]
pub struct MemoryController {
    pending_block_time: RwLock<TimePoint>,
    config: RwLock<ChainConfig>,
    activated: RwLock<HashSet<ProtocolFeature>>,
    deferred: RwLock<BTreeMap<TransactionId, GeneratedTransaction>>,
}

impl MemoryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ChainConfig) -> Self {
        let controller = Self::default();
        *controller.config.write() = config;
        controller
    }

    pub fn set_pending_block_time(&self, time: TimePoint) {
        *self.pending_block_time.write() = time;
    }

    pub fn set_chain_config(&self, config: ChainConfig) {
        *self.config.write() = config;
    }

    pub fn activate_feature(&self, feature: ProtocolFeature) {
        self.activated.write().insert(feature);
    }

    /// Enqueues a deferred transaction record for `canceldelay` lookups.
    pub fn push_generated_transaction(&self, gtx: GeneratedTransaction) {
        self.deferred.write().insert(gtx.trx_id, gtx);
    }

    pub fn remove_generated_transaction(&self, trx_id: &TransactionId) {
        self.deferred.write().remove(trx_id);
    }
}

impl ChainController for MemoryController {
    fn pending_block_time(&self) -> TimePoint {
        *self.pending_block_time.read()
    }

    fn chain_config(&self) -> ChainConfig {
        *self.config.read()
    }

    fn is_builtin_activated(&self, feature: ProtocolFeature) -> bool {
        self.activated.read().contains(&feature)
    }

    fn find_generated_transaction(&self, trx_id: &TransactionId) -> Option<GeneratedTransaction> {
        self.deferred.read().get(trx_id).cloned()
    }
}
