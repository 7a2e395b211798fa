//! Actions and transactions.
//!
//! A transaction is an ordered list of actions; each action names a contract
//! account, an action on that contract, the authorizations the sender
//! declares for it, and an opaque bincode payload. The authorization manager
//! consumes these shapes read-only.

use crate::authority::PermissionLevel;
use crate::errors::TypesError;
use crate::names::{AccountName, ActionName};
use crate::time::TimePoint;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// A 32-byte transaction id (Keccak-256 of the serialized transaction).
pub type TransactionId = [u8; 32];

/// A single contract invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Contract account the action executes on.
    pub account: AccountName,
    /// Action name within the contract.
    pub name: ActionName,
    /// Authorizations the transaction declares for this action.
    pub authorization: Vec<PermissionLevel>,
    /// Bincode-encoded action payload.
    pub data: Vec<u8>,
}

impl Action {
    /// Builds an action from a serializable payload.
    pub fn from_payload<T: Serialize>(
        account: AccountName,
        name: ActionName,
        authorization: Vec<PermissionLevel>,
        payload: &T,
    ) -> Result<Self, TypesError> {
        let data = bincode::serialize(payload).map_err(|e| TypesError::Codec(e.to_string()))?;
        Ok(Action {
            account,
            name,
            authorization,
            data,
        })
    }

    /// Decodes the payload as `T`.
    ///
    /// # Errors
    /// `Codec` if the payload bytes do not decode as `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, TypesError> {
        bincode::deserialize(&self.data).map_err(|e| TypesError::Codec(e.to_string()))
    }
}

/// An ordered list of actions with scheduling metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub expiration: TimePoint,
    /// Sender-requested execution delay, in seconds.
    pub delay_sec: u32,
    pub actions: Vec<Action>,
}

impl Transaction {
    pub fn new(actions: Vec<Action>) -> Self {
        Transaction {
            expiration: TimePoint::ZERO,
            delay_sec: 0,
            actions,
        }
    }

    /// Serializes the transaction for packing into a deferred record.
    pub fn pack(&self) -> Result<Vec<u8>, TypesError> {
        bincode::serialize(self).map_err(|e| TypesError::Codec(e.to_string()))
    }

    /// Deserializes a packed transaction.
    pub fn unpack(bytes: &[u8]) -> Result<Self, TypesError> {
        bincode::deserialize(bytes).map_err(|e| TypesError::Codec(e.to_string()))
    }

    /// Keccak-256 id over the packed bytes.
    pub fn id(&self) -> Result<TransactionId, TypesError> {
        let bytes = self.pack()?;
        let mut hasher = Keccak256::new();
        hasher.update(&bytes);
        Ok(hasher.finalize().into())
    }
}
