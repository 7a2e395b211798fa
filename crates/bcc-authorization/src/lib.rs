//! # Authorization Manager Subsystem
//!
//! Owns the hierarchical permission graph for every account, maintains the
//! links from `(contract, action)` to required permissions, and decides
//! deterministically whether a transaction's declared authorizations are
//! satisfied by the keys and permissions supplied with it.
//!
//! ## Role in System
//!
//! - **Consensus-Critical**: every node must reach the same accept/reject
//!   verdict from the same inputs; evaluation is single-threaded and all
//!   observable iteration orders are total and stable
//! - **Read-Only During Checking**: `check_authorization` never mutates the
//!   store; graph mutations happen only through the permission operations,
//!   inside the host's transactional scope
//!
//! ## Components
//!
//! | Component | Module | Responsibility |
//! |-----------|--------|----------------|
//! | Permission Store | `domain::store` | Indexed permission/usage/link rows |
//! | Graph Operations | `service` | Create/modify/remove, usage timestamps |
//! | Linkage Resolver | `service` | `(authorizer, contract, action)` → minimum permission |
//! | Authority Checker | `domain::checker` | Bounded recursive threshold evaluation |
//! | Authorization Driver | `service` | Per-action checks, obligation assembly |
//!
//! ## Evaluation Order
//!
//! Obligations are discharged in ascending `(actor, permission)` order.
//! Parallel checking is deliberately not attempted: the protocol must
//! specify one sequential algorithm so that CPU accounting is identical on
//! every node.
//!
//! ## Outbound Dependencies
//!
//! | Collaborator | Trait | Purpose |
//! |--------------|-------|---------|
//! | Controller | `ChainController` | Block time, chain config, feature activation, deferred lookups |

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use service::*;
