//! # Integration Tests Crate
//!
//! End-to-end authorization scenarios exercising the manager through its
//! public service API: permission trees, links, native actions, deferred
//! cancellation, and the transaction authorization driver.
//!
//! ## Structure
//!
//! ```text
//! integration-tests/
//! ├── src/
//! │   ├── lib.rs        # This file
//! │   ├── fixtures.rs   # Shared account/transaction harness
//! │   ├── scenarios.rs  # Concrete end-to-end transaction scenarios
//! │   └── properties.rs # Driver laws: ordering, collisions, key rules
//! ```

pub mod fixtures;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;
