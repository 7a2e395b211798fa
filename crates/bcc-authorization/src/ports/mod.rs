//! # Ports for Authorization
//!
//! Outbound dependencies expressed as traits, implemented by adapters.

pub mod controller;

pub use controller::*;
