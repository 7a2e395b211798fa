//! # Adapters for Authorization
//!
//! Concrete implementations of the outbound ports.

pub mod memory_controller;

pub use memory_controller::*;
