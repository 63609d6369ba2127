//! Loja Online admin library.
//!
//! Wires the local [`loja_storage::Workspace`] to the demo store API: the
//! fetch collaborators, the fail-open refresh that merges their snapshots
//! into the local collections, and the catalog operations the admin screens
//! perform.
//!
//! Kept as a library so the integration tests can drive it against a
//! fixture server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod remote;
pub mod services;
