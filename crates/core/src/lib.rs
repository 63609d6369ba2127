//! Loja Core - Shared record types.
//!
//! This crate provides the types shared by every Loja Online component:
//! - `storage` - Local persistence, merge policy, repositories and cart
//! - `admin` - Remote fetch clients, configuration and the sync binary
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure helpers - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Record identifiers, products, clients, cart items and statuses
//! - [`format`] - Display helpers for names, dates and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod format;
pub mod types;

pub use types::*;
