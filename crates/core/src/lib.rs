//! `roster-core`: identity model, record normalization and rotation time
//! arithmetic for the employee rostering client.
//!
//! This crate has no internal dependencies and performs no I/O, so it can be
//! shared by the cache and any tooling built on top of it.

pub mod domain;
pub mod error;
pub mod identity;
pub mod iso8601;
pub mod rotation;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;
