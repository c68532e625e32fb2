//! `roster-cache`: the normalized client-side cache of roster records.
//!
//! Server responses are folded into one id-keyed map of views per entity
//! kind. Every mutation returns a new [`RosterCache`] snapshot; snapshots
//! share unchanged data and stay valid after later mutations.

pub mod cache;
pub mod entity_map;
pub mod error;

pub use cache::{CachedEntity, RosterCache};
pub use entity_map::EntityMap;
pub use error::CacheError;
