//! Normalized collection store.
//!
//! Pure functions that fold records into a cached collection of views and
//! return the next collection. Inputs are only ever borrowed, so a caller
//! holding the previous collection keeps an unchanged snapshot. Views are
//! shared behind `Arc`, which makes each copy a pointer copy per entry.
//!
//! Two forms are supported: an ordered list ([`NormalizedList`]) and an
//! id-keyed map ([`NormalizedMap`]). Operations on ids that are not present
//! are no-ops. Versions are not compared; the last write wins.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::CoreError;
use crate::identity::{require_id, Identity};
use crate::types::DbId;
use crate::view::IntoView;

/// Views in insertion (or domain) order, at most one per id.
pub type NormalizedList<V> = Vec<Arc<V>>;

/// Views keyed by id.
pub type NormalizedMap<V> = BTreeMap<DbId, Arc<V>>;

// ---------------------------------------------------------------------------
// List form
// ---------------------------------------------------------------------------

/// Append the view of `record` to the end of `list`.
///
/// Duplicate ids are not checked; only insert genuinely new entities.
pub fn insert<R: IntoView>(list: &[Arc<R::View>], record: &R) -> NormalizedList<R::View> {
    let mut next = Vec::with_capacity(list.len() + 1);
    next.extend(list.iter().cloned());
    next.push(Arc::new(record.to_view()));
    next
}

/// Drop the entry with the given id, if any.
pub fn remove_by_id<V: Identity>(list: &[Arc<V>], id: DbId) -> NormalizedList<V> {
    list.iter().filter(|view| view.id() != Some(id)).cloned().collect()
}

/// Drop the entry for `record`. Unsaved records match nothing.
pub fn remove<V: Identity, R: Identity>(list: &[Arc<V>], record: &R) -> NormalizedList<V> {
    match record.id() {
        Some(id) => remove_by_id(list, id),
        None => list.to_vec(),
    }
}

/// Remove the entry for `record` and append its new view.
///
/// The replaced entry always moves to the end of the list.
pub fn replace<R: IntoView + Identity>(list: &[Arc<R::View>], record: &R) -> NormalizedList<R::View> {
    insert(&remove(list, record), record)
}

pub fn find_by_id<V: Identity>(list: &[Arc<V>], id: DbId) -> Option<&Arc<V>> {
    list.iter().find(|view| view.id() == Some(id))
}

pub fn contains_id<V: Identity>(list: &[Arc<V>], id: DbId) -> bool {
    find_by_id(list, id).is_some()
}

// ---------------------------------------------------------------------------
// Map form
// ---------------------------------------------------------------------------

/// A new map with the view of `record` added under its id.
///
/// An existing entry with the same id is overwritten.
pub fn map_insert<R: IntoView + Identity>(
    map: &NormalizedMap<R::View>,
    record: &R,
) -> Result<NormalizedMap<R::View>, CoreError> {
    let id = require_id(record)?;
    let mut next = map.clone();
    next.insert(id, Arc::new(record.to_view()));
    Ok(next)
}

/// A new map without the entry for `id`.
pub fn map_remove_by_id<V>(map: &NormalizedMap<V>, id: DbId) -> NormalizedMap<V> {
    let mut next = map.clone();
    next.remove(&id);
    next
}

/// A new map without the entry for `record`. Unsaved records match nothing.
pub fn map_remove<V, R: Identity>(map: &NormalizedMap<V>, record: &R) -> NormalizedMap<V> {
    match record.id() {
        Some(id) => map_remove_by_id(map, id),
        None => map.clone(),
    }
}

/// A new map with the entry for `record` replaced by its current view.
pub fn map_replace<R: IntoView + Identity>(
    map: &NormalizedMap<R::View>,
    record: &R,
) -> Result<NormalizedMap<R::View>, CoreError> {
    map_insert(&map_remove(map, record), record)
}

pub fn map_find_by_id<V>(map: &NormalizedMap<V>, id: DbId) -> Option<&Arc<V>> {
    map.get(&id)
}

pub fn map_contains_id<V>(map: &NormalizedMap<V>, id: DbId) -> bool {
    map.contains_key(&id)
}

/// Fold a full server listing into a fresh map of views.
///
/// Later records win over earlier ones with the same id.
pub fn build_map_from_list<'a, R>(
    records: impl IntoIterator<Item = &'a R>,
) -> Result<NormalizedMap<R::View>, CoreError>
where
    R: IntoView + Identity + 'a,
{
    records
        .into_iter()
        .map(|record| require_id(record).map(|id| (id, Arc::new(record.to_view()))))
        .collect()
}
