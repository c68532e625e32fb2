//! Shared, immutable map of cached views for one entity kind.

use std::sync::Arc;

use roster_core::error::CoreError;
use roster_core::identity::Identity;
use roster_core::store::{self, NormalizedMap};
use roster_core::types::DbId;
use roster_core::view::IntoView;

/// Views of one entity kind keyed by id.
///
/// Cloning is a reference-count bump; mutations build a new map and leave
/// every existing clone untouched.
#[derive(Debug)]
pub struct EntityMap<V> {
    entries: Arc<NormalizedMap<V>>,
}

impl<V> Clone for EntityMap<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for EntityMap<V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(NormalizedMap::new()),
        }
    }
}

impl<V: PartialEq> PartialEq for EntityMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Identity> EntityMap<V> {
    pub fn get(&self, id: DbId) -> Option<&Arc<V>> {
        store::map_find_by_id(&self.entries, id)
    }

    pub fn contains(&self, id: DbId) -> bool {
        store::map_contains_id(&self.entries, id)
    }

    /// Like [`EntityMap::get`], but a missing entry is an error.
    pub fn require(&self, id: DbId) -> Result<&Arc<V>, CoreError> {
        self.get(id).ok_or(CoreError::NotFound {
            entity: V::ENTITY,
            id,
        })
    }

    /// All views, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<V>> {
        self.entries.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = DbId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether two maps are the same snapshot (not merely equal).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    pub(crate) fn from_records<'a, R>(records: impl IntoIterator<Item = &'a R>) -> Result<Self, CoreError>
    where
        R: IntoView<View = V> + Identity + 'a,
    {
        Ok(Self {
            entries: Arc::new(store::build_map_from_list(records)?),
        })
    }

    pub(crate) fn with_replaced<R>(&self, record: &R) -> Result<Self, CoreError>
    where
        R: IntoView<View = V> + Identity,
    {
        Ok(Self {
            entries: Arc::new(store::map_replace(&self.entries, record)?),
        })
    }

    pub(crate) fn without<R: Identity>(&self, record: &R) -> Self {
        Self {
            entries: Arc::new(store::map_remove(&self.entries, record)),
        }
    }
}
