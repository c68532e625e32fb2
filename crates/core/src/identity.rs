//! Identity model shared by every cached roster record.
//!
//! A record is identity-bearing when it carries a tenant scope, an optional
//! backend-assigned id and an optional optimistic-concurrency version. Both
//! id and version are absent until the record is first saved.

use crate::error::CoreError;
use crate::types::{DbId, TenantId, Version};

/// Accessors every identity-bearing record (and its view) provides.
pub trait Identity {
    /// Entity kind name, used in error messages and log fields.
    const ENTITY: &'static str;

    fn tenant_id(&self) -> TenantId;

    fn id(&self) -> Option<DbId>;

    fn version(&self) -> Option<Version>;
}

/// Two records denote the same entity iff both ids are present and equal.
///
/// Unsaved records are never the same entity as anything, not even
/// themselves.
pub fn same_entity<A: Identity, B: Identity>(a: &A, b: &B) -> bool {
    matches!((a.id(), b.id()), (Some(x), Some(y)) if x == y)
}

/// Return the record's id, or a validation error for unsaved records.
pub fn require_id<T: Identity>(record: &T) -> Result<DbId, CoreError> {
    record.id().ok_or_else(|| {
        CoreError::Validation(format!(
            "{} has no id; it must be saved before it can be keyed",
            T::ENTITY
        ))
    })
}

/// Implement [`Identity`] for a struct with `tenant_id`, `id` and `version`
/// fields.
macro_rules! impl_identity {
    ($ty:ty, $entity:literal) => {
        impl $crate::identity::Identity for $ty {
            const ENTITY: &'static str = $entity;

            fn tenant_id(&self) -> $crate::types::TenantId {
                self.tenant_id
            }

            fn id(&self) -> Option<$crate::types::DbId> {
                self.id
            }

            fn version(&self) -> Option<$crate::types::Version> {
                self.version
            }
        }
    };
}

pub(crate) use impl_identity;
