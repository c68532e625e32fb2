use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::identity::Identity;
use crate::types::{DbId, TenantId, Version};
use crate::view::{impl_view_identity, DeclaredReferences, ReferenceField};

/// A tenant. It is its own scope, so its tenant id is its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Option<DbId>,
    pub version: Option<Version>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

impl Identity for Tenant {
    const ENTITY: &'static str = "tenant";

    /// Unsaved tenants report scope `0`, which no saved tenant uses.
    fn tenant_id(&self) -> TenantId {
        self.id.unwrap_or_default()
    }

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn version(&self) -> Option<Version> {
        self.version
    }
}

impl_view_identity!(Tenant);

impl DeclaredReferences for Tenant {
    const REFERENCES: &'static [ReferenceField] = &[];
}
