use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::identity::impl_identity;
use crate::types::{DbId, TenantId, Version};
use crate::view::{impl_view_identity, DeclaredReferences, ReferenceField};

/// A skill an employee can have and a spot can require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

impl Skill {
    pub fn new(tenant_id: TenantId, name: impl Into<String>) -> Self {
        Self {
            tenant_id,
            id: None,
            version: None,
            name: name.into(),
        }
    }
}

impl_identity!(Skill, "skill");
impl_view_identity!(Skill);

impl DeclaredReferences for Skill {
    const REFERENCES: &'static [ReferenceField] = &[];
}
