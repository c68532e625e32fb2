use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::skill::Skill;
use crate::identity::impl_identity;
use crate::types::{DbId, TenantId, Version};
use crate::view::{impl_view_identity, reference_ids, DeclaredReferences, IntoView, ReferenceField};

/// A place (ward, desk, till) that shifts are staffed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub required_skill_set: Vec<Skill>,
}

/// [`Spot`] with its required skills reduced to ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotView {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    pub name: String,
    pub required_skill_set: Vec<DbId>,
}

impl_identity!(Spot, "spot");
impl_identity!(SpotView, "spot");
impl_view_identity!(SpotView);

impl IntoView for Spot {
    type View = SpotView;

    fn to_view(&self) -> SpotView {
        SpotView {
            tenant_id: self.tenant_id,
            id: self.id,
            version: self.version,
            name: self.name.clone(),
            required_skill_set: reference_ids(&self.required_skill_set),
        }
    }
}

impl DeclaredReferences for Spot {
    const REFERENCES: &'static [ReferenceField] = &[ReferenceField::collection("requiredSkillSet")];
}
