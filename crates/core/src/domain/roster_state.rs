use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::tenant::Tenant;
use crate::identity::impl_identity;
use crate::rotation::RotationLength;
use crate::types::{DbId, TenantId, Version};
use crate::view::{impl_view_identity, reference_id, DeclaredReferences, IntoView, ReferenceField};

/// Per-tenant roster configuration, including the rotation length that
/// shift templates are authored against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterState {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    /// Days of notice before a draft week is published.
    pub publish_notice: u32,
    pub first_draft_date: NaiveDate,
    pub publish_length: u32,
    pub draft_length: u32,
    pub unplanned_rotation_offset: u32,
    pub rotation_length: RotationLength,
    pub tenant: Tenant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterStateView {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    pub publish_notice: u32,
    pub first_draft_date: NaiveDate,
    pub publish_length: u32,
    pub draft_length: u32,
    pub unplanned_rotation_offset: u32,
    pub rotation_length: RotationLength,
    pub tenant: Option<DbId>,
}

impl_identity!(RosterState, "roster_state");
impl_identity!(RosterStateView, "roster_state");
impl_view_identity!(RosterStateView);

impl IntoView for RosterState {
    type View = RosterStateView;

    fn to_view(&self) -> RosterStateView {
        RosterStateView {
            tenant_id: self.tenant_id,
            id: self.id,
            version: self.version,
            publish_notice: self.publish_notice,
            first_draft_date: self.first_draft_date,
            publish_length: self.publish_length,
            draft_length: self.draft_length,
            unplanned_rotation_offset: self.unplanned_rotation_offset,
            rotation_length: self.rotation_length,
            tenant: reference_id(Some(&self.tenant)),
        }
    }
}

impl DeclaredReferences for RosterState {
    const REFERENCES: &'static [ReferenceField] = &[ReferenceField::single("tenant")];
}
