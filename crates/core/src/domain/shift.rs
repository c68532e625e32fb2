use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::employee::Employee;
use crate::domain::skill::Skill;
use crate::domain::spot::Spot;
use crate::identity::impl_identity;
use crate::types::{DbId, LocalDateTime, TenantId, Version};
use crate::view::{
    impl_view_identity, reference_id, reference_ids, DeclaredReferences, IntoView, ReferenceField,
};

/// A concrete shift on the roster calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_shift_times"))]
pub struct Shift {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    pub spot: Spot,
    pub required_skill_set: Vec<Skill>,
    /// Employee the shift was first published with, kept when reassigned.
    pub original_employee: Option<Employee>,
    pub employee: Option<Employee>,
    pub rotation_employee: Option<Employee>,
    pub start_date_time: LocalDateTime,
    pub end_date_time: LocalDateTime,
    #[serde(default)]
    pub pinned_by_user: bool,
}

/// [`Shift`] with spot, skills and employees reduced to ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftView {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    pub spot: Option<DbId>,
    pub required_skill_set: Vec<DbId>,
    pub original_employee: Option<DbId>,
    pub employee: Option<DbId>,
    pub rotation_employee: Option<DbId>,
    pub start_date_time: LocalDateTime,
    pub end_date_time: LocalDateTime,
    #[serde(default)]
    pub pinned_by_user: bool,
}

impl_identity!(Shift, "shift");
impl_identity!(ShiftView, "shift");
impl_view_identity!(ShiftView);

impl IntoView for Shift {
    type View = ShiftView;

    fn to_view(&self) -> ShiftView {
        ShiftView {
            tenant_id: self.tenant_id,
            id: self.id,
            version: self.version,
            spot: reference_id(Some(&self.spot)),
            required_skill_set: reference_ids(&self.required_skill_set),
            original_employee: reference_id(self.original_employee.as_ref()),
            employee: reference_id(self.employee.as_ref()),
            rotation_employee: reference_id(self.rotation_employee.as_ref()),
            start_date_time: self.start_date_time,
            end_date_time: self.end_date_time,
            pinned_by_user: self.pinned_by_user,
        }
    }
}

impl DeclaredReferences for Shift {
    const REFERENCES: &'static [ReferenceField] = &[
        ReferenceField::single("spot"),
        ReferenceField::collection("requiredSkillSet"),
        ReferenceField::single("originalEmployee"),
        ReferenceField::single("employee"),
        ReferenceField::single("rotationEmployee"),
    ];
}

fn validate_shift_times(shift: &Shift) -> Result<(), ValidationError> {
    if shift.end_date_time <= shift.start_date_time {
        return Err(ValidationError::new("end_before_start"));
    }
    Ok(())
}
