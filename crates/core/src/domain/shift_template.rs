//! Repeating shift templates laid out on the rotation.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::employee::Employee;
use crate::domain::skill::Skill;
use crate::domain::spot::Spot;
use crate::error::CoreError;
use crate::identity::impl_identity;
use crate::iso8601::serde_duration;
use crate::rotation::{self, AbsoluteSpan, CyclicSpan, RotationLength};
use crate::types::{DbId, TenantId, Version};
use crate::view::{
    impl_view_identity, reference_id, reference_ids, DeclaredReferences, IntoView, ReferenceField,
};

/// A shift that repeats every rotation, optionally pre-assigned to a
/// rotation employee.
///
/// Timing is stored in absolute form; use [`ShiftTemplate::cyclic_span`] and
/// [`ShiftTemplate::with_cyclic_span`] for the day-offset form users edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_template_offsets"))]
pub struct ShiftTemplate {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    pub spot: Spot,
    pub required_skill_set: Vec<Skill>,
    pub rotation_employee: Option<Employee>,
    #[serde(rename = "durationBetweenRotationStartAndTemplateStart", with = "serde_duration")]
    pub start_offset: TimeDelta,
    #[serde(rename = "shiftTemplateDuration", with = "serde_duration")]
    pub duration: TimeDelta,
}

/// [`ShiftTemplate`] with spot, skills and rotation employee reduced to ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTemplateView {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    pub spot: Option<DbId>,
    pub required_skill_set: Vec<DbId>,
    pub rotation_employee: Option<DbId>,
    #[serde(rename = "durationBetweenRotationStartAndTemplateStart", with = "serde_duration")]
    pub start_offset: TimeDelta,
    #[serde(rename = "shiftTemplateDuration", with = "serde_duration")]
    pub duration: TimeDelta,
}

impl_identity!(ShiftTemplate, "shift_template");
impl_identity!(ShiftTemplateView, "shift_template");
impl_view_identity!(ShiftTemplateView);

impl ShiftTemplate {
    pub fn absolute_span(&self) -> AbsoluteSpan {
        AbsoluteSpan {
            start_offset: self.start_offset,
            duration: self.duration,
        }
    }

    /// The template's timing as day offsets and times of day.
    pub fn cyclic_span(&self, rotation_length: RotationLength) -> Result<CyclicSpan, CoreError> {
        rotation::to_cyclic(&self.absolute_span(), rotation_length)
    }

    /// A copy of this template with its timing replaced by `span`.
    pub fn with_cyclic_span(
        &self,
        span: &CyclicSpan,
        rotation_length: RotationLength,
    ) -> Result<Self, CoreError> {
        let absolute = rotation::to_absolute(span, rotation_length)?;
        Ok(Self {
            start_offset: absolute.start_offset,
            duration: absolute.duration,
            ..self.clone()
        })
    }
}

impl ShiftTemplateView {
    pub fn absolute_span(&self) -> AbsoluteSpan {
        AbsoluteSpan {
            start_offset: self.start_offset,
            duration: self.duration,
        }
    }
}

impl IntoView for ShiftTemplate {
    type View = ShiftTemplateView;

    fn to_view(&self) -> ShiftTemplateView {
        ShiftTemplateView {
            tenant_id: self.tenant_id,
            id: self.id,
            version: self.version,
            spot: reference_id(Some(&self.spot)),
            required_skill_set: reference_ids(&self.required_skill_set),
            rotation_employee: reference_id(self.rotation_employee.as_ref()),
            start_offset: self.start_offset,
            duration: self.duration,
        }
    }
}

impl DeclaredReferences for ShiftTemplate {
    const REFERENCES: &'static [ReferenceField] = &[
        ReferenceField::single("spot"),
        ReferenceField::collection("requiredSkillSet"),
        ReferenceField::single("rotationEmployee"),
    ];
}

fn validate_template_offsets(template: &ShiftTemplate) -> Result<(), ValidationError> {
    if template.start_offset < TimeDelta::zero() {
        return Err(ValidationError::new("negative_start_offset"));
    }
    if template.duration < TimeDelta::zero() {
        return Err(ValidationError::new("negative_duration"));
    }
    Ok(())
}
