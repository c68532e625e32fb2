use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::contract::Contract;
use crate::domain::skill::Skill;
use crate::identity::impl_identity;
use crate::types::{DbId, TenantId, Version};
use crate::view::{
    impl_view_identity, reference_id, reference_ids, DeclaredReferences, IntoView, ReferenceField,
};

/// An employee who can be assigned to shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub contract: Contract,
    pub skill_proficiency_set: Vec<Skill>,
    /// Initials shown on calendar tiles.
    #[validate(length(min = 1, max = 3))]
    pub short_id: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,
}

/// [`Employee`] with contract and skills reduced to ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    pub name: String,
    pub contract: Option<DbId>,
    pub skill_proficiency_set: Vec<DbId>,
    pub short_id: Option<String>,
    pub color: Option<String>,
}

impl_identity!(Employee, "employee");
impl_identity!(EmployeeView, "employee");
impl_view_identity!(EmployeeView);

impl IntoView for Employee {
    type View = EmployeeView;

    fn to_view(&self) -> EmployeeView {
        EmployeeView {
            tenant_id: self.tenant_id,
            id: self.id,
            version: self.version,
            name: self.name.clone(),
            contract: reference_id(Some(&self.contract)),
            skill_proficiency_set: reference_ids(&self.skill_proficiency_set),
            short_id: self.short_id.clone(),
            color: self.color.clone(),
        }
    }
}

impl DeclaredReferences for Employee {
    const REFERENCES: &'static [ReferenceField] = &[
        ReferenceField::single("contract"),
        ReferenceField::collection("skillProficiencySet"),
    ];
}

/// Colors are `#RRGGBB` hex strings.
fn validate_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("color_hex"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::validation::validate_record;

    fn saved_skill(id: DbId, name: &str) -> Skill {
        Skill {
            id: Some(id),
            version: Some(0),
            ..Skill::new(1, name)
        }
    }

    fn employee() -> Employee {
        Employee {
            tenant_id: 1,
            id: Some(1),
            version: Some(2),
            name: "Amy Cole".to_string(),
            contract: Contract {
                id: Some(10),
                version: Some(0),
                ..Contract::new(1, "Full time")
            },
            skill_proficiency_set: vec![saved_skill(6, "Nurse"), saved_skill(7, "Doctor")],
            short_id: Some("AC".to_string()),
            color: Some("#FFC0CB".to_string()),
        }
    }

    #[test]
    fn view_reduces_contract_and_skills() {
        let view = employee().to_view();
        assert_eq!(view.contract, Some(10));
        assert_eq!(view.skill_proficiency_set, vec![6, 7]);
        assert_eq!(view.short_id.as_deref(), Some("AC"));
    }

    #[test]
    fn view_serializes_to_expected_wire_shape() {
        let view = serde_json::to_value(employee().to_view()).unwrap();
        assert_eq!(view["id"], 1);
        assert_eq!(view["version"], 2);
        assert_eq!(view["contract"], 10);
        assert_eq!(view["skillProficiencySet"], json!([6, 7]));
    }

    #[test]
    fn color_must_be_hex() {
        let mut bad = employee();
        bad.color = Some("pink".to_string());
        assert!(validate_record(&bad).is_err());
        assert!(validate_record(&employee()).is_ok());
    }

    #[test]
    fn short_id_is_at_most_three_characters() {
        let mut bad = employee();
        bad.short_id = Some("ABCD".to_string());
        assert!(validate_record(&bad).is_err());
    }
}
