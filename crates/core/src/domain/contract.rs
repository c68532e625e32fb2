use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::identity::impl_identity;
use crate::types::{DbId, TenantId, Version};
use crate::view::{impl_view_identity, DeclaredReferences, ReferenceField};

/// Upper bound on minutes per period; this is a year of continuous work.
pub const MAX_CONTRACT_MINUTES: u32 = 366 * 24 * 60;

/// Working-time limits an employee is hired under. Every limit is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub tenant_id: TenantId,
    pub id: Option<DbId>,
    pub version: Option<Version>,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 1, max = 1440))]
    pub maximum_minutes_per_day: Option<u32>,
    #[validate(range(min = 1, max = 10080))]
    pub maximum_minutes_per_week: Option<u32>,
    #[validate(range(min = 1, max = 44640))]
    pub maximum_minutes_per_month: Option<u32>,
    #[validate(range(min = 1, max = 527040))]
    pub maximum_minutes_per_year: Option<u32>,
}

impl Contract {
    pub fn new(tenant_id: TenantId, name: impl Into<String>) -> Self {
        Self {
            tenant_id,
            id: None,
            version: None,
            name: name.into(),
            maximum_minutes_per_day: None,
            maximum_minutes_per_week: None,
            maximum_minutes_per_month: None,
            maximum_minutes_per_year: None,
        }
    }
}

impl_identity!(Contract, "contract");
impl_view_identity!(Contract);

impl DeclaredReferences for Contract {
    const REFERENCES: &'static [ReferenceField] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_record;

    #[test]
    fn limits_are_optional() {
        assert!(validate_record(&Contract::new(1, "Part time")).is_ok());
    }

    #[test]
    fn daily_limit_cannot_exceed_a_day() {
        let mut contract = Contract::new(1, "Impossible");
        contract.maximum_minutes_per_day = Some(1441);
        assert!(validate_record(&contract).is_err());
    }

    #[test]
    fn yearly_limit_matches_constant() {
        let mut contract = Contract::new(1, "Always on");
        contract.maximum_minutes_per_year = Some(MAX_CONTRACT_MINUTES);
        assert!(validate_record(&contract).is_ok());
    }

    #[test]
    fn wire_format_is_camel_case() {
        let mut contract = Contract::new(2, "Full time");
        contract.maximum_minutes_per_week = Some(2400);
        let json = serde_json::to_value(&contract).unwrap();
        assert_eq!(json["tenantId"], 2);
        assert_eq!(json["maximumMinutesPerWeek"], 2400);
        assert!(json["maximumMinutesPerDay"].is_null());
    }
}
