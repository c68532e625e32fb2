//! Roster domain records and their normalized views.
//!
//! Every record that references other records has a companion `*View`
//! type holding ids in place of the nested records, plus a declared
//! reference table for untyped (JSON) payloads.

pub mod contract;
pub mod employee;
pub mod roster_state;
pub mod shift;
pub mod shift_template;
pub mod skill;
pub mod spot;
pub mod tenant;

pub use contract::Contract;
pub use employee::{Employee, EmployeeView};
pub use roster_state::{RosterState, RosterStateView};
pub use shift::{Shift, ShiftView};
pub use shift_template::{ShiftTemplate, ShiftTemplateView};
pub use skill::Skill;
pub use spot::{Spot, SpotView};
pub use tenant::Tenant;
