//! Command implementations. Each returns the JSON document to print.

use anyhow::{bail, Context};
use chrono::NaiveTime;
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use roster_cache::{CachedEntity, RosterCache};
use roster_core::domain::{Contract, Employee, RosterState, Shift, ShiftTemplate, Skill, Spot};
use roster_core::iso8601::{format_duration, parse_duration};
use roster_core::rotation::{self, AbsoluteSpan, CyclicSpan, RotationLength};
use roster_core::types::TenantId;
use roster_core::view::{normalize_list, normalize_value, DeclaredReferences, ReferenceField};

/// Record kinds accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Skill,
    Contract,
    Spot,
    Employee,
    ShiftTemplate,
    Shift,
    RosterState,
}

impl EntityKind {
    pub fn references(self) -> &'static [ReferenceField] {
        match self {
            Self::Skill => Skill::REFERENCES,
            Self::Contract => Contract::REFERENCES,
            Self::Spot => Spot::REFERENCES,
            Self::Employee => Employee::REFERENCES,
            Self::ShiftTemplate => ShiftTemplate::REFERENCES,
            Self::Shift => Shift::REFERENCES,
            Self::RosterState => RosterState::REFERENCES,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a JSON record, or a list of records, against the kind's
/// declared references.
pub fn normalize(kind: EntityKind, text: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(text).context("input is not valid JSON")?;
    let references = kind.references();
    let normalized = match &value {
        Value::Array(_) => Value::Array(normalize_list(&value, references)?),
        _ => normalize_value(&value, references)?,
    };
    Ok(normalized)
}

/// Load a server listing into a tenant cache and return the cached views
/// ordered by id.
pub fn load(kind: EntityKind, text: &str, tenant_id: TenantId) -> anyhow::Result<Value> {
    match kind {
        EntityKind::Skill => load_into::<Skill>(text, tenant_id),
        EntityKind::Contract => load_into::<Contract>(text, tenant_id),
        EntityKind::Spot => load_into::<Spot>(text, tenant_id),
        EntityKind::Employee => load_into::<Employee>(text, tenant_id),
        EntityKind::ShiftTemplate => load_into::<ShiftTemplate>(text, tenant_id),
        EntityKind::Shift => load_into::<Shift>(text, tenant_id),
        EntityKind::RosterState => bail!("roster state is a single record, not a cached listing"),
    }
}

fn load_into<R>(text: &str, tenant_id: TenantId) -> anyhow::Result<Value>
where
    R: CachedEntity + DeserializeOwned,
    R::View: Serialize,
{
    let records: Vec<R> = serde_json::from_str(text)
        .with_context(|| format!("input is not a JSON list of {} records", R::ENTITY))?;
    let cache = RosterCache::new(tenant_id).refresh(&records)?;
    let views: Vec<&R::View> = cache.entities::<R>().iter().map(|view| view.as_ref()).collect();
    Ok(serde_json::to_value(views)?)
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map_err(|_| format!("'{input}' is not a time of day (expected HH:MM)"))
}

pub fn to_absolute(span: &CyclicSpan, rotation_length: RotationLength) -> anyhow::Result<Value> {
    let absolute = rotation::to_absolute(span, rotation_length)?;
    Ok(json!({
        "rotationLength": rotation_length.days(),
        "durationBetweenRotationStartAndTemplateStart": format_duration(absolute.start_offset),
        "shiftTemplateDuration": format_duration(absolute.duration),
    }))
}

pub fn to_cyclic(start_offset: &str, duration: &str, rotation_length: RotationLength) -> anyhow::Result<Value> {
    let absolute = AbsoluteSpan {
        start_offset: parse_duration(start_offset)?,
        duration: parse_duration(duration)?,
    };
    let span = rotation::to_cyclic(&absolute, rotation_length)?;
    let mut out = serde_json::to_value(span)?;
    out["rotationLength"] = json!(rotation_length.days());
    Ok(out)
}
