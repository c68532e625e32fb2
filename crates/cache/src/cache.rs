//! Tenant-scoped snapshot of every cached roster entity kind.

use std::sync::Arc;

use roster_core::domain::{
    Contract, Employee, EmployeeView, RosterState, RosterStateView, Shift, ShiftTemplate,
    ShiftTemplateView, ShiftView, Skill, Spot, SpotView,
};
use roster_core::error::CoreError;
use roster_core::identity::Identity;
use roster_core::rotation::{self, CyclicSpan, RotationLength};
use roster_core::types::{DbId, TenantId};
use roster_core::validation::validate_record;
use roster_core::view::IntoView;

use crate::entity_map::EntityMap;
use crate::error::CacheError;

/// A record (or view) kind the cache keeps a map for.
pub trait CachedEntity: IntoView + Identity {
    fn entities(cache: &RosterCache) -> &EntityMap<Self::View>;

    fn entities_mut(cache: &mut RosterCache) -> &mut EntityMap<Self::View>;

    /// Field rules checked before the entity enters the cache. Views carry
    /// only ids and plain fields and are accepted as they are.
    fn validate_entity(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

macro_rules! impl_cached_entity {
    (@maps $field:ident) => {
        fn entities(cache: &RosterCache) -> &EntityMap<Self::View> {
            &cache.$field
        }

        fn entities_mut(cache: &mut RosterCache) -> &mut EntityMap<Self::View> {
            &mut cache.$field
        }
    };
    ($field:ident: $record:ty $(, $view:ty)?) => {
        impl CachedEntity for $record {
            impl_cached_entity!(@maps $field);

            fn validate_entity(&self) -> Result<(), CoreError> {
                validate_record(self)
            }
        }

        $(
            impl CachedEntity for $view {
                impl_cached_entity!(@maps $field);
            }
        )?
    };
}

impl_cached_entity!(skills: Skill);
impl_cached_entity!(contracts: Contract);
impl_cached_entity!(spots: Spot, SpotView);
impl_cached_entity!(employees: Employee, EmployeeView);
impl_cached_entity!(shift_templates: ShiftTemplate, ShiftTemplateView);
impl_cached_entity!(shifts: Shift, ShiftView);

/// Normalized views of one tenant's roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterCache {
    tenant_id: TenantId,
    roster_state: Option<Arc<RosterStateView>>,
    skills: EntityMap<Skill>,
    contracts: EntityMap<Contract>,
    spots: EntityMap<SpotView>,
    employees: EntityMap<EmployeeView>,
    shift_templates: EntityMap<ShiftTemplateView>,
    shifts: EntityMap<ShiftView>,
}

impl RosterCache {
    /// An empty cache for `tenant_id`.
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            roster_state: None,
            skills: EntityMap::default(),
            contracts: EntityMap::default(),
            spots: EntityMap::default(),
            employees: EntityMap::default(),
            shift_templates: EntityMap::default(),
            shifts: EntityMap::default(),
        }
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// The cached views of entity kind `R`.
    pub fn entities<R: CachedEntity>(&self) -> &EntityMap<R::View> {
        R::entities(self)
    }

    pub fn get<R: CachedEntity>(&self, id: DbId) -> Option<&Arc<R::View>> {
        R::entities(self).get(id)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Replace every cached entry of kind `R` with a server listing.
    ///
    /// Records from another tenant are skipped. Unsaved records cannot be
    /// keyed and, like records failing validation, reject the whole listing.
    pub fn refresh<R: CachedEntity>(&self, records: &[R]) -> Result<Self, CacheError> {
        let (own, foreign): (Vec<&R>, Vec<&R>) = records
            .iter()
            .partition(|record| record.tenant_id() == self.tenant_id);
        for record in &own {
            record.validate_entity()?;
        }

        for record in &foreign {
            tracing::warn!(
                entity = R::ENTITY,
                id = ?record.id(),
                tenant_id = self.tenant_id,
                record_tenant_id = record.tenant_id(),
                "Skipping record from another tenant"
            );
        }

        let entities = EntityMap::from_records(own)?;

        tracing::info!(
            entity = R::ENTITY,
            tenant_id = self.tenant_id,
            count = entities.len(),
            skipped = foreign.len(),
            "Refreshed cached entities"
        );

        let mut next = self.clone();
        *R::entities_mut(&mut next) = entities;
        Ok(next)
    }

    /// Insert `record`, or replace the cached entry with the same id.
    pub fn upsert<R: CachedEntity>(&self, record: &R) -> Result<Self, CacheError> {
        self.check_tenant(record)?;
        record.validate_entity()?;
        let entities = R::entities(self).with_replaced(record)?;

        tracing::debug!(
            entity = R::ENTITY,
            id = ?record.id(),
            version = ?record.version(),
            tenant_id = self.tenant_id,
            "Upserted cached entity"
        );

        let mut next = self.clone();
        *R::entities_mut(&mut next) = entities;
        Ok(next)
    }

    /// Drop the cached entry for `record`. Missing entries are a no-op.
    pub fn remove<R: CachedEntity>(&self, record: &R) -> Result<Self, CacheError> {
        self.check_tenant(record)?;
        let entities = R::entities(self).without(record);

        tracing::debug!(
            entity = R::ENTITY,
            id = ?record.id(),
            tenant_id = self.tenant_id,
            "Removed cached entity"
        );

        let mut next = self.clone();
        *R::entities_mut(&mut next) = entities;
        Ok(next)
    }

    // -----------------------------------------------------------------------
    // Roster state and rotation
    // -----------------------------------------------------------------------

    pub fn with_roster_state(&self, state: &RosterState) -> Result<Self, CacheError> {
        self.check_tenant(state)?;
        tracing::debug!(
            tenant_id = self.tenant_id,
            rotation_length = state.rotation_length.days(),
            "Loaded roster state"
        );
        Ok(Self {
            roster_state: Some(Arc::new(state.to_view())),
            ..self.clone()
        })
    }

    pub fn roster_state(&self) -> Option<&Arc<RosterStateView>> {
        self.roster_state.as_ref()
    }

    pub fn rotation_length(&self) -> Result<RotationLength, CacheError> {
        self.roster_state
            .as_ref()
            .map(|state| state.rotation_length)
            .ok_or(CacheError::MissingRosterState(self.tenant_id))
    }

    /// The cached template's timing as day offsets and times of day.
    pub fn shift_template_span(&self, id: DbId) -> Result<CyclicSpan, CacheError> {
        let rotation_length = self.rotation_length()?;
        let template = self.shift_templates.require(id)?;
        Ok(rotation::to_cyclic(&template.absolute_span(), rotation_length)?)
    }

    /// Re-time a cached template from edited cyclic endpoints.
    pub fn retime_shift_template(&self, id: DbId, span: &CyclicSpan) -> Result<Self, CacheError> {
        let rotation_length = self.rotation_length()?;
        let absolute = rotation::to_absolute(span, rotation_length)?;
        let template = self.shift_templates.require(id)?;
        let retimed = ShiftTemplateView {
            start_offset: absolute.start_offset,
            duration: absolute.duration,
            ..ShiftTemplateView::clone(template)
        };
        self.upsert(&retimed)
    }

    fn check_tenant<R: Identity>(&self, record: &R) -> Result<(), CacheError> {
        if record.tenant_id() != self.tenant_id {
            return Err(CacheError::TenantMismatch {
                expected: self.tenant_id,
                actual: record.tenant_id(),
            });
        }
        Ok(())
    }
}
