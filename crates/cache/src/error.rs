use roster_core::error::CoreError;
use roster_core::types::TenantId;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Tenant mismatch: cache holds tenant {expected}, record belongs to tenant {actual}")]
    TenantMismatch { expected: TenantId, actual: TenantId },

    #[error("Roster state for tenant {0} has not been loaded")]
    MissingRosterState(TenantId),
}
