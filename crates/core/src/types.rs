/// Entity ids are assigned by the backend (64-bit sequences).
pub type DbId = i64;

/// Tenant scope identifier. Every record except `Tenant` itself carries one.
pub type TenantId = i64;

/// Optimistic-concurrency version, incremented by the backend on each update.
pub type Version = i64;

/// Wall-clock timestamps in the roster are zone-less local date-times.
pub type LocalDateTime = chrono::NaiveDateTime;
