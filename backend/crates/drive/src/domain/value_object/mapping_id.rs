use kernel::id::Id;

pub struct MappingMarker;
pub type MappingId = Id<MappingMarker>;

pub struct AccessLogMarker;
pub type AccessLogId = Id<AccessLogMarker>;

/// Key of the single default mapping record
pub const DEFAULT_MAPPING_ID: i64 = 1;
