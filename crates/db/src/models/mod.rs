//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for patches, with a `resolve` step that
//!   merges it over the existing row

pub mod campaign;
pub mod campaign_status;
pub mod character;
pub mod entry;
pub mod location;
pub mod save;
pub mod status;
