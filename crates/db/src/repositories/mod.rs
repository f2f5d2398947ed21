//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-row writes run in a
//! single transaction; their helpers take `&mut Transaction` instead.

pub mod campaign_repo;
pub mod campaign_status_repo;
pub mod character_repo;
pub mod entry_repo;
pub mod location_repo;
pub mod save_repo;
pub mod status_repo;

pub use campaign_repo::CampaignRepo;
pub use campaign_status_repo::CampaignStatusRepo;
pub use character_repo::CharacterRepo;
pub use entry_repo::EntryRepo;
pub use location_repo::LocationRepo;
pub use save_repo::SaveRepo;
pub use status_repo::StatusRepo;
