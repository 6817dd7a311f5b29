pub mod application_repository;
pub mod claim_repository;
pub mod farmer_repository;
pub mod policy_repository;
pub mod store_error;
pub mod store_health;
pub mod upload_storage_port;
