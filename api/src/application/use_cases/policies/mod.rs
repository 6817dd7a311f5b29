pub mod create_policy;
pub mod delete_policy;
pub mod get_policy;
pub mod list_policies;
pub mod update_policy;
