pub mod create_claim;
pub mod delete_claim;
pub mod get_claim;
pub mod list_claims;
pub mod update_claim;
pub mod update_claim_status;
