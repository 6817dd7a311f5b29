pub mod application_repository_sqlx;
pub mod claim_repository_sqlx;
pub mod farmer_repository_sqlx;
pub mod policy_repository_sqlx;

use crate::application::ports::store_error::StoreError;

/// Unique violations become `StoreError::Duplicate` naming the offending column.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    if let Some(db) = err.as_database_error() {
        if db.is_unique_violation() {
            let field = match db.constraint() {
                Some("farmers_owner_id_key") => "owner_id",
                Some("farmers_aadhaar_number_key") => "aadhaar_number",
                Some("policies_policy_number_key") => "policy_number",
                Some("claims_claim_number_key") => "claim_number",
                Some(other) => other,
                None => "unknown",
            }
            .to_string();
            return StoreError::Duplicate(field);
        }
    }
    StoreError::Backend(err.into())
}

pub(crate) fn parse_column<T>(
    column: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> anyhow::Result<T> {
    parse(value).ok_or_else(|| anyhow::anyhow!("unexpected {} value: {}", column, value))
}
