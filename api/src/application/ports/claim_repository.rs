use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::store_error::StoreError;
use crate::domain::claims::claim::{Claim, ClaimPatch, ClaimRecord, ClaimReview};

#[async_trait]
pub trait ClaimRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Claim>>;

    async fn list_all(&self) -> anyhow::Result<Vec<Claim>>;

    async fn list_for_farmers(&self, farmer_ids: &[Uuid]) -> anyhow::Result<Vec<Claim>>;

    // Duplicate(claim_number) when the drawn number is already taken
    async fn create(&self, record: &ClaimRecord) -> Result<Claim, StoreError>;

    async fn update(&self, id: Uuid, patch: &ClaimPatch) -> Result<Option<Claim>, StoreError>;

    async fn record_review(&self, id: Uuid, review: &ClaimReview) -> anyhow::Result<Option<Claim>>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
