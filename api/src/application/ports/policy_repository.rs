use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::store_error::StoreError;
use crate::domain::policies::policy::{Policy, PolicyPatch, PolicyRecord};

#[async_trait]
pub trait PolicyRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Policy>>;

    async fn list_all(&self) -> anyhow::Result<Vec<Policy>>;

    async fn list_for_farmers(&self, farmer_ids: &[Uuid]) -> anyhow::Result<Vec<Policy>>;

    async fn list_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Policy>>;

    // Duplicate(policy_number) when the drawn number is already taken
    async fn create(&self, record: &PolicyRecord) -> Result<Policy, StoreError>;

    async fn update(&self, id: Uuid, patch: &PolicyPatch) -> Result<Option<Policy>, StoreError>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
