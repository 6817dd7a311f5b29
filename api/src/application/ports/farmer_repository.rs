use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::store_error::StoreError;
use crate::domain::farmers::farmer::{Farmer, FarmerPatch, NewFarmer};

#[async_trait]
pub trait FarmerRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Farmer>>;

    async fn list_all(&self) -> anyhow::Result<Vec<Farmer>>;

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Farmer>>;

    async fn list_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Farmer>>;

    async fn create(&self, owner_id: Uuid, input: &NewFarmer) -> Result<Farmer, StoreError>;

    // Returns None when the farmer vanished between the lookup and the write
    async fn update(&self, id: Uuid, patch: &FarmerPatch) -> Result<Option<Farmer>, StoreError>;

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
