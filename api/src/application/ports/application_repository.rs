use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::applications::application::{
    ApplicationPatch, ApplicationRecord, InsuranceApplication,
};

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<InsuranceApplication>>;

    async fn list_all(&self) -> anyhow::Result<Vec<InsuranceApplication>>;

    async fn create(&self, record: &ApplicationRecord) -> anyhow::Result<InsuranceApplication>;

    async fn update(
        &self,
        id: Uuid,
        patch: &ApplicationPatch,
    ) -> anyhow::Result<Option<InsuranceApplication>>;
}
