use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::application_repository::ApplicationRepository;
use crate::domain::applications::application::{ApplicationPatch, InsuranceApplication};
use crate::domain::identity::Identity;

pub struct UpdateApplication<'a, R: ApplicationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ApplicationRepository + ?Sized> UpdateApplication<'a, R> {
    pub async fn execute(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &ApplicationPatch,
    ) -> ServiceResult<InsuranceApplication> {
        access::require_admin(identity, "Not authorized to update insurance applications")?;
        patch.validate()?;
        let app = self
            .repo
            .update(id, patch)
            .await?
            .ok_or(ServiceError::NotFound("Application"))?;
        tracing::info!(application_id = %id, status = app.status.as_str(), "application_updated");
        Ok(app)
    }
}
