use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::application_repository::ApplicationRepository;
use crate::domain::applications::application::InsuranceApplication;
use crate::domain::identity::Identity;

pub struct GetApplication<'a, R: ApplicationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ApplicationRepository + ?Sized> GetApplication<'a, R> {
    pub async fn execute(&self, identity: &Identity, id: Uuid) -> ServiceResult<InsuranceApplication> {
        let app = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Application"))?;
        if !identity.is_admin() && !app.is_submitted_by(identity.id) {
            return Err(ServiceError::forbidden(
                "Not authorized to view this application",
            ));
        }
        Ok(app)
    }
}
