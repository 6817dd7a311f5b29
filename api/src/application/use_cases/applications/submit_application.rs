use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::application_repository::ApplicationRepository;
use crate::domain::applications::application::{
    ApplicationForm, ApplicationRecord, ApplicationUploads, InsuranceApplication,
};
use crate::domain::identity::Identity;

pub struct SubmitApplication<'a, R: ApplicationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ApplicationRepository + ?Sized> SubmitApplication<'a, R> {
    /// `uploads` holds references already written by the upload store.
    pub async fn execute(
        &self,
        identity: &Identity,
        form: ApplicationForm,
        uploads: ApplicationUploads,
    ) -> ServiceResult<InsuranceApplication> {
        if uploads.is_empty() {
            return Err(ServiceError::BadRequest(
                "Please upload all required documents".into(),
            ));
        }
        uploads.validate()?;
        form.validate()?;
        let record = ApplicationRecord::new(identity.id, form, uploads);
        let app = self.repo.create(&record).await?;
        tracing::info!(application_id = %app.id, submitted_by = %identity.id, "application_submitted");
        Ok(app)
    }
}
