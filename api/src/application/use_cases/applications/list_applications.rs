use crate::application::access;
use crate::application::error::ServiceResult;
use crate::application::ports::application_repository::ApplicationRepository;
use crate::domain::applications::application::InsuranceApplication;
use crate::domain::identity::Identity;

pub struct ListApplications<'a, R: ApplicationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ApplicationRepository + ?Sized> ListApplications<'a, R> {
    pub async fn execute(&self, identity: &Identity) -> ServiceResult<Vec<InsuranceApplication>> {
        access::require_admin(identity, "Not authorized to list insurance applications")?;
        Ok(self.repo.list_all().await?)
    }
}
