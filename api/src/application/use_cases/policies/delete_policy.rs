use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::domain::identity::Identity;

pub struct DeletePolicy<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub farmers: &'a F,
    pub policies: &'a P,
}

impl<'a, F, P> DeletePolicy<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub async fn execute(&self, identity: &Identity, id: Uuid) -> ServiceResult<()> {
        let policy = self
            .policies
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Policy"))?;
        access::require(
            access::resolve_record(self.farmers, identity, &policy).await?,
            "Not authorized to delete this policy",
        )?;
        if !self.policies.delete(id).await? {
            return Err(ServiceError::NotFound("Policy"));
        }
        tracing::info!(policy_id = %id, actor = %identity.id, "policy_deleted");
        Ok(())
    }
}
