use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::domain::identity::Identity;
use crate::domain::policies::policy::{Policy, PolicyPatch};

pub struct UpdatePolicy<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub farmers: &'a F,
    pub policies: &'a P,
}

impl<'a, F, P> UpdatePolicy<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub async fn execute(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &PolicyPatch,
    ) -> ServiceResult<Policy> {
        let policy = self
            .policies
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Policy"))?;
        access::require(
            access::resolve_record(self.farmers, identity, &policy).await?,
            "Not authorized to update this policy",
        )?;
        patch.validate()?;
        self.policies
            .update(id, patch)
            .await?
            .ok_or(ServiceError::NotFound("Policy"))
    }
}
