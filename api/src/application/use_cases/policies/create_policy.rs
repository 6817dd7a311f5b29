use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::integrity;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::application::ports::store_error::StoreError;
use crate::domain::identity::Identity;
use crate::domain::numbering;
use crate::domain::policies::policy::{NewPolicy, Policy, PolicyRecord};

pub struct CreatePolicy<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub farmers: &'a F,
    pub policies: &'a P,
}

impl<'a, F, P> CreatePolicy<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub async fn execute(&self, identity: &Identity, input: &NewPolicy) -> ServiceResult<Policy> {
        // Ownership needs the resolved farmer, so references are checked first.
        let farmer = integrity::check_policy_references(self.farmers, input.farmer_id).await?;
        access::require(
            access::resolve_farmer(identity, &farmer),
            "Not authorized to create policy for this farmer",
        )?;
        input.validate()?;

        for attempt in 1..=numbering::MAX_NUMBER_ATTEMPTS {
            let record = PolicyRecord::from_new(input, farmer.id, numbering::policy_number());
            match self.policies.create(&record).await {
                Ok(policy) => {
                    tracing::info!(policy_id = %policy.id, policy_number = %policy.policy_number, farmer_id = %farmer.id, "policy_created");
                    return Ok(policy);
                }
                Err(StoreError::Duplicate(field)) => {
                    tracing::warn!(attempt, %field, "policy_number_collision");
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(ServiceError::Conflict(
            "Could not allocate a unique policy number".into(),
        ))
    }
}
