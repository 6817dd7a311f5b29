use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::integrity;
use crate::application::ports::claim_repository::ClaimRepository;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::application::ports::store_error::StoreError;
use crate::domain::claims::claim::{Claim, ClaimRecord, NewClaim};
use crate::domain::identity::Identity;
use crate::domain::numbering;

pub struct CreateClaim<'a, F, P, C>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub farmers: &'a F,
    pub policies: &'a P,
    pub claims: &'a C,
}

impl<'a, F, P, C> CreateClaim<'a, F, P, C>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub async fn execute(&self, identity: &Identity, input: &NewClaim) -> ServiceResult<Claim> {
        let (policy, farmer) = integrity::check_claim_references(
            self.policies,
            self.farmers,
            input.policy_id,
            input.farmer_id,
        )
        .await?;
        access::require(
            access::resolve_farmer(identity, &farmer),
            "Not authorized to create claim for this farmer",
        )?;
        input.validate()?;

        for attempt in 1..=numbering::MAX_NUMBER_ATTEMPTS {
            let record = ClaimRecord::from_new(input, numbering::claim_number());
            match self.claims.create(&record).await {
                Ok(claim) => {
                    tracing::info!(
                        claim_id = %claim.id,
                        claim_number = %claim.claim_number,
                        policy_id = %policy.id,
                        farmer_id = %farmer.id,
                        "claim_created"
                    );
                    return Ok(claim);
                }
                Err(StoreError::Duplicate(field)) => {
                    tracing::warn!(attempt, %field, "claim_number_collision");
                }
                Err(other) => return Err(other.into()),
            }
        }
        Err(ServiceError::Conflict(
            "Could not allocate a unique claim number".into(),
        ))
    }
}
