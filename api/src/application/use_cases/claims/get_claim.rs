use uuid::Uuid;

use crate::application::access;
use crate::application::dto::records::ClaimViewDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::claim_repository::ClaimRepository;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::application::services::projection;
use crate::domain::identity::Identity;

pub struct GetClaim<'a, F, P, C>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub farmers: &'a F,
    pub policies: &'a P,
    pub claims: &'a C,
}

impl<'a, F, P, C> GetClaim<'a, F, P, C>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub async fn execute(&self, identity: &Identity, id: Uuid) -> ServiceResult<ClaimViewDto> {
        let claim = self
            .claims
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Claim"))?;
        access::require(
            access::resolve_record(self.farmers, identity, &claim).await?,
            "Not authorized to access this claim",
        )?;
        Ok(projection::detail_claim(self.farmers, self.policies, claim).await?)
    }
}
