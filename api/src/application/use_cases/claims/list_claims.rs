use crate::application::access;
use crate::application::dto::records::ClaimViewDto;
use crate::application::error::ServiceResult;
use crate::application::ports::claim_repository::ClaimRepository;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::application::services::projection;
use crate::domain::identity::Identity;

pub struct ListClaims<'a, F, P, C>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub farmers: &'a F,
    pub policies: &'a P,
    pub claims: &'a C,
}

impl<'a, F, P, C> ListClaims<'a, F, P, C>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub async fn execute(&self, identity: &Identity) -> ServiceResult<Vec<ClaimViewDto>> {
        let rows = if identity.is_admin() {
            self.claims.list_all().await?
        } else {
            let farmer_ids = access::owned_farmer_ids(self.farmers, identity).await?;
            if farmer_ids.is_empty() {
                return Ok(Vec::new());
            }
            self.claims.list_for_farmers(&farmer_ids).await?
        };
        Ok(projection::expand_claims(self.farmers, self.policies, rows).await?)
    }
}
