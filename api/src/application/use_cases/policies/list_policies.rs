use crate::application::access;
use crate::application::dto::records::PolicyViewDto;
use crate::application::error::ServiceResult;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::application::services::projection;
use crate::domain::identity::Identity;

pub struct ListPolicies<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub farmers: &'a F,
    pub policies: &'a P,
}

impl<'a, F, P> ListPolicies<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub async fn execute(&self, identity: &Identity) -> ServiceResult<Vec<PolicyViewDto>> {
        let rows = if identity.is_admin() {
            self.policies.list_all().await?
        } else {
            let farmer_ids = access::owned_farmer_ids(self.farmers, identity).await?;
            if farmer_ids.is_empty() {
                return Ok(Vec::new());
            }
            self.policies.list_for_farmers(&farmer_ids).await?
        };
        Ok(projection::expand_policies(self.farmers, rows).await?)
    }
}
