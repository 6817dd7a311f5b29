use uuid::Uuid;

use crate::application::access;
use crate::application::dto::records::PolicyViewDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::application::services::projection;
use crate::domain::identity::Identity;

pub struct GetPolicy<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub farmers: &'a F,
    pub policies: &'a P,
}

impl<'a, F, P> GetPolicy<'a, F, P>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    pub async fn execute(&self, identity: &Identity, id: Uuid) -> ServiceResult<PolicyViewDto> {
        let policy = self
            .policies
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Policy"))?;
        access::require(
            access::resolve_record(self.farmers, identity, &policy).await?,
            "Not authorized to access this policy",
        )?;
        Ok(projection::detail_policy(self.farmers, policy).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MemoryStore, farmer_input, policy_input};

    #[tokio::test]
    async fn owner_gets_detailed_farmer_projection() {
        let store = MemoryStore::default();
        let owner = Identity::user(Uuid::new_v4());
        let farmer = store.seed_farmer(owner.id, farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let uc = GetPolicy {
            farmers: &store,
            policies: &store,
        };

        let view = uc.execute(&owner, policy.id).await.unwrap();
        let projected = view.farmer.unwrap();
        assert_eq!(projected.address.as_deref(), Some(farmer.address.as_str()));
        assert_eq!(projected.bank_details, Some(farmer.bank_details));
    }

    #[tokio::test]
    async fn stranger_is_forbidden_and_missing_is_not_found() {
        let store = MemoryStore::default();
        let farmer = store.seed_farmer(Uuid::new_v4(), farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let uc = GetPolicy {
            farmers: &store,
            policies: &store,
        };
        let stranger = Identity::user(Uuid::new_v4());

        let err = uc.execute(&stranger, policy.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let err = uc.execute(&stranger, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("Policy")));
    }
}
