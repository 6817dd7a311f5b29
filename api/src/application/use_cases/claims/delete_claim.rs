use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::claim_repository::ClaimRepository;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::domain::claims::claim::ClaimStatus;
use crate::domain::identity::Identity;

pub struct DeleteClaim<'a, F, C>
where
    F: FarmerRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub farmers: &'a F,
    pub claims: &'a C,
}

impl<'a, F, C> DeleteClaim<'a, F, C>
where
    F: FarmerRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub async fn execute(&self, identity: &Identity, id: Uuid) -> ServiceResult<()> {
        let claim = self
            .claims
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Claim"))?;
        let access = access::require(
            access::resolve_record(self.farmers, identity, &claim).await?,
            "Not authorized to delete this claim",
        )?;
        if !access.is_admin() && claim.status != ClaimStatus::Pending {
            return Err(ServiceError::Conflict(
                "Cannot delete claim that is already under review or processed".into(),
            ));
        }
        if !self.claims.delete(id).await? {
            return Err(ServiceError::NotFound("Claim"));
        }
        tracing::info!(claim_id = %id, actor = %identity.id, "claim_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MemoryStore, claim_input, farmer_input, policy_input};
    use crate::domain::claims::claim::ClaimPatch;

    #[tokio::test]
    async fn owner_cannot_delete_reviewed_claim_but_admin_can() {
        let store = MemoryStore::default();
        let owner = Identity::user(Uuid::new_v4());
        let farmer = store.seed_farmer(owner.id, farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let claim = store.seed_claim(claim_input(policy.id, farmer.id));
        let patch = ClaimPatch {
            status: Some(ClaimStatus::UnderReview),
            ..Default::default()
        };
        ClaimRepository::update(&store, claim.id, &patch).await.unwrap();
        let uc = DeleteClaim {
            farmers: &store,
            claims: &store,
        };

        let err = uc.execute(&owner, claim.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert!(store.claim(claim.id).is_some());

        uc.execute(&Identity::admin(Uuid::new_v4()), claim.id)
            .await
            .unwrap();
        assert!(store.claim(claim.id).is_none());
    }

    #[tokio::test]
    async fn owner_deletes_pending_claim() {
        let store = MemoryStore::default();
        let owner = Identity::user(Uuid::new_v4());
        let farmer = store.seed_farmer(owner.id, farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let claim = store.seed_claim(claim_input(policy.id, farmer.id));
        let uc = DeleteClaim {
            farmers: &store,
            claims: &store,
        };

        uc.execute(&owner, claim.id).await.unwrap();
        assert_eq!(store.claim_count(), 0);
    }

    #[tokio::test]
    async fn stranger_cannot_delete_claim() {
        let store = MemoryStore::default();
        let owner = Identity::user(Uuid::new_v4());
        let farmer = store.seed_farmer(owner.id, farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let claim = store.seed_claim(claim_input(policy.id, farmer.id));
        let uc = DeleteClaim {
            farmers: &store,
            claims: &store,
        };

        let err = uc
            .execute(&Identity::user(Uuid::new_v4()), claim.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert!(store.claim(claim.id).is_some());
    }
}
