use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::claim_repository::ClaimRepository;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::domain::claims::claim::{Claim, ClaimPatch, OWNER_EDITABLE_CLAIM_FIELDS};
use crate::domain::identity::Identity;

pub struct UpdateClaim<'a, F, C>
where
    F: FarmerRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub farmers: &'a F,
    pub claims: &'a C,
}

impl<'a, F, C> UpdateClaim<'a, F, C>
where
    F: FarmerRepository + ?Sized,
    C: ClaimRepository + ?Sized,
{
    pub async fn execute(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: ClaimPatch,
    ) -> ServiceResult<Claim> {
        let claim = self
            .claims
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Claim"))?;
        let access = access::require(
            access::resolve_record(self.farmers, identity, &claim).await?,
            "Not authorized to update this claim",
        )?;
        let patch = if access.is_admin() {
            patch
        } else {
            patch.restrict_to(OWNER_EDITABLE_CLAIM_FIELDS)
        };
        if patch.is_empty() {
            return Ok(claim);
        }
        patch.validate()?;
        self.claims
            .update(id, &patch)
            .await?
            .ok_or(ServiceError::NotFound("Claim"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MemoryStore, claim_input, farmer_input, policy_input};
    use crate::domain::claims::claim::{ClaimDocuments, ClaimStatus};

    fn over_posted() -> ClaimPatch {
        ClaimPatch {
            status: Some(ClaimStatus::Approved),
            claim_amount: Some(1_000_000.0),
            remarks: Some("approved by myself".into()),
            documents: Some(ClaimDocuments {
                land_registration: Some("/uploads/1-land.pdf".into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn owner_can_only_change_documents() {
        let store = MemoryStore::default();
        let owner = Identity::user(Uuid::new_v4());
        let farmer = store.seed_farmer(owner.id, farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let claim = store.seed_claim(claim_input(policy.id, farmer.id));
        let uc = UpdateClaim {
            farmers: &store,
            claims: &store,
        };

        let updated = uc.execute(&owner, claim.id, over_posted()).await.unwrap();
        assert_eq!(updated.status, ClaimStatus::Pending);
        assert_eq!(updated.claim_amount, None);
        assert_eq!(updated.remarks, None);
        assert_eq!(
            updated.documents.land_registration.as_deref(),
            Some("/uploads/1-land.pdf")
        );
    }

    #[tokio::test]
    async fn admin_updates_any_field() {
        let store = MemoryStore::default();
        let farmer = store.seed_farmer(Uuid::new_v4(), farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let claim = store.seed_claim(claim_input(policy.id, farmer.id));
        let uc = UpdateClaim {
            farmers: &store,
            claims: &store,
        };

        let updated = uc
            .execute(&Identity::admin(Uuid::new_v4()), claim.id, over_posted())
            .await
            .unwrap();
        assert_eq!(updated.status, ClaimStatus::Approved);
        assert_eq!(updated.claim_amount, Some(1_000_000.0));
    }

    #[tokio::test]
    async fn stranger_cannot_touch_claim() {
        let store = MemoryStore::default();
        let farmer = store.seed_farmer(Uuid::new_v4(), farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let claim = store.seed_claim(claim_input(policy.id, farmer.id));
        let uc = UpdateClaim {
            farmers: &store,
            claims: &store,
        };

        let err = uc
            .execute(&Identity::user(Uuid::new_v4()), claim.id, over_posted())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert_eq!(store.claim(claim.id).unwrap().documents, ClaimDocuments::default());
    }
}
