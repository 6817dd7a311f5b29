use chrono::Utc;
use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::claim_repository::ClaimRepository;
use crate::domain::claims::claim::{Claim, ClaimReview, ClaimStatus};
use crate::domain::identity::Identity;
use crate::domain::validation;

#[derive(Debug, Clone, Default)]
pub struct StatusChange {
    pub status: Option<ClaimStatus>,
    pub remarks: Option<String>,
    pub claim_amount: Option<f64>,
}

pub struct UpdateClaimStatus<'a, C: ClaimRepository + ?Sized> {
    pub claims: &'a C,
}

impl<'a, C: ClaimRepository + ?Sized> UpdateClaimStatus<'a, C> {
    /// Admin review. Any status may move to any other status.
    pub async fn execute(
        &self,
        identity: &Identity,
        id: Uuid,
        change: StatusChange,
    ) -> ServiceResult<Claim> {
        access::require_admin(identity, "Not authorized to update claim status")?;
        let status = change
            .status
            .ok_or_else(|| ServiceError::BadRequest("Please provide status".into()))?;
        if let Some(amount) = change.claim_amount {
            validation::require_amount("claim_amount", amount, "Claim amount must be positive")?;
        }
        let review = ClaimReview {
            status,
            reviewed_by: identity.id,
            review_date: Utc::now(),
            remarks: change.remarks.filter(|r| !r.trim().is_empty()),
            claim_amount: change.claim_amount,
        };
        let claim = self
            .claims
            .record_review(id, &review)
            .await?
            .ok_or(ServiceError::NotFound("Claim"))?;
        tracing::info!(claim_id = %id, status = status.as_str(), reviewer = %identity.id, "claim_reviewed");
        Ok(claim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MemoryStore, claim_input, farmer_input, policy_input};

    fn approve() -> StatusChange {
        StatusChange {
            status: Some(ClaimStatus::Approved),
            remarks: Some("Verified on site".into()),
            claim_amount: Some(42_000.0),
        }
    }

    #[tokio::test]
    async fn admin_review_stamps_reviewer_and_date() {
        let store = MemoryStore::default();
        let farmer = store.seed_farmer(Uuid::new_v4(), farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let claim = store.seed_claim(claim_input(policy.id, farmer.id));
        let admin = Identity::admin(Uuid::new_v4());
        let uc = UpdateClaimStatus { claims: &store };

        let reviewed = uc.execute(&admin, claim.id, approve()).await.unwrap();
        assert_eq!(reviewed.status, ClaimStatus::Approved);
        assert_eq!(reviewed.reviewed_by, Some(admin.id));
        assert!(reviewed.review_date.is_some());
        assert_eq!(reviewed.claim_amount, Some(42_000.0));
        assert_eq!(reviewed.remarks.as_deref(), Some("Verified on site"));

        // Terminal statuses can be reopened.
        let reopened = uc
            .execute(
                &admin,
                claim.id,
                StatusChange {
                    status: Some(ClaimStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(reopened.status, ClaimStatus::Pending);
        assert_eq!(reopened.claim_amount, Some(42_000.0));
    }

    #[tokio::test]
    async fn owner_is_forbidden_before_anything_else() {
        let store = MemoryStore::default();
        let owner = Identity::user(Uuid::new_v4());
        let farmer = store.seed_farmer(owner.id, farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let claim = store.seed_claim(claim_input(policy.id, farmer.id));
        let uc = UpdateClaimStatus { claims: &store };

        let err = uc.execute(&owner, claim.id, approve()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert_eq!(store.claim(claim.id).unwrap().status, ClaimStatus::Pending);

        let err = uc
            .execute(&owner, Uuid::new_v4(), StatusChange::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn missing_status_then_missing_claim() {
        let store = MemoryStore::default();
        let admin = Identity::admin(Uuid::new_v4());
        let uc = UpdateClaimStatus { claims: &store };

        let err = uc
            .execute(&admin, Uuid::new_v4(), StatusChange::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));

        let err = uc.execute(&admin, Uuid::new_v4(), approve()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("Claim")));
    }

    #[tokio::test]
    async fn blank_remarks_keep_earlier_remarks() {
        let store = MemoryStore::default();
        let farmer = store.seed_farmer(Uuid::new_v4(), farmer_input("111122223333"));
        let policy = store.seed_policy(policy_input(farmer.id));
        let claim = store.seed_claim(claim_input(policy.id, farmer.id));
        let admin = Identity::admin(Uuid::new_v4());
        let uc = UpdateClaimStatus { claims: &store };
        uc.execute(&admin, claim.id, approve()).await.unwrap();

        let updated = uc
            .execute(
                &admin,
                claim.id,
                StatusChange {
                    status: Some(ClaimStatus::UnderReview),
                    remarks: Some("  ".into()),
                    claim_amount: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, ClaimStatus::UnderReview);
        assert_eq!(updated.remarks.as_deref(), Some("Verified on site"));
    }
}
