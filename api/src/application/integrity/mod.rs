//! Cross-record reference checks run before a policy or claim is created.
//!
//! Each check reads fresh from the store. The reads and the following insert
//! are not one transaction, so a farmer or policy deleted in between is not
//! detected.

use std::fmt;

use uuid::Uuid;

use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::domain::farmers::farmer::Farmer;
use crate::domain::policies::policy::Policy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTarget {
    Farmer,
    Policy,
}

impl fmt::Display for ReferenceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceTarget::Farmer => f.write_str("Farmer"),
            ReferenceTarget::Policy => f.write_str("Policy"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("{0} not found")]
    NotFound(ReferenceTarget),
    #[error("Policy does not belong to this farmer")]
    PolicyFarmerMismatch,
}

#[derive(thiserror::Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub async fn check_policy_references<F>(farmers: &F, farmer_id: Uuid) -> Result<Farmer, CheckError>
where
    F: FarmerRepository + ?Sized,
{
    farmers
        .get_by_id(farmer_id)
        .await?
        .ok_or_else(|| ReferenceError::NotFound(ReferenceTarget::Farmer).into())
}

/// Policy first, then farmer, then the pair must agree.
pub async fn check_claim_references<P, F>(
    policies: &P,
    farmers: &F,
    policy_id: Uuid,
    farmer_id: Uuid,
) -> Result<(Policy, Farmer), CheckError>
where
    P: PolicyRepository + ?Sized,
    F: FarmerRepository + ?Sized,
{
    let policy = policies
        .get_by_id(policy_id)
        .await?
        .ok_or(ReferenceError::NotFound(ReferenceTarget::Policy))?;
    let farmer = farmers
        .get_by_id(farmer_id)
        .await?
        .ok_or(ReferenceError::NotFound(ReferenceTarget::Farmer))?;
    if policy.farmer_id != farmer.id {
        return Err(ReferenceError::PolicyFarmerMismatch.into());
    }
    Ok((policy, farmer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MemoryStore, farmer_input, policy_input};

    fn reference(err: CheckError) -> ReferenceError {
        match err {
            CheckError::Reference(r) => r,
            CheckError::Store(e) => panic!("unexpected store error: {e}"),
        }
    }

    #[tokio::test]
    async fn policy_requires_existing_farmer() {
        let store = MemoryStore::default();
        let err = check_policy_references(&store, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(
            reference(err),
            ReferenceError::NotFound(ReferenceTarget::Farmer)
        );
    }

    #[tokio::test]
    async fn missing_policy_is_reported_before_missing_farmer() {
        let store = MemoryStore::default();
        let err = check_claim_references(&store, &store, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(
            reference(err),
            ReferenceError::NotFound(ReferenceTarget::Policy)
        );
    }

    #[tokio::test]
    async fn policy_of_another_farmer_is_a_mismatch() {
        let store = MemoryStore::default();
        let f1 = store.seed_farmer(Uuid::new_v4(), farmer_input("111111111111"));
        let f2 = store.seed_farmer(Uuid::new_v4(), farmer_input("222222222222"));
        let p1 = store.seed_policy(policy_input(f1.id));

        let err = check_claim_references(&store, &store, p1.id, f2.id)
            .await
            .unwrap_err();
        assert_eq!(reference(err), ReferenceError::PolicyFarmerMismatch);

        let (policy, farmer) = check_claim_references(&store, &store, p1.id, f1.id)
            .await
            .unwrap();
        assert_eq!(policy.id, p1.id);
        assert_eq!(farmer.id, f1.id);
    }
}
