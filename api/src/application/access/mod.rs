use uuid::Uuid;

use crate::application::error::ServiceError;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::domain::claims::claim::Claim;
use crate::domain::farmers::farmer::Farmer;
use crate::domain::identity::Identity;
use crate::domain::policies::policy::Policy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Denied,
    Owner,
    Admin,
}

impl Access {
    pub fn is_granted(self) -> bool {
        !matches!(self, Access::Denied)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Access::Admin)
    }
}

/// Records whose ownership is decided by the farmer they point at.
pub trait FarmerScoped {
    fn farmer_id(&self) -> Uuid;
}

impl FarmerScoped for Policy {
    fn farmer_id(&self) -> Uuid {
        self.farmer_id
    }
}

impl FarmerScoped for Claim {
    fn farmer_id(&self) -> Uuid {
        self.farmer_id
    }
}

// The presentation layer builds the Identity; nothing here reads HTTP state.

pub fn resolve_farmer(identity: &Identity, farmer: &Farmer) -> Access {
    if identity.is_admin() {
        Access::Admin
    } else if farmer.is_owned_by(identity.id) {
        Access::Owner
    } else {
        Access::Denied
    }
}

/// Admins short-circuit without touching the store; everyone else costs one farmer read.
/// A dangling farmer reference resolves to Denied.
pub async fn resolve_farmer_id<F>(
    farmers: &F,
    identity: &Identity,
    farmer_id: Uuid,
) -> anyhow::Result<Access>
where
    F: FarmerRepository + ?Sized,
{
    if identity.is_admin() {
        return Ok(Access::Admin);
    }
    let access = match farmers.get_by_id(farmer_id).await? {
        Some(farmer) => resolve_farmer(identity, &farmer),
        None => Access::Denied,
    };
    Ok(access)
}

pub async fn resolve_record<F, T>(farmers: &F, identity: &Identity, record: &T) -> anyhow::Result<Access>
where
    F: FarmerRepository + ?Sized,
    T: FarmerScoped + ?Sized,
{
    resolve_farmer_id(farmers, identity, record.farmer_id()).await
}

pub fn require(access: Access, denied: &str) -> Result<Access, ServiceError> {
    if access.is_granted() {
        Ok(access)
    } else {
        Err(ServiceError::forbidden(denied))
    }
}

pub fn require_admin(identity: &Identity, denied: &str) -> Result<(), ServiceError> {
    if identity.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::forbidden(denied))
    }
}

/// Farmer ids whose policies and claims a non-admin identity may list.
pub async fn owned_farmer_ids<F>(farmers: &F, identity: &Identity) -> anyhow::Result<Vec<Uuid>>
where
    F: FarmerRepository + ?Sized,
{
    Ok(farmers
        .list_by_owner(identity.id)
        .await?
        .into_iter()
        .map(|f| f.id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MemoryStore, farmer_input};

    #[tokio::test]
    async fn admin_is_resolved_without_reading_the_farmer() {
        let store = MemoryStore::default();
        let admin = Identity::admin(Uuid::new_v4());
        let access = resolve_farmer_id(&store, &admin, Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(access, Access::Admin);
        assert_eq!(store.farmer_reads(), 0);
    }

    #[tokio::test]
    async fn owner_and_stranger_are_told_apart() {
        let store = MemoryStore::default();
        let owner = Identity::user(Uuid::new_v4());
        let farmer = store.seed_farmer(owner.id, farmer_input("111122223333"));

        assert_eq!(resolve_farmer(&owner, &farmer), Access::Owner);
        let stranger = Identity::user(Uuid::new_v4());
        assert_eq!(resolve_farmer(&stranger, &farmer), Access::Denied);

        let via_id = resolve_farmer_id(&store, &stranger, farmer.id).await.unwrap();
        assert_eq!(via_id, Access::Denied);
        assert_eq!(store.farmer_reads(), 1);
    }

    #[tokio::test]
    async fn dangling_farmer_reference_is_denied() {
        let store = MemoryStore::default();
        let user = Identity::user(Uuid::new_v4());
        let access = resolve_farmer_id(&store, &user, Uuid::new_v4()).await.unwrap();
        assert_eq!(access, Access::Denied);
        assert!(require(access, "nope").is_err());
    }
}
