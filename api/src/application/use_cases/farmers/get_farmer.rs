use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::domain::farmers::farmer::Farmer;
use crate::domain::identity::Identity;

pub struct GetFarmer<'a, R: FarmerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FarmerRepository + ?Sized> GetFarmer<'a, R> {
    pub async fn execute(&self, identity: &Identity, id: Uuid) -> ServiceResult<Farmer> {
        let farmer = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Farmer"))?;
        access::require(
            access::resolve_farmer(identity, &farmer),
            "Not authorized to access this farmer profile",
        )?;
        Ok(farmer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{MemoryStore, farmer_input};

    #[tokio::test]
    async fn other_user_is_forbidden_but_admin_is_not() {
        let store = MemoryStore::default();
        let u1 = Uuid::new_v4();
        let f1 = store.seed_farmer(u1, farmer_input("111122223333"));
        let uc = GetFarmer { repo: &store };

        let err = uc
            .execute(&Identity::user(Uuid::new_v4()), f1.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let seen = uc
            .execute(&Identity::admin(Uuid::new_v4()), f1.id)
            .await
            .unwrap();
        assert_eq!(seen.id, f1.id);

        let own = uc.execute(&Identity::user(u1), f1.id).await.unwrap();
        assert_eq!(own.owner_id, u1);
    }

    #[tokio::test]
    async fn missing_farmer_is_not_found() {
        let store = MemoryStore::default();
        let uc = GetFarmer { repo: &store };
        let err = uc
            .execute(&Identity::admin(Uuid::new_v4()), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound("Farmer")));
    }
}
