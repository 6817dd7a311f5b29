use crate::application::access;
use crate::application::error::ServiceResult;
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::domain::farmers::farmer::Farmer;
use crate::domain::identity::Identity;

pub struct ListFarmers<'a, R: FarmerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FarmerRepository + ?Sized> ListFarmers<'a, R> {
    pub async fn execute(&self, identity: &Identity) -> ServiceResult<Vec<Farmer>> {
        access::require_admin(identity, "Not authorized to list farmer profiles")?;
        Ok(self.repo.list_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ServiceError;
    use crate::application::testing::{MemoryStore, farmer_input};
    use uuid::Uuid;

    #[tokio::test]
    async fn only_admins_list_farmers() {
        let store = MemoryStore::default();
        let owner = Identity::user(Uuid::new_v4());
        store.seed_farmer(owner.id, farmer_input("111122223333"));
        let uc = ListFarmers { repo: &store };

        let err = uc.execute(&owner).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));

        let all = uc.execute(&Identity::admin(Uuid::new_v4())).await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
