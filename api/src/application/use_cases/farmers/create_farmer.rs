use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::store_error::StoreError;
use crate::domain::farmers::farmer::{Farmer, NewFarmer};
use crate::domain::identity::Identity;

pub struct CreateFarmer<'a, R: FarmerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FarmerRepository + ?Sized> CreateFarmer<'a, R> {
    pub async fn execute(&self, identity: &Identity, input: &NewFarmer) -> ServiceResult<Farmer> {
        input.validate()?;
        if !self.repo.list_by_owner(identity.id).await?.is_empty() {
            return Err(ServiceError::Conflict(
                "User already has a farmer profile".into(),
            ));
        }
        // The unique owner index closes the race between the lookup above and this insert.
        let farmer = self
            .repo
            .create(identity.id, input)
            .await
            .map_err(|err| match err {
                StoreError::Duplicate(field) if field == "owner_id" => {
                    ServiceError::Conflict("User already has a farmer profile".into())
                }
                other => other.into(),
            })?;
        tracing::info!(farmer_id = %farmer.id, owner_id = %identity.id, "farmer_created");
        Ok(farmer)
    }
}
