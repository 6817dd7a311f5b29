use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::domain::identity::Identity;

pub struct DeleteFarmer<'a, R: FarmerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FarmerRepository + ?Sized> DeleteFarmer<'a, R> {
    // Policies and claims pointing at the farmer are left in place.
    pub async fn execute(&self, identity: &Identity, id: Uuid) -> ServiceResult<()> {
        let farmer = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Farmer"))?;
        access::require(
            access::resolve_farmer(identity, &farmer),
            "Not authorized to delete this farmer profile",
        )?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::NotFound("Farmer"));
        }
        tracing::info!(farmer_id = %id, actor = %identity.id, "farmer_deleted");
        Ok(())
    }
}
