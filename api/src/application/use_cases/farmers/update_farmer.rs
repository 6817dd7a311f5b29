use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::domain::farmers::farmer::{Farmer, FarmerPatch};
use crate::domain::identity::Identity;

pub struct UpdateFarmer<'a, R: FarmerRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FarmerRepository + ?Sized> UpdateFarmer<'a, R> {
    // Owners may change every profile field; claims are narrower (see update_claim).
    pub async fn execute(
        &self,
        identity: &Identity,
        id: Uuid,
        patch: &FarmerPatch,
    ) -> ServiceResult<Farmer> {
        let farmer = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound("Farmer"))?;
        access::require(
            access::resolve_farmer(identity, &farmer),
            "Not authorized to update this farmer profile",
        )?;
        patch.validate()?;
        self.repo
            .update(id, patch)
            .await?
            .ok_or(ServiceError::NotFound("Farmer"))
    }
}
