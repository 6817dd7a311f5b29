use crate::domain::claims::claim::Claim;
use crate::domain::farmers::farmer::FarmerProjection;
use crate::domain::policies::policy::{Policy, PolicyProjection};

/// Policy with its farmer expanded. `farmer` is None when the reference dangles.
#[derive(Debug, Clone)]
pub struct PolicyViewDto {
    pub policy: Policy,
    pub farmer: Option<FarmerProjection>,
}

#[derive(Debug, Clone)]
pub struct ClaimViewDto {
    pub claim: Claim,
    pub farmer: Option<FarmerProjection>,
    pub policy: Option<PolicyProjection>,
}
