use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::application::dto::records::{ClaimViewDto, PolicyViewDto};
use crate::application::ports::farmer_repository::FarmerRepository;
use crate::application::ports::policy_repository::PolicyRepository;
use crate::domain::claims::claim::Claim;
use crate::domain::farmers::farmer::{Farmer, FarmerProjection};
use crate::domain::policies::policy::{Policy, PolicyProjection};

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

async fn farmers_by_id<F>(farmers: &F, ids: Vec<Uuid>) -> anyhow::Result<HashMap<Uuid, Farmer>>
where
    F: FarmerRepository + ?Sized,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(farmers
        .list_by_ids(&ids)
        .await?
        .into_iter()
        .map(|f| (f.id, f))
        .collect())
}

/// List responses carry the brief farmer projection.
pub async fn expand_policies<F>(farmers: &F, policies: Vec<Policy>) -> anyhow::Result<Vec<PolicyViewDto>>
where
    F: FarmerRepository + ?Sized,
{
    let by_id = farmers_by_id(farmers, distinct(policies.iter().map(|p| p.farmer_id))).await?;
    Ok(policies
        .into_iter()
        .map(|policy| PolicyViewDto {
            farmer: by_id.get(&policy.farmer_id).map(FarmerProjection::brief),
            policy,
        })
        .collect())
}

pub async fn expand_claims<F, P>(
    farmers: &F,
    policies: &P,
    claims: Vec<Claim>,
) -> anyhow::Result<Vec<ClaimViewDto>>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    let farmer_map = farmers_by_id(farmers, distinct(claims.iter().map(|c| c.farmer_id))).await?;
    let policy_ids = distinct(claims.iter().map(|c| c.policy_id));
    let policy_map: HashMap<Uuid, Policy> = if policy_ids.is_empty() {
        HashMap::new()
    } else {
        policies
            .list_by_ids(&policy_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
    };
    Ok(claims
        .into_iter()
        .map(|claim| ClaimViewDto {
            farmer: farmer_map.get(&claim.farmer_id).map(FarmerProjection::brief),
            policy: policy_map.get(&claim.policy_id).map(PolicyProjection::brief),
            claim,
        })
        .collect())
}

/// Single-record responses carry the detailed projections.
pub async fn detail_policy<F>(farmers: &F, policy: Policy) -> anyhow::Result<PolicyViewDto>
where
    F: FarmerRepository + ?Sized,
{
    let farmer = farmers.get_by_id(policy.farmer_id).await?;
    Ok(PolicyViewDto {
        farmer: farmer.as_ref().map(FarmerProjection::detailed),
        policy,
    })
}

pub async fn detail_claim<F, P>(farmers: &F, policies: &P, claim: Claim) -> anyhow::Result<ClaimViewDto>
where
    F: FarmerRepository + ?Sized,
    P: PolicyRepository + ?Sized,
{
    let farmer = farmers.get_by_id(claim.farmer_id).await?;
    let policy = policies.get_by_id(claim.policy_id).await?;
    Ok(ClaimViewDto {
        farmer: farmer.as_ref().map(FarmerProjection::detailed),
        policy: policy.as_ref().map(PolicyProjection::detailed),
        claim,
    })
}
