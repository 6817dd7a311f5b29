use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::records::PolicyViewDto;
use crate::application::use_cases::policies::create_policy::CreatePolicy;
use crate::application::use_cases::policies::delete_policy::DeletePolicy;
use crate::application::use_cases::policies::get_policy::GetPolicy;
use crate::application::use_cases::policies::list_policies::ListPolicies;
use crate::application::use_cases::policies::update_policy::UpdatePolicy;
use crate::bootstrap::app_context::AppContext;
use crate::domain::policies::policy::{NewPolicy, Policy, PolicyPatch, PolicyStatus};
use crate::presentation::http::auth::CurrentIdentity;
use crate::presentation::http::parse_id;
use crate::presentation::http::projections::FarmerSummary;
use crate::presentation::http::response::{self, ApiResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct PolicyResponse {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub policy_number: String,
    pub crop_type: String,
    pub area_insured: f64,
    pub sum_insured: f64,
    pub premium: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PolicyStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer: Option<FarmerSummary>,
}

impl From<Policy> for PolicyResponse {
    fn from(p: Policy) -> Self {
        PolicyResponse {
            id: p.id,
            farmer_id: p.farmer_id,
            policy_number: p.policy_number,
            crop_type: p.crop_type,
            area_insured: p.area_insured,
            sum_insured: p.sum_insured,
            premium: p.premium,
            start_date: p.start_date,
            end_date: p.end_date,
            status: p.status,
            created_at: p.created_at,
            farmer: None,
        }
    }
}

impl From<PolicyViewDto> for PolicyResponse {
    fn from(v: PolicyViewDto) -> Self {
        PolicyResponse {
            farmer: v.farmer.map(Into::into),
            ..PolicyResponse::from(v.policy)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePolicyRequest {
    pub farmer_id: Uuid,
    pub crop_type: String,
    pub area_insured: f64,
    pub sum_insured: f64,
    pub premium: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<PolicyStatus>,
}

impl From<CreatePolicyRequest> for NewPolicy {
    fn from(r: CreatePolicyRequest) -> Self {
        NewPolicy {
            farmer_id: r.farmer_id,
            crop_type: r.crop_type,
            area_insured: r.area_insured,
            sum_insured: r.sum_insured,
            premium: r.premium,
            start_date: r.start_date,
            end_date: r.end_date,
            status: r.status,
        }
    }
}

/// The farmer and the policy number are fixed once issued.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePolicyRequest {
    pub crop_type: Option<String>,
    pub area_insured: Option<f64>,
    pub sum_insured: Option<f64>,
    pub premium: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<PolicyStatus>,
}

impl From<UpdatePolicyRequest> for PolicyPatch {
    fn from(r: UpdatePolicyRequest) -> Self {
        PolicyPatch {
            crop_type: r.crop_type,
            area_insured: r.area_insured,
            sum_insured: r.sum_insured,
            premium: r.premium,
            start_date: r.start_date,
            end_date: r.end_date,
            status: r.status,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/policies", get(list_policies).post(create_policy))
        .route(
            "/policies/:id",
            get(get_policy).put(update_policy).delete(delete_policy),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/v1/policies", tag = "Policies", responses(
    (status = 200, description = "Admins see every policy, others their own farmers' policies", body = [PolicyResponse])
))]
pub async fn list_policies(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Vec<PolicyResponse>> {
    let farmers = ctx.farmer_repo();
    let policies = ctx.policy_repo();
    let uc = ListPolicies {
        farmers: farmers.as_ref(),
        policies: policies.as_ref(),
    };
    let rows = uc.execute(&identity).await?;
    response::ok_list(rows.into_iter().map(Into::into).collect())
}

#[utoipa::path(post, path = "/api/v1/policies", tag = "Policies", request_body = CreatePolicyRequest, responses(
    (status = 201, body = PolicyResponse),
    (status = 404, description = "Farmer not found"),
    (status = 401, description = "Farmer belongs to another identity")
))]
pub async fn create_policy(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: Result<Json<CreatePolicyRequest>, JsonRejection>,
) -> ApiResult<PolicyResponse> {
    let Json(req) = payload?;
    let farmers = ctx.farmer_repo();
    let policies = ctx.policy_repo();
    let uc = CreatePolicy {
        farmers: farmers.as_ref(),
        policies: policies.as_ref(),
    };
    let policy = uc.execute(&identity, &req.into()).await?;
    response::created(policy.into())
}

#[utoipa::path(get, path = "/api/v1/policies/{id}", tag = "Policies",
    params(("id" = Uuid, Path, description = "Policy ID")),
    responses((status = 200, body = PolicyResponse), (status = 404, description = "Policy not found")))]
pub async fn get_policy(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<PolicyResponse> {
    let id = parse_id("Policy", &id)?;
    let farmers = ctx.farmer_repo();
    let policies = ctx.policy_repo();
    let uc = GetPolicy {
        farmers: farmers.as_ref(),
        policies: policies.as_ref(),
    };
    response::ok(uc.execute(&identity, id).await?.into())
}

#[utoipa::path(put, path = "/api/v1/policies/{id}", tag = "Policies", request_body = UpdatePolicyRequest,
    params(("id" = Uuid, Path, description = "Policy ID")),
    responses((status = 200, body = PolicyResponse), (status = 404, description = "Policy not found")))]
pub async fn update_policy(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePolicyRequest>, JsonRejection>,
) -> ApiResult<PolicyResponse> {
    let id = parse_id("Policy", &id)?;
    let Json(req) = payload?;
    let farmers = ctx.farmer_repo();
    let policies = ctx.policy_repo();
    let uc = UpdatePolicy {
        farmers: farmers.as_ref(),
        policies: policies.as_ref(),
    };
    let policy = uc.execute(&identity, id, &req.into()).await?;
    response::ok(policy.into())
}

#[utoipa::path(delete, path = "/api/v1/policies/{id}", tag = "Policies",
    params(("id" = Uuid, Path, description = "Policy ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Policy not found")))]
pub async fn delete_policy(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let id = parse_id("Policy", &id)?;
    let farmers = ctx.farmer_repo();
    let policies = ctx.policy_repo();
    let uc = DeletePolicy {
        farmers: farmers.as_ref(),
        policies: policies.as_ref(),
    };
    uc.execute(&identity, id).await?;
    response::deleted()
}
