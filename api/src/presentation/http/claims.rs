use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, put},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::dto::records::ClaimViewDto;
use crate::application::use_cases::claims::create_claim::CreateClaim;
use crate::application::use_cases::claims::delete_claim::DeleteClaim;
use crate::application::use_cases::claims::get_claim::GetClaim;
use crate::application::use_cases::claims::list_claims::ListClaims;
use crate::application::use_cases::claims::update_claim::UpdateClaim;
use crate::application::use_cases::claims::update_claim_status::{StatusChange, UpdateClaimStatus};
use crate::bootstrap::app_context::AppContext;
use crate::domain::claims::claim::{Claim, ClaimDocuments, ClaimPatch, ClaimStatus, NewClaim};
use crate::presentation::http::auth::CurrentIdentity;
use crate::presentation::http::parse_id;
use crate::presentation::http::projections::{FarmerSummary, PolicySummary};
use crate::presentation::http::response::{self, ApiResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub policy_id: Uuid,
    pub farmer_id: Uuid,
    pub claim_number: String,
    pub crop_under_loss: String,
    pub date_of_loss: NaiveDate,
    pub cause_of_loss: String,
    pub localized_risk: Option<String>,
    pub declaration: String,
    pub place: String,
    pub claim_date: DateTime<Utc>,
    pub claim_amount: Option<f64>,
    pub status: ClaimStatus,
    pub documents: ClaimDocuments,
    pub reviewed_by: Option<Uuid>,
    pub review_date: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer: Option<FarmerSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicySummary>,
}

impl From<Claim> for ClaimResponse {
    fn from(c: Claim) -> Self {
        ClaimResponse {
            id: c.id,
            policy_id: c.policy_id,
            farmer_id: c.farmer_id,
            claim_number: c.claim_number,
            crop_under_loss: c.crop_under_loss,
            date_of_loss: c.date_of_loss,
            cause_of_loss: c.cause_of_loss,
            localized_risk: c.localized_risk,
            declaration: c.declaration,
            place: c.place,
            claim_date: c.claim_date,
            claim_amount: c.claim_amount,
            status: c.status,
            documents: c.documents,
            reviewed_by: c.reviewed_by,
            review_date: c.review_date,
            remarks: c.remarks,
            created_at: c.created_at,
            farmer: None,
            policy: None,
        }
    }
}

impl From<ClaimViewDto> for ClaimResponse {
    fn from(v: ClaimViewDto) -> Self {
        ClaimResponse {
            farmer: v.farmer.map(Into::into),
            policy: v.policy.map(Into::into),
            ..ClaimResponse::from(v.claim)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClaimRequest {
    pub policy_id: Uuid,
    pub farmer_id: Uuid,
    pub crop_under_loss: String,
    pub date_of_loss: NaiveDate,
    pub cause_of_loss: String,
    pub localized_risk: Option<String>,
    pub declaration: String,
    pub place: String,
    pub claim_amount: Option<f64>,
    #[serde(default)]
    pub documents: ClaimDocuments,
}

impl From<CreateClaimRequest> for NewClaim {
    fn from(r: CreateClaimRequest) -> Self {
        NewClaim {
            policy_id: r.policy_id,
            farmer_id: r.farmer_id,
            crop_under_loss: r.crop_under_loss,
            date_of_loss: r.date_of_loss,
            cause_of_loss: r.cause_of_loss,
            localized_risk: r.localized_risk,
            declaration: r.declaration,
            place: r.place,
            claim_amount: r.claim_amount,
            documents: r.documents,
        }
    }
}

/// Owners may only change `documents`; other fields they send are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateClaimRequest {
    pub crop_under_loss: Option<String>,
    pub date_of_loss: Option<NaiveDate>,
    pub cause_of_loss: Option<String>,
    pub localized_risk: Option<String>,
    pub declaration: Option<String>,
    pub place: Option<String>,
    pub claim_amount: Option<f64>,
    pub status: Option<ClaimStatus>,
    pub documents: Option<ClaimDocuments>,
    pub remarks: Option<String>,
}

impl From<UpdateClaimRequest> for ClaimPatch {
    fn from(r: UpdateClaimRequest) -> Self {
        ClaimPatch {
            crop_under_loss: r.crop_under_loss,
            date_of_loss: r.date_of_loss,
            cause_of_loss: r.cause_of_loss,
            localized_risk: r.localized_risk,
            declaration: r.declaration,
            place: r.place,
            claim_amount: r.claim_amount,
            status: r.status,
            documents: r.documents,
            remarks: r.remarks,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateClaimStatusRequest {
    pub status: Option<ClaimStatus>,
    pub remarks: Option<String>,
    pub claim_amount: Option<f64>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/claims", get(list_claims).post(create_claim))
        .route(
            "/claims/:id",
            get(get_claim).put(update_claim).delete(delete_claim),
        )
        .route("/claims/:id/status", put(update_claim_status))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/v1/claims", tag = "Claims", responses(
    (status = 200, description = "Admins see every claim, others their own farmers' claims", body = [ClaimResponse])
))]
pub async fn list_claims(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Vec<ClaimResponse>> {
    let farmers = ctx.farmer_repo();
    let policies = ctx.policy_repo();
    let claims = ctx.claim_repo();
    let uc = ListClaims {
        farmers: farmers.as_ref(),
        policies: policies.as_ref(),
        claims: claims.as_ref(),
    };
    let rows = uc.execute(&identity).await?;
    response::ok_list(rows.into_iter().map(Into::into).collect())
}

#[utoipa::path(post, path = "/api/v1/claims", tag = "Claims", request_body = CreateClaimRequest, responses(
    (status = 201, body = ClaimResponse),
    (status = 400, description = "Validation failed or policy does not belong to the farmer"),
    (status = 404, description = "Policy or farmer not found")
))]
pub async fn create_claim(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: Result<Json<CreateClaimRequest>, JsonRejection>,
) -> ApiResult<ClaimResponse> {
    let Json(req) = payload?;
    let farmers = ctx.farmer_repo();
    let policies = ctx.policy_repo();
    let claims = ctx.claim_repo();
    let uc = CreateClaim {
        farmers: farmers.as_ref(),
        policies: policies.as_ref(),
        claims: claims.as_ref(),
    };
    let claim = uc.execute(&identity, &req.into()).await?;
    response::created(claim.into())
}

#[utoipa::path(get, path = "/api/v1/claims/{id}", tag = "Claims",
    params(("id" = Uuid, Path, description = "Claim ID")),
    responses((status = 200, body = ClaimResponse), (status = 404, description = "Claim not found")))]
pub async fn get_claim(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<ClaimResponse> {
    let id = parse_id("Claim", &id)?;
    let farmers = ctx.farmer_repo();
    let policies = ctx.policy_repo();
    let claims = ctx.claim_repo();
    let uc = GetClaim {
        farmers: farmers.as_ref(),
        policies: policies.as_ref(),
        claims: claims.as_ref(),
    };
    response::ok(uc.execute(&identity, id).await?.into())
}

#[utoipa::path(put, path = "/api/v1/claims/{id}", tag = "Claims", request_body = UpdateClaimRequest,
    params(("id" = Uuid, Path, description = "Claim ID")),
    responses((status = 200, body = ClaimResponse), (status = 404, description = "Claim not found")))]
pub async fn update_claim(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    payload: Result<Json<UpdateClaimRequest>, JsonRejection>,
) -> ApiResult<ClaimResponse> {
    let id = parse_id("Claim", &id)?;
    let Json(req) = payload?;
    let farmers = ctx.farmer_repo();
    let claims = ctx.claim_repo();
    let uc = UpdateClaim {
        farmers: farmers.as_ref(),
        claims: claims.as_ref(),
    };
    let claim = uc.execute(&identity, id, req.into()).await?;
    response::ok(claim.into())
}

#[utoipa::path(delete, path = "/api/v1/claims/{id}", tag = "Claims",
    params(("id" = Uuid, Path, description = "Claim ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Claim not found"),
        (status = 409, description = "Claim is already under review or processed")
    ))]
pub async fn delete_claim(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let id = parse_id("Claim", &id)?;
    let farmers = ctx.farmer_repo();
    let claims = ctx.claim_repo();
    let uc = DeleteClaim {
        farmers: farmers.as_ref(),
        claims: claims.as_ref(),
    };
    uc.execute(&identity, id).await?;
    response::deleted()
}

#[utoipa::path(put, path = "/api/v1/claims/{id}/status", tag = "Claims", request_body = UpdateClaimStatusRequest,
    params(("id" = Uuid, Path, description = "Claim ID")),
    responses(
        (status = 200, body = ClaimResponse),
        (status = 400, description = "Status missing"),
        (status = 401, description = "Admins only")
    ))]
pub async fn update_claim_status(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    payload: Result<Json<UpdateClaimStatusRequest>, JsonRejection>,
) -> ApiResult<ClaimResponse> {
    let id = parse_id("Claim", &id)?;
    let Json(req) = payload?;
    let claims = ctx.claim_repo();
    let uc = UpdateClaimStatus {
        claims: claims.as_ref(),
    };
    let change = StatusChange {
        status: req.status,
        remarks: req.remarks,
        claim_amount: req.claim_amount,
    };
    let claim = uc.execute(&identity, id, change).await?;
    response::ok(claim.into())
}
