use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::farmers::create_farmer::CreateFarmer;
use crate::application::use_cases::farmers::delete_farmer::DeleteFarmer;
use crate::application::use_cases::farmers::get_farmer::GetFarmer;
use crate::application::use_cases::farmers::list_farmers::ListFarmers;
use crate::application::use_cases::farmers::update_farmer::UpdateFarmer;
use crate::bootstrap::app_context::AppContext;
use crate::domain::farmers::farmer::{BankDetails, Category, Farmer, FarmerPatch, Gender, NewFarmer};
use crate::presentation::http::auth::CurrentIdentity;
use crate::presentation::http::parse_id;
use crate::presentation::http::response::{self, ApiResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct FarmerResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub father_name: String,
    pub category: Category,
    pub gender: Gender,
    pub address: String,
    pub contact_number: String,
    pub aadhaar_number: String,
    pub bank_details: BankDetails,
    pub has_loan_or_kcc: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Farmer> for FarmerResponse {
    fn from(f: Farmer) -> Self {
        FarmerResponse {
            id: f.id,
            owner_id: f.owner_id,
            name: f.name,
            father_name: f.father_name,
            category: f.category,
            gender: f.gender,
            address: f.address,
            contact_number: f.contact_number,
            aadhaar_number: f.aadhaar_number,
            bank_details: f.bank_details,
            has_loan_or_kcc: f.has_loan_or_kcc,
            created_at: f.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFarmerRequest {
    pub name: String,
    pub father_name: String,
    pub category: Category,
    pub gender: Gender,
    pub address: String,
    pub contact_number: String,
    pub aadhaar_number: String,
    pub bank_details: BankDetails,
    #[serde(default)]
    pub has_loan_or_kcc: bool,
}

impl From<CreateFarmerRequest> for NewFarmer {
    fn from(r: CreateFarmerRequest) -> Self {
        NewFarmer {
            name: r.name,
            father_name: r.father_name,
            category: r.category,
            gender: r.gender,
            address: r.address,
            contact_number: r.contact_number,
            aadhaar_number: r.aadhaar_number,
            bank_details: r.bank_details,
            has_loan_or_kcc: r.has_loan_or_kcc,
        }
    }
}

/// Any subset of profile fields. The owner cannot be changed.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFarmerRequest {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub aadhaar_number: Option<String>,
    pub bank_details: Option<BankDetails>,
    pub has_loan_or_kcc: Option<bool>,
}

impl From<UpdateFarmerRequest> for FarmerPatch {
    fn from(r: UpdateFarmerRequest) -> Self {
        FarmerPatch {
            name: r.name,
            father_name: r.father_name,
            category: r.category,
            gender: r.gender,
            address: r.address,
            contact_number: r.contact_number,
            aadhaar_number: r.aadhaar_number,
            bank_details: r.bank_details,
            has_loan_or_kcc: r.has_loan_or_kcc,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/farmers", get(list_farmers).post(create_farmer))
        .route(
            "/farmers/:id",
            get(get_farmer).put(update_farmer).delete(delete_farmer),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/v1/farmers", tag = "Farmers", responses(
    (status = 200, body = [FarmerResponse]),
    (status = 401, description = "Missing token or not an admin")
))]
pub async fn list_farmers(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Vec<FarmerResponse>> {
    let repo = ctx.farmer_repo();
    let uc = ListFarmers {
        repo: repo.as_ref(),
    };
    let rows = uc.execute(&identity).await?;
    response::ok_list(rows.into_iter().map(Into::into).collect())
}

#[utoipa::path(post, path = "/api/v1/farmers", tag = "Farmers", request_body = CreateFarmerRequest, responses(
    (status = 201, body = FarmerResponse),
    (status = 400, description = "Validation failed"),
    (status = 409, description = "Profile already exists for this identity or Aadhaar number")
))]
pub async fn create_farmer(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    payload: Result<Json<CreateFarmerRequest>, JsonRejection>,
) -> ApiResult<FarmerResponse> {
    let Json(req) = payload?;
    let repo = ctx.farmer_repo();
    let uc = CreateFarmer {
        repo: repo.as_ref(),
    };
    let farmer = uc.execute(&identity, &req.into()).await?;
    response::created(farmer.into())
}

#[utoipa::path(get, path = "/api/v1/farmers/{id}", tag = "Farmers",
    params(("id" = Uuid, Path, description = "Farmer ID")),
    responses((status = 200, body = FarmerResponse), (status = 404, description = "Farmer not found")))]
pub async fn get_farmer(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<FarmerResponse> {
    let id = parse_id("Farmer", &id)?;
    let repo = ctx.farmer_repo();
    let uc = GetFarmer {
        repo: repo.as_ref(),
    };
    response::ok(uc.execute(&identity, id).await?.into())
}

#[utoipa::path(put, path = "/api/v1/farmers/{id}", tag = "Farmers", request_body = UpdateFarmerRequest,
    params(("id" = Uuid, Path, description = "Farmer ID")),
    responses((status = 200, body = FarmerResponse), (status = 404, description = "Farmer not found")))]
pub async fn update_farmer(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFarmerRequest>, JsonRejection>,
) -> ApiResult<FarmerResponse> {
    let id = parse_id("Farmer", &id)?;
    let Json(req) = payload?;
    let repo = ctx.farmer_repo();
    let uc = UpdateFarmer {
        repo: repo.as_ref(),
    };
    let farmer = uc.execute(&identity, id, &req.into()).await?;
    response::ok(farmer.into())
}

#[utoipa::path(delete, path = "/api/v1/farmers/{id}", tag = "Farmers",
    params(("id" = Uuid, Path, description = "Farmer ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Farmer not found")))]
pub async fn delete_farmer(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<serde_json::Value> {
    let id = parse_id("Farmer", &id)?;
    let repo = ctx.farmer_repo();
    let uc = DeleteFarmer {
        repo: repo.as_ref(),
    };
    uc.execute(&identity, id).await?;
    response::deleted()
}
