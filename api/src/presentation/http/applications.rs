use axum::{
    Json, Router,
    extract::{Multipart, Path, State, rejection::JsonRejection},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::applications::get_application::GetApplication;
use crate::application::use_cases::applications::list_applications::ListApplications;
use crate::application::use_cases::applications::submit_application::SubmitApplication;
use crate::application::use_cases::applications::update_application::UpdateApplication;
use crate::bootstrap::app_context::AppContext;
use crate::domain::applications::application::{
    ApplicationForm, ApplicationPatch, ApplicationStatus, ApplicationUploads,
    InsuranceApplication, MAX_GROUP_FILES, VerificationStatus,
};
use crate::presentation::http::auth::CurrentIdentity;
use crate::presentation::http::parse_id;
use crate::presentation::http::response::{self, ApiError, ApiResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub submitted_by: Uuid,
    pub farmer_name: String,
    pub aadhar_number: String,
    pub phone_number: String,
    pub address: String,
    pub land_area: f64,
    pub crop_type: String,
    pub soil_type: String,
    pub irrigation_source: String,
    pub aadhar_card: String,
    pub land_document: String,
    pub bank_document: String,
    pub gps_images: Vec<String>,
    pub farm_photos: Vec<String>,
    pub status: ApplicationStatus,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

impl ApplicationResponse {
    /// File references become absolute when a public base URL is configured.
    fn from_domain(a: InsuranceApplication, base_url: Option<&str>) -> Self {
        let link = |r: String| match base_url {
            Some(base) if r.starts_with('/') => format!("{}{}", base, r),
            _ => r,
        };
        ApplicationResponse {
            id: a.id,
            submitted_by: a.submitted_by,
            farmer_name: a.farmer_name,
            aadhar_number: a.aadhar_number,
            phone_number: a.phone_number,
            address: a.address,
            land_area: a.land_area,
            crop_type: a.crop_type,
            soil_type: a.soil_type,
            irrigation_source: a.irrigation_source,
            aadhar_card: link(a.aadhar_card),
            land_document: link(a.land_document),
            bank_document: link(a.bank_document),
            gps_images: a.gps_images.into_iter().map(link).collect(),
            farm_photos: a.farm_photos.into_iter().map(link).collect(),
            status: a.status,
            verification_status: a.verification_status,
            created_at: a.created_at,
        }
    }
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ApplicationMultipart {
    farmer_name: String,
    /// Exactly 12 digits
    aadhar_number: String,
    phone_number: String,
    address: String,
    land_area: f64,
    crop_type: String,
    soil_type: String,
    irrigation_source: String,
    #[schema(value_type = String, format = Binary)]
    aadhar_card: String,
    #[schema(value_type = String, format = Binary)]
    land_document: String,
    #[schema(value_type = String, format = Binary)]
    bank_document: String,
    /// Up to five files
    #[schema(value_type = Vec<String>, format = Binary)]
    gps_images: Vec<String>,
    /// Up to five files
    #[schema(value_type = Vec<String>, format = Binary)]
    farm_photos: Vec<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateApplicationRequest {
    pub farmer_name: Option<String>,
    pub aadhar_number: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub land_area: Option<f64>,
    pub crop_type: Option<String>,
    pub soil_type: Option<String>,
    pub irrigation_source: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub verification_status: Option<VerificationStatus>,
}

impl From<UpdateApplicationRequest> for ApplicationPatch {
    fn from(r: UpdateApplicationRequest) -> Self {
        ApplicationPatch {
            farmer_name: r.farmer_name,
            aadhar_number: r.aadhar_number,
            phone_number: r.phone_number,
            address: r.address,
            land_area: r.land_area,
            crop_type: r.crop_type,
            soil_type: r.soil_type,
            irrigation_source: r.irrigation_source,
            status: r.status,
            verification_status: r.verification_status,
        }
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/insurance", get(list_applications).post(submit_application))
        .route("/insurance/:id", get(get_application).put(update_application))
        .with_state(ctx)
}

/// Per-field cap on uploaded files, or None for fields that are not file slots.
fn file_slot_limit(field: &str) -> Option<usize> {
    match field {
        "aadhar_card" | "land_document" | "bank_document" => Some(1),
        "gps_images" | "farm_photos" => Some(MAX_GROUP_FILES),
        _ => None,
    }
}

fn file_slot<'a>(uploads: &'a mut ApplicationUploads, field: &str) -> Option<&'a mut Vec<String>> {
    match field {
        "aadhar_card" => Some(&mut uploads.aadhar_card),
        "land_document" => Some(&mut uploads.land_document),
        "bank_document" => Some(&mut uploads.bank_document),
        "gps_images" => Some(&mut uploads.gps_images),
        "farm_photos" => Some(&mut uploads.farm_photos),
        _ => None,
    }
}

fn is_blank_file_part(filename: Option<&str>, data: &[u8]) -> bool {
    filename.map(str::is_empty).unwrap_or(true) && data.is_empty()
}

fn set_form_text(form: &mut ApplicationForm, field: &str, value: String) -> Result<(), ApiError> {
    match field {
        "farmer_name" => form.farmer_name = value,
        "aadhar_number" => form.aadhar_number = value.trim().to_string(),
        "phone_number" => form.phone_number = value,
        "address" => form.address = value,
        "land_area" => {
            let trimmed = value.trim();
            form.land_area = if trimmed.is_empty() {
                None
            } else {
                Some(
                    trimmed
                        .parse()
                        .map_err(|_| ApiError::bad_request("Land area must be a number"))?,
                )
            };
        }
        "crop_type" => form.crop_type = value,
        "soil_type" => form.soil_type = value,
        "irrigation_source" => form.irrigation_source = value,
        _ => {}
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/insurance",
    tag = "Insurance Applications",
    request_body(content = ApplicationMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, body = ApplicationResponse),
        (status = 400, description = "Missing documents, too many files, unsupported type or invalid fields")
    )
)]
pub async fn submit_application(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    mut multipart: Multipart,
) -> ApiResult<ApplicationResponse> {
    let storage = ctx.upload_storage();
    let mut form = ApplicationForm::default();
    let mut uploads = ApplicationUploads::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if field.file_name().is_none() {
            let text = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;
            set_form_text(&mut form, &name, text)?;
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        // Browsers send empty optional file inputs as a nameless, bodiless part.
        if is_blank_file_part(filename.as_deref(), &data) {
            continue;
        }
        let limit = file_slot_limit(&name)
            .ok_or_else(|| ApiError::bad_request(format!("Unexpected file field: {}", name)))?;
        let slot_len = file_slot(&mut uploads, &name).map(|v| v.len()).unwrap_or_default();
        if slot_len >= limit {
            return Err(ApiError::bad_request(format!(
                "Too many files for {} (max {})",
                name, limit
            )));
        }
        let stored = storage
            .store(filename.as_deref(), content_type.as_deref(), &data)
            .await?;
        if let Some(slot) = file_slot(&mut uploads, &name) {
            slot.push(stored.reference);
        }
    }

    let repo = ctx.application_repo();
    let uc = SubmitApplication {
        repo: repo.as_ref(),
    };
    let app = uc.execute(&identity, form, uploads).await?;
    response::created(ApplicationResponse::from_domain(
        app,
        ctx.cfg.public_base_url.as_deref(),
    ))
}

#[utoipa::path(get, path = "/api/v1/insurance", tag = "Insurance Applications", responses(
    (status = 200, body = [ApplicationResponse]),
    (status = 401, description = "Admins only")
))]
pub async fn list_applications(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
) -> ApiResult<Vec<ApplicationResponse>> {
    let repo = ctx.application_repo();
    let uc = ListApplications {
        repo: repo.as_ref(),
    };
    let base = ctx.cfg.public_base_url.as_deref();
    let rows = uc.execute(&identity).await?;
    response::ok_list(
        rows.into_iter()
            .map(|a| ApplicationResponse::from_domain(a, base))
            .collect(),
    )
}

#[utoipa::path(get, path = "/api/v1/insurance/{id}", tag = "Insurance Applications",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses((status = 200, body = ApplicationResponse), (status = 404, description = "Application not found")))]
pub async fn get_application(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
) -> ApiResult<ApplicationResponse> {
    let id = parse_id("Application", &id)?;
    let repo = ctx.application_repo();
    let uc = GetApplication {
        repo: repo.as_ref(),
    };
    let app = uc.execute(&identity, id).await?;
    response::ok(ApplicationResponse::from_domain(
        app,
        ctx.cfg.public_base_url.as_deref(),
    ))
}

#[utoipa::path(put, path = "/api/v1/insurance/{id}", tag = "Insurance Applications", request_body = UpdateApplicationRequest,
    params(("id" = Uuid, Path, description = "Application ID")),
    responses((status = 200, body = ApplicationResponse), (status = 401, description = "Admins only")))]
pub async fn update_application(
    State(ctx): State<AppContext>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<String>,
    payload: Result<Json<UpdateApplicationRequest>, JsonRejection>,
) -> ApiResult<ApplicationResponse> {
    let id = parse_id("Application", &id)?;
    let Json(req) = payload?;
    let repo = ctx.application_repo();
    let uc = UpdateApplication {
        repo: repo.as_ref(),
    };
    let app = uc.execute(&identity, id, &req.into()).await?;
    response::ok(ApplicationResponse::from_domain(
        app,
        ctx.cfg.public_base_url.as_deref(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fields_fill_the_form() {
        let mut form = ApplicationForm::default();
        set_form_text(&mut form, "farmer_name", "Lakshmi".into()).unwrap();
        set_form_text(&mut form, "aadhar_number", " 123412341234 ".into()).unwrap();
        set_form_text(&mut form, "land_area", "2.5".into()).unwrap();
        set_form_text(&mut form, "unknown", "ignored".into()).unwrap();
        assert_eq!(form.farmer_name, "Lakshmi");
        assert_eq!(form.aadhar_number, "123412341234");
        assert_eq!(form.land_area, Some(2.5));

        let err = set_form_text(&mut form, "land_area", "two".into()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn file_slots_have_per_field_caps() {
        assert_eq!(file_slot_limit("bank_document"), Some(1));
        assert_eq!(file_slot_limit("farm_photos"), Some(MAX_GROUP_FILES));
        assert_eq!(file_slot_limit("resume"), None);
    }

    #[test]
    fn references_are_prefixed_with_public_base() {
        let app = InsuranceApplication {
            id: Uuid::new_v4(),
            submitted_by: Uuid::new_v4(),
            farmer_name: "Lakshmi".into(),
            aadhar_number: "123412341234".into(),
            phone_number: "9123456780".into(),
            address: "Kurnool".into(),
            land_area: 3.5,
            crop_type: "Groundnut".into(),
            soil_type: "Red".into(),
            irrigation_source: "Borewell".into(),
            aadhar_card: "/uploads/1-a.pdf".into(),
            land_document: "/uploads/2-l.pdf".into(),
            bank_document: "/uploads/3-b.pdf".into(),
            gps_images: vec!["/uploads/4-g.png".into()],
            farm_photos: Vec::new(),
            status: ApplicationStatus::Pending,
            verification_status: VerificationStatus::Pending,
            created_at: Utc::now(),
        };
        let out = ApplicationResponse::from_domain(app, Some("https://api.example.org"));
        assert_eq!(out.aadhar_card, "https://api.example.org/uploads/1-a.pdf");
        assert_eq!(out.gps_images, vec!["https://api.example.org/uploads/4-g.png"]);
    }

    mod intake {
        use std::sync::Arc;

        use axum::body::{Body, to_bytes};
        use axum::http::{Request, StatusCode, header};
        use tower::ServiceExt;

        use super::super::routes;
        use crate::application::testing::MemoryStore;
        use crate::bootstrap::app_context::{AppContext, AppServices};
        use crate::bootstrap::config::Config;
        use crate::domain::identity::Identity;
        use crate::infrastructure::db::StartupProbe;
        use crate::infrastructure::storage::FsUploadStorage;
        use crate::presentation::http::auth::issue_token;
        use uuid::Uuid;

        const BOUNDARY: &str = "intake-boundary";

        fn text_part(body: &mut String, name: &str, value: &str) {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }

        fn file_part(body: &mut String, name: &str, filename: &str, content_type: &str, data: &str) {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n"
            ));
        }

        #[tokio::test]
        async fn empty_optional_file_inputs_are_ignored() {
            let dir = tempfile::tempdir().unwrap();
            let store = Arc::new(MemoryStore::default());
            let cfg = Config::for_tests();
            let ctx = AppContext::new(
                cfg.clone(),
                AppServices::new(
                    store.clone(),
                    store.clone(),
                    store.clone(),
                    store,
                    Arc::new(FsUploadStorage::new(dir.path().to_path_buf(), 1024)),
                    Arc::new(StartupProbe::fixed(true)),
                ),
            );
            let token = issue_token(&cfg, &Identity::user(Uuid::new_v4()), 600).unwrap();

            let mut body = String::new();
            for (name, value) in [
                ("farmer_name", "Lakshmi Devi"),
                ("aadhar_number", "123412341234"),
                ("phone_number", "9123456780"),
                ("address", "Kurnool"),
                ("land_area", "3.5"),
                ("crop_type", "Groundnut"),
                ("soil_type", "Red"),
                ("irrigation_source", "Borewell"),
            ] {
                text_part(&mut body, name, value);
            }
            file_part(&mut body, "aadhar_card", "aadhar.pdf", "application/pdf", "a");
            file_part(&mut body, "land_document", "land.pdf", "application/pdf", "l");
            file_part(&mut body, "bank_document", "bank.pdf", "application/pdf", "b");
            file_part(&mut body, "gps_images", "", "application/octet-stream", "");
            file_part(&mut body, "farm_photos", "", "application/octet-stream", "");
            body.push_str(&format!("--{BOUNDARY}--\r\n"));

            let req = Request::builder()
                .method("POST")
                .uri("/insurance")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap();
            let res = routes(ctx).oneshot(req).await.unwrap();
            assert_eq!(res.status(), StatusCode::CREATED);

            let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(json["data"]["gps_images"], serde_json::json!([]));
            assert_eq!(json["data"]["farm_photos"], serde_json::json!([]));
            assert!(json["data"]["aadhar_card"]
                .as_str()
                .unwrap()
                .starts_with("/uploads/"));
        }
    }

    #[test]
    fn blank_file_parts_are_detected() {
        assert!(is_blank_file_part(Some(""), b""));
        assert!(is_blank_file_part(None, b""));
        assert!(!is_blank_file_part(Some(""), b"x"));
        assert!(!is_blank_file_part(Some("gps.png"), b""));
    }
}
