use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tokio::task::JoinHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use insurance_api::application::ports::store_health::StoreHealth;
use insurance_api::bootstrap::app_context::{AppContext, AppServices};
use insurance_api::bootstrap::config::Config;
use insurance_api::infrastructure::db::repositories::application_repository_sqlx::SqlxApplicationRepository;
use insurance_api::infrastructure::db::repositories::claim_repository_sqlx::SqlxClaimRepository;
use insurance_api::infrastructure::db::repositories::farmer_repository_sqlx::SqlxFarmerRepository;
use insurance_api::infrastructure::db::repositories::policy_repository_sqlx::SqlxPolicyRepository;
use insurance_api::infrastructure::db::{self, StartupProbe};
use insurance_api::infrastructure::storage::FsUploadStorage;
use insurance_api::presentation::http::{health, v1_routes};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            insurance_api::presentation::http::farmers::list_farmers,
            insurance_api::presentation::http::farmers::create_farmer,
            insurance_api::presentation::http::farmers::get_farmer,
            insurance_api::presentation::http::farmers::update_farmer,
            insurance_api::presentation::http::farmers::delete_farmer,
            insurance_api::presentation::http::policies::list_policies,
            insurance_api::presentation::http::policies::create_policy,
            insurance_api::presentation::http::policies::get_policy,
            insurance_api::presentation::http::policies::update_policy,
            insurance_api::presentation::http::policies::delete_policy,
            insurance_api::presentation::http::claims::list_claims,
            insurance_api::presentation::http::claims::create_claim,
            insurance_api::presentation::http::claims::get_claim,
            insurance_api::presentation::http::claims::update_claim,
            insurance_api::presentation::http::claims::delete_claim,
            insurance_api::presentation::http::claims::update_claim_status,
            insurance_api::presentation::http::applications::submit_application,
            insurance_api::presentation::http::applications::list_applications,
            insurance_api::presentation::http::applications::get_application,
            insurance_api::presentation::http::applications::update_application,
            insurance_api::presentation::http::health::health,
        ),
        components(schemas(
            insurance_api::presentation::http::farmers::FarmerResponse,
            insurance_api::presentation::http::farmers::CreateFarmerRequest,
            insurance_api::presentation::http::farmers::UpdateFarmerRequest,
            insurance_api::presentation::http::policies::PolicyResponse,
            insurance_api::presentation::http::policies::CreatePolicyRequest,
            insurance_api::presentation::http::policies::UpdatePolicyRequest,
            insurance_api::presentation::http::claims::ClaimResponse,
            insurance_api::presentation::http::claims::CreateClaimRequest,
            insurance_api::presentation::http::claims::UpdateClaimRequest,
            insurance_api::presentation::http::claims::UpdateClaimStatusRequest,
            insurance_api::presentation::http::applications::ApplicationResponse,
            insurance_api::presentation::http::applications::ApplicationMultipart,
            insurance_api::presentation::http::applications::UpdateApplicationRequest,
            insurance_api::presentation::http::projections::FarmerSummary,
            insurance_api::presentation::http::projections::PolicySummary,
            insurance_api::presentation::http::health::HealthResp,
            insurance_api::domain::farmers::farmer::Category,
            insurance_api::domain::farmers::farmer::Gender,
            insurance_api::domain::farmers::farmer::AccountType,
            insurance_api::domain::farmers::farmer::BankDetails,
            insurance_api::domain::policies::policy::PolicyStatus,
            insurance_api::domain::claims::claim::ClaimStatus,
            insurance_api::domain::claims::claim::ClaimDocuments,
            insurance_api::domain::applications::application::ApplicationStatus,
            insurance_api::domain::applications::application::VerificationStatus,
        )),
        tags(
            (name = "Farmers", description = "Farmer profiles"),
            (name = "Policies", description = "Crop insurance policies"),
            (name = "Claims", description = "Claims against policies"),
            (name = "Insurance Applications", description = "Insurance intake with document uploads"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [
        http::header::CONTENT_TYPE,
        http::header::AUTHORIZATION,
    ];
    let origin = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => AllowOrigin::exact(v),
        // Production refuses to start without FRONTEND_URL, so only development lands here.
        _ => AllowOrigin::mirror_request(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "insurance_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting crop insurance backend");

    // Database: the pool connects on demand, reachability is decided once here.
    let pool = db::connect_lazy(&cfg.database_url)?;
    let mut probe = StartupProbe::run(&pool).await;
    if probe.is_reachable() {
        if let Err(e) = db::migrate(&pool).await {
            error!(error = ?e, "migrations_failed");
            probe = StartupProbe::fixed(false);
        }
    }
    if !probe.is_reachable() {
        tracing::warn!("starting_without_database");
    }

    let uploads_dir = PathBuf::from(&cfg.uploads_dir);
    if let Err(e) = tokio::fs::create_dir_all(&uploads_dir).await {
        tracing::warn!(error = ?e, dir = %cfg.uploads_dir, "Failed to create uploads dir");
    }

    let services = AppServices::new(
        Arc::new(SqlxFarmerRepository::new(pool.clone())),
        Arc::new(SqlxPolicyRepository::new(pool.clone())),
        Arc::new(SqlxClaimRepository::new(pool.clone())),
        Arc::new(SqlxApplicationRepository::new(pool.clone())),
        Arc::new(FsUploadStorage::new(
            uploads_dir.clone(),
            cfg.upload_max_file_bytes,
        )),
        Arc::new(probe),
    );
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .nest("/api", health::routes(pool.clone()))
        .nest("/api/v1", v1_routes(ctx.clone()))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        // Multipart intake carries up to thirteen files.
        .layer(DefaultBodyLimit::max(cfg.request_body_limit()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;

    let api_handle: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });

    match api_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "API server task failed"),
        Err(e) => error!(?e, "API server task panicked"),
    }
    Ok(())
}
