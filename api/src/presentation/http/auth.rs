use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::identity::{Identity, Role};
use crate::presentation::http::response::ApiError;

/// Token claims issued by the account service. A missing `role` means a regular user.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: usize,
}

// --- Bearer extractor & JWT utils ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1) Prefer Authorization header if present
        if let Some(auth) = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.to_string()));
            }
        }

        // 2) Fallback to HttpOnly cookie `access_token`
        if let Some(cookie_hdr) = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(token) = get_cookie(cookie_hdr, "access_token") {
                return Ok(Bearer(token));
            }
        }

        Err(ApiError::unauthorized("Not authorized, no token"))
    }
}

/// Authenticated caller resolved from the bearer token.
pub struct CurrentIdentity(pub Identity);

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let bearer = Bearer::from_request_parts(parts, ctx).await?;
        let identity = validate_bearer(&ctx.cfg, bearer)?;
        Ok(CurrentIdentity(identity))
    }
}

pub fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<Identity, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;
    let id = Uuid::parse_str(&data.claims.sub)
        .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;
    let role = match data.claims.role.as_deref() {
        None => Role::User,
        Some(r) => {
            Role::parse(r).ok_or_else(|| ApiError::unauthorized("Not authorized, token failed"))?
        }
    };
    Ok(Identity { id, role })
}

/// Signs a token the way the account service does. Used by local tooling and tests.
pub fn issue_token(cfg: &Config, identity: &Identity, ttl_secs: usize) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: identity.id.to_string(),
        role: Some(identity.role.as_str().to_string()),
        exp: now + ttl_secs,
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}
