//! Access token issuing and validation.
//!
//! Tokens are opaque bearer tokens: a base64-encoded JSON claims object, a `.` separator, and a base64-encoded
//! HMAC-SHA256 tag over the claims. The signing secret comes from [`crate::config::AuthConfig`]. Handlers that
//! need the calling user take an [`AuthenticatedUser`] parameter, which reads and validates the
//! `Authorization: Bearer` header.

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use chrono::Utc;
use commerce_engine::db_types::UserId;
use cs_common::Secret;
use futures::future::{ready, Ready};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

type HmacSha256 = Hmac<Sha256>;

const B64_CONFIG: base64::Config = base64::URL_SAFE_NO_PAD;

/// The claims carried inside an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The id of the user the token was issued to.
    pub sub: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    secret: Secret<String>,
    validity: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self { secret: config.api_secret.clone(), validity: config.token_validity }
    }

    pub fn issue_token(&self, user_id: &UserId) -> Result<String, ServerError> {
        let exp = (Utc::now() + self.validity).timestamp();
        let claims = TokenClaims { sub: user_id.as_str().to_string(), exp };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| ServerError::CouldNotSerializeAccessToken(e.to_string()))?;
        let payload = base64::encode_config(payload, B64_CONFIG);
        let tag = self.tag_for(&payload).map_err(|e| ServerError::CouldNotSerializeAccessToken(e.to_string()))?;
        Ok(format!("{payload}.{tag}"))
    }

    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let (payload, tag) =
            token.split_once('.').ok_or_else(|| AuthError::PoorlyFormattedToken("Missing separator".to_string()))?;
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let tag = base64::decode_config(tag, B64_CONFIG)
            .map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
        mac.verify_slice(&tag).map_err(|_| AuthError::ValidationError("Signature mismatch".to_string()))?;
        let claims = base64::decode_config(payload, B64_CONFIG)
            .map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
        let claims = serde_json::from_slice::<TokenClaims>(&claims)
            .map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
        if claims.exp < Utc::now().timestamp() {
            return Err(AuthError::ExpiredToken);
        }
        Ok(claims)
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(self.secret.reveal().as_bytes())
            .map_err(|e| AuthError::ValidationError(e.to_string()))
    }

    fn tag_for(&self, payload: &str) -> Result<String, AuthError> {
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        Ok(base64::encode_config(mac.finalize().into_bytes(), B64_CONFIG))
    }
}

/// The user a request was made on behalf of, extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl FromRequest for AuthenticatedUser {
    type Error = ServerError;
    type Future = Ready<Result<Self, ServerError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, ServerError> {
    let signer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| ServerError::InitializeError("The token issuer is not configured".to_string()))?;
    let header = req.headers().get(header::AUTHORIZATION).ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|e| AuthError::PoorlyFormattedToken(e.to_string()))?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    let claims = signer.validate_token(token)?;
    Ok(AuthenticatedUser { user_id: UserId::from(claims.sub) })
}
