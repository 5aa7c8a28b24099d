use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{config::JwtConfig, error::ApiError, state::AppState};

/// Claims carried by a session token: the user id plus issue and expiry times.
/// The server holds no session state; the token is the whole session.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: i64,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Symmetric signing/verification keys derived from the process-wide secret.
/// The secret itself is read once from config and never logged.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::new(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::from_secs((config.ttl_minutes as u64) * 60),
        }
    }

    /// Mint a signed token for the user. Expiry is absolute, issued-at + TTL;
    /// there is no refresh or extension once issued.
    pub fn sign(&self, user_id: i64) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, "session token issued");
        Ok(token)
    }

    /// Verify signature first, then expiry. The algorithm is pinned to HS256 so
    /// a token with a substituted header cannot downgrade verification, and no
    /// claim is read before the signature over the whole payload checks out.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(user_id = data.claims.sub, "session token verified");
                Ok(data.claims)
            }
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Malformed),
            },
        }
    }
}

/// Extracts the bearer token from the Authorization header and verifies it,
/// yielding the authenticated user id. Both terminal outcomes are 403: no
/// usable token at all, or a token that fails verification.
#[derive(Debug)]
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ApiError::Auth("No token provided"))?;

        match keys.verify(token) {
            Ok(claims) => Ok(AuthUser(claims.sub)),
            Err(e) => {
                warn!(error = %e, "token rejected");
                Err(ApiError::Auth("Invalid token"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            ttl_minutes: 60,
        })
    }

    #[test]
    fn sign_and_verify_yields_the_subject() {
        let keys = make_keys("dev-secret");
        let token = keys.sign(42).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret");
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: 42,
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"dev-secret"),
        )
        .expect("encode");

        assert_eq!(keys.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let keys = make_keys("dev-secret");
        let mut token = keys.sign(7).expect("sign");
        let last = token.pop().expect("non-empty token");
        token.push(if last == 'A' { 'B' } else { 'A' });

        assert_eq!(keys.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn verify_rejects_tampered_claims() {
        let keys = make_keys("dev-secret");
        let token_a = keys.sign(1).expect("sign");
        let token_b = keys.sign(2).expect("sign");

        // Claims from one token with the signature of another: the recomputed
        // signature no longer matches.
        let payload_a = token_a.rsplit_once('.').expect("three segments").0;
        let sig_b = token_b.rsplit_once('.').expect("three segments").1;
        let spliced = format!("{}.{}", payload_a, sig_b);

        assert_eq!(keys.verify(&spliced), Err(TokenError::Malformed));
    }

    #[test]
    fn verify_rejects_foreign_secret_and_garbage() {
        let ours = make_keys("dev-secret");
        let theirs = make_keys("other-secret");
        let token = theirs.sign(9).expect("sign");

        assert_eq!(ours.verify(&token), Err(TokenError::Malformed));
        assert_eq!(ours.verify("not-a-jwt"), Err(TokenError::Malformed));
    }

    fn parts_with_auth(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/account");
        if let Some(value) = header {
            builder = builder.header(axum::http::header::AUTHORIZATION, value);
        }
        builder.body(()).expect("request").into_parts().0
    }

    #[tokio::test]
    async fn extractor_rejects_missing_header_and_missing_token_segment() {
        let keys = make_keys("dev-secret");

        let mut parts = parts_with_auth(None);
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Access denied: No token provided");

        let mut parts = parts_with_auth(Some("Bearer"));
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Access denied: No token provided");
    }

    #[tokio::test]
    async fn extractor_rejects_unverifiable_token() {
        let keys = make_keys("dev-secret");
        let foreign = make_keys("other-secret").sign(5).expect("sign");

        let mut parts = parts_with_auth(Some(&format!("Bearer {}", foreign)));
        let err = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Access denied: Invalid token");
    }

    #[tokio::test]
    async fn extractor_accepts_a_valid_bearer_token() {
        let keys = make_keys("dev-secret");
        let token = keys.sign(11).expect("sign");

        let mut parts = parts_with_auth(Some(&format!("Bearer {}", token)));
        let AuthUser(user_id) = AuthUser::from_request_parts(&mut parts, &keys)
            .await
            .expect("authorized");
        assert_eq!(user_id, 11);
    }
}
