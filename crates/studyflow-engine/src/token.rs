//! Short-lived signed bearer tokens.
//!
//! A token is `{claims_b64}.{mac_b64}`: URL-safe unpadded base64 of the JSON
//! claims, then an HMAC-SHA256 over the encoded claims. Nothing is stored
//! server-side; validity is a function of the signature and `exp` alone, so
//! there is no revocation and no refresh.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as B64};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use studyflow_core::account::AccountId;

use crate::{Error, Result, TokenError};

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 16;

/// Longest accepted token lifetime.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 366;

/// What a token asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  pub sub: AccountId,
  /// Issued-at, seconds since the Unix epoch.
  pub iat: i64,
  /// Absolute expiry, seconds since the Unix epoch.
  pub exp: i64,
}

/// A freshly issued token and when it stops working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
  pub token:      String,
  pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenService {
  mac: HmacSha256,
  ttl: Duration,
}

impl TokenService {
  pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Result<Self> {
    let secret = secret.as_ref();
    if secret.len() < MIN_SECRET_LEN {
      return Err(Error::WeakSecret(MIN_SECRET_LEN));
    }
    if ttl <= Duration::zero() || ttl > Duration::minutes(MAX_TTL_MINUTES) {
      return Err(Error::InvalidTtl(ttl.num_minutes()));
    }
    let mac = HmacSha256::new_from_slice(secret)
      .map_err(|_| Error::WeakSecret(MIN_SECRET_LEN))?;
    Ok(Self { mac, ttl })
  }

  pub fn issue(&self, subject: AccountId) -> Result<IssuedToken> {
    self.issue_at(subject, Utc::now())
  }

  /// Issue a token as if the current time were `now`.
  pub fn issue_at(&self, subject: AccountId, now: DateTime<Utc>) -> Result<IssuedToken> {
    let expires_at = now
      .checked_add_signed(self.ttl)
      .ok_or(Error::InvalidTtl(self.ttl.num_minutes()))?;
    let claims = Claims {
      sub: subject,
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
    };

    let payload = B64.encode(serde_json::to_vec(&claims)?);
    let mut mac = self.mac.clone();
    mac.update(payload.as_bytes());
    let signature = B64.encode(mac.finalize().into_bytes());

    Ok(IssuedToken { token: format!("{payload}.{signature}"), expires_at })
  }

  pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
    self.decode_at(token, Utc::now())
  }

  /// Verify the signature and expiry of `token` as of `now`.
  ///
  /// This does not check that the subject still exists; see
  /// [`Planner::validate`](crate::Planner::validate).
  pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
    let (payload, signature) = token.split_once('.').ok_or(TokenError::Invalid)?;
    let signature = B64.decode(signature).map_err(|_| TokenError::Invalid)?;

    let mut mac = self.mac.clone();
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).map_err(|_| TokenError::Invalid)?;

    let raw = B64.decode(payload).map_err(|_| TokenError::Invalid)?;
    let claims: Claims = serde_json::from_slice(&raw).map_err(|_| TokenError::Invalid)?;

    if now.timestamp() >= claims.exp {
      return Err(TokenError::Expired);
    }
    Ok(claims)
  }
}
