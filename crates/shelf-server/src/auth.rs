//! Bearer-secret extractor guarding the sync trigger.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use sha2::{Digest, Sha256};
use shelf_core::{source::ContentSource, store::DocumentStore};

use crate::{AppState, error::Error};

/// The configured sync secret, kept only as its SHA-256 digest.
#[derive(Clone, Default)]
pub struct SyncAuth {
  digest: Option<[u8; 32]>,
}

impl SyncAuth {
  /// `None` or an empty secret disables the check.
  pub fn new(secret: Option<&str>) -> Self {
    let digest = secret.filter(|s| !s.is_empty()).map(|s| Sha256::digest(s).into());
    Self { digest }
  }

  pub fn is_enabled(&self) -> bool { self.digest.is_some() }

  /// Short hex prefix of the secret digest, safe to log.
  pub fn fingerprint(&self) -> Option<String> {
    self.digest.map(|d| hex::encode(&d[..4]))
  }
}

/// Zero-size marker: present in the handler means the caller may trigger a
/// sync.
pub struct SyncAuthorized;

/// Check `Authorization: Bearer <secret>` against `auth`.
pub fn verify_bearer(headers: &HeaderMap, auth: &SyncAuth) -> Result<(), Error> {
  let Some(expected) = &auth.digest else {
    return Ok(());
  };

  let token = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .ok_or(Error::Unauthorized)?;

  let actual: [u8; 32] = Sha256::digest(token).into();
  let diff = actual.iter().zip(expected).fold(0u8, |acc, (a, b)| acc | (a ^ b));
  if diff == 0 { Ok(()) } else { Err(Error::Unauthorized) }
}

impl<S, C> FromRequestParts<AppState<S, C>> for SyncAuthorized
where
  S: DocumentStore + 'static,
  C: ContentSource + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, C>,
  ) -> Result<Self, Self::Rejection> {
    verify_bearer(&parts.headers, &state.auth)?;
    Ok(SyncAuthorized)
  }
}

#[cfg(test)]
mod tests {
  use axum::http::HeaderValue;

  use super::*;

  fn headers(value: &str) -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    h
  }

  #[test]
  fn disabled_accepts_anything() {
    let auth = SyncAuth::new(None);
    assert!(!auth.is_enabled());
    assert!(verify_bearer(&HeaderMap::new(), &auth).is_ok());
    assert!(!SyncAuth::new(Some("")).is_enabled());
  }

  #[test]
  fn correct_secret() {
    let auth = SyncAuth::new(Some("s3cret"));
    assert!(verify_bearer(&headers("Bearer s3cret"), &auth).is_ok());
  }

  #[test]
  fn wrong_secret() {
    let auth = SyncAuth::new(Some("s3cret"));
    assert!(matches!(verify_bearer(&headers("Bearer nope"), &auth), Err(Error::Unauthorized)));
  }

  #[test]
  fn missing_or_malformed_header() {
    let auth = SyncAuth::new(Some("s3cret"));
    assert!(matches!(verify_bearer(&HeaderMap::new(), &auth), Err(Error::Unauthorized)));
    assert!(matches!(verify_bearer(&headers("Basic s3cret"), &auth), Err(Error::Unauthorized)));
  }

  #[test]
  fn fingerprint_is_short_hex() {
    let fp = SyncAuth::new(Some("s3cret")).fingerprint().unwrap();
    assert_eq!(fp.len(), 8);
    assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
  }
}
