//! Argon2 password hashing.
//!
//! Both functions are CPU-bound; async callers run them on the blocking pool.

use std::sync::OnceLock;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result};

/// Produce a PHC string for `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Check `password` against a stored PHC string. An unparseable hash never
/// verifies.
pub fn verify_password(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}

/// Spend the same work as a real verification and always fail.
///
/// Used when no account matches an email so that timing does not reveal
/// whether the address is registered.
pub fn verify_against_dummy(password: &str) -> bool {
  static DUMMY: OnceLock<Option<String>> = OnceLock::new();
  let dummy = DUMMY.get_or_init(|| hash_password("studyflow-dummy-password").ok());
  if let Some(phc) = dummy {
    verify_password(password, phc);
  }
  false
}
