//! The identity store: every registered account, keyed by id.
//!
//! The whole store lives in memory and is authoritative for the running
//! process. When a backing file is configured, every mutation rewrites that
//! file in full (write-temp-then-rename); startup reads it back. This is a
//! snapshot, not a log.

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
};

use chrono::Utc;
use studyflow_core::account::{
  Account, AccountId, Registration, normalize_student_id, validate_email,
};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{Error, Result, password, persist};

pub struct IdentityStore {
  accounts: RwLock<BTreeMap<AccountId, Account>>,
  domain:   String,
  path:     Option<PathBuf>,
  /// Held for the duration of a snapshot + write so that the last writer
  /// always writes the newest state.
  pub(crate) writer: Mutex<()>,
}

impl IdentityStore {
  /// A store with no backing file.
  pub fn in_memory(domain: impl Into<String>) -> Self {
    Self {
      accounts: RwLock::new(BTreeMap::new()),
      domain:   domain.into(),
      path:     None,
      writer:   Mutex::new(()),
    }
  }

  /// Open the store backed by `path`, loading it if it exists.
  pub fn open(path: impl AsRef<Path>, domain: impl Into<String>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    let accounts: BTreeMap<AccountId, Account> = if path.exists() {
      let raw = std::fs::read(&path)?;
      serde_json::from_slice(&raw)?
    } else {
      BTreeMap::new()
    };
    tracing::info!(count = accounts.len(), path = %path.display(), "loaded accounts");

    Ok(Self {
      accounts: RwLock::new(accounts),
      domain:   domain.into(),
      path:     Some(path),
      writer:   Mutex::new(()),
    })
  }

  pub async fn len(&self) -> usize { self.accounts.read().await.len() }

  pub async fn is_empty(&self) -> bool { self.accounts.read().await.is_empty() }

  // ── Registration and login ────────────────────────────────────────────────

  /// Create an account. Checks run in order: duplicate email, email domain,
  /// student id. Nothing is stored unless all pass.
  pub async fn register(&self, input: Registration) -> Result<Account> {
    if self.find_by_email(&input.email).await.is_some() {
      return Err(Error::DuplicateEmail);
    }
    validate_email(&input.email, &self.domain)?;
    let student_id = normalize_student_id(input.student_id)?;

    let plaintext = input.password;
    let password_hash =
      tokio::task::spawn_blocking(move || password::hash_password(&plaintext)).await??;

    let account = Account {
      id: Uuid::new_v4(),
      email: input.email,
      password_hash,
      full_name: input.full_name,
      student_id,
      created_at: Utc::now(),
      enrolled_courses: Vec::new(),
    };

    {
      let mut accounts = self.accounts.write().await;
      // Re-check under the write lock: another registration may have won the
      // race while we were hashing.
      if accounts.values().any(|a| a.email == account.email) {
        return Err(Error::DuplicateEmail);
      }
      accounts.insert(account.id, account.clone());
    }

    tracing::info!(account_id = %account.id, "registered account");
    self.persist_logged().await;
    Ok(account)
  }

  /// Return the account for `email` if `password` matches.
  ///
  /// Unknown email and wrong password produce the same error, and both paths
  /// perform one hash verification.
  pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<Account> {
    let account = self.find_by_email(email).await;
    let password = password.to_owned();

    let (verified, account) = tokio::task::spawn_blocking(move || match account {
      Some(a) => (password::verify_password(&password, &a.password_hash), Some(a)),
      None => (password::verify_against_dummy(&password), None),
    })
    .await?;

    match account {
      Some(a) if verified => Ok(a),
      _ => {
        tracing::warn!("rejected credentials");
        Err(Error::InvalidCredentials)
      }
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub async fn get(&self, id: AccountId) -> Option<Account> {
    self.accounts.read().await.get(&id).cloned()
  }

  /// Exact, case-sensitive email match.
  pub async fn find_by_email(&self, email: &str) -> Option<Account> {
    self
      .accounts
      .read()
      .await
      .values()
      .find(|a| a.email == email)
      .cloned()
  }

  // ── Mutation ──────────────────────────────────────────────────────────────

  /// Apply `f` to a copy of the account and commit it only if `f` succeeds,
  /// then rewrite the backing file.
  pub async fn update<F>(&self, id: AccountId, f: F) -> Result<Account>
  where
    F: FnOnce(&mut Account) -> Result<()>,
  {
    let updated = self.commit(id, f).await?;
    self.persist_logged().await;
    Ok(updated)
  }

  /// The in-memory half of [`update`](Self::update). The caller owes a
  /// [`persist_logged`](Self::persist_logged) afterwards.
  pub(crate) async fn commit<F>(&self, id: AccountId, f: F) -> Result<Account>
  where
    F: FnOnce(&mut Account) -> Result<()>,
  {
    let mut accounts = self.accounts.write().await;
    let current = accounts.get_mut(&id).ok_or(Error::AccountNotFound(id))?;
    let mut draft = current.clone();
    f(&mut draft)?;
    *current = draft.clone();
    Ok(draft)
  }

  // ── Persistence ───────────────────────────────────────────────────────────

  /// Rewrite the backing file from the current in-memory state.
  pub async fn persist(&self) -> Result<()> {
    let Some(path) = self.path.clone() else {
      return Ok(());
    };

    let _writer = self.writer.lock().await;
    let bytes = serde_json::to_vec_pretty(&*self.accounts.read().await)?;
    tokio::task::spawn_blocking(move || persist::write_atomic(&path, &bytes)).await??;
    Ok(())
  }

  /// Like [`persist`](Self::persist), but a failure is logged rather than
  /// returned: the in-memory state stays authoritative for this process.
  pub(crate) async fn persist_logged(&self) {
    if let Err(e) = self.persist().await {
      tracing::error!(error = %e, "failed to persist accounts; changes are not durable");
    }
  }
}
