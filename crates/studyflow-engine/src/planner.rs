//! The [`Planner`] facade: enrollment, calendar and authentication.
//!
//! Every read-then-write sequence on an account runs under that account's
//! lock, so two concurrent requests for the same student cannot interleave.
//! Conflict detection and hour totals are computed from a snapshot of the
//! schedule and never mutate it.

use std::sync::Arc;

use serde::Serialize;
use studyflow_core::{
  account::{Account, AccountId, Registration},
  catalog::{CourseCatalog, CourseSummary},
  conflict::{Conflict, find_conflicts},
  hours::weekly_hours,
  schedule::{ClockTime, Day, ScheduleEntry, TimeSlot},
};
use tokio::sync::RwLock;

use crate::{
  Error, IdentityStore, Result, TokenError,
  locks::AccountLocks,
  schedule::ScheduleStore,
  token::{IssuedToken, TokenService},
};

/// An account together with a token that authorises it.
#[derive(Debug, Clone)]
pub struct Session {
  pub token:   IssuedToken,
  pub account: Account,
}

/// A student's calendar plus its weekly workload.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView {
  pub schedule:             Vec<ScheduleEntry>,
  pub total_courses:        usize,
  pub total_hours_per_week: f64,
}

pub struct Planner {
  identity:  IdentityStore,
  schedules: RwLock<ScheduleStore>,
  catalog:   Arc<dyn CourseCatalog>,
  tokens:    TokenService,
  locks:     AccountLocks,
}

impl Planner {
  pub fn new(
    identity: IdentityStore,
    catalog: Arc<dyn CourseCatalog>,
    tokens: TokenService,
  ) -> Self {
    Self {
      identity,
      schedules: RwLock::new(ScheduleStore::new()),
      catalog,
      tokens,
      locks: AccountLocks::default(),
    }
  }

  pub fn catalog(&self) -> &dyn CourseCatalog { self.catalog.as_ref() }

  pub fn identity(&self) -> &IdentityStore { &self.identity }

  pub fn tokens(&self) -> &TokenService { &self.tokens }

  // ── Identity and tokens ───────────────────────────────────────────────────

  /// Register a new account and issue its first token.
  pub async fn register(&self, input: Registration) -> Result<Session> {
    let account = self.identity.register(input).await?;
    let token = self.tokens.issue(account.id)?;
    Ok(Session { token, account })
  }

  /// Verify credentials and issue a token.
  pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
    let account = self.identity.verify_credentials(email, password).await?;
    let token = self.tokens.issue(account.id)?;
    tracing::info!(account_id = %account.id, "login");
    Ok(Session { token, account })
  }

  /// Resolve a bearer token to the account id it names.
  pub async fn validate(&self, token: &str) -> Result<AccountId> {
    self.authenticate(token).await.map(|a| a.id)
  }

  /// Resolve a bearer token to its account.
  ///
  /// Fails with [`TokenError::Invalid`], [`TokenError::Expired`] or
  /// [`TokenError::UnknownSubject`]; the token is not re-issued.
  pub async fn authenticate(&self, token: &str) -> Result<Account> {
    let claims = self.tokens.decode(token).inspect_err(|e| {
      tracing::debug!(reason = %e, "rejected token");
    })?;
    self
      .identity
      .get(claims.sub)
      .await
      .ok_or(Error::Token(TokenError::UnknownSubject))
  }

  pub async fn account(&self, account_id: AccountId) -> Result<Account> {
    self
      .identity
      .get(account_id)
      .await
      .ok_or(Error::AccountNotFound(account_id))
  }

  // ── Enrollment ledger ─────────────────────────────────────────────────────

  /// Add `course_code` to the account's enrolled courses.
  pub async fn enroll(&self, account_id: AccountId, course_code: &str) -> Result<Account> {
    let _guard = self.locks.lock(account_id).await;

    if self.catalog.find_course(course_code).is_none() {
      return Err(Error::CourseNotFound(course_code.to_owned()));
    }

    let account = self
      .identity
      .update(account_id, |a| {
        if a.is_enrolled(course_code) {
          return Err(Error::AlreadyEnrolled(course_code.to_owned()));
        }
        a.enrolled_courses.push(course_code.to_owned());
        Ok(())
      })
      .await?;

    tracing::info!(%account_id, course_code, "enrolled");
    Ok(account)
  }

  /// Remove `course_code` from the account's enrolled courses and drop every
  /// calendar entry for it.
  ///
  /// The schedule write lock is held across the ledger change and the
  /// cascade, so no reader sees the course dropped but its calendar entries
  /// still present. The accounts file is rewritten after that lock is
  /// released.
  pub async fn unenroll(&self, account_id: AccountId, course_code: &str) -> Result<Account> {
    let _guard = self.locks.lock(account_id).await;

    let (account, removed) = {
      let mut schedules = self.schedules.write().await;
      let account = self
        .identity
        .commit(account_id, |a| {
          let before = a.enrolled_courses.len();
          a.enrolled_courses.retain(|c| c != course_code);
          if a.enrolled_courses.len() == before {
            return Err(Error::NotEnrolled(course_code.to_owned()));
          }
          Ok(())
        })
        .await?;
      (account, schedules.cascade_delete(account_id, course_code))
    };

    self.identity.persist_logged().await;
    tracing::info!(%account_id, course_code, removed_entries = removed, "unenrolled");
    Ok(account)
  }

  /// Catalog details for each enrolled course, in enrollment order. Codes the
  /// catalog no longer knows are skipped.
  pub async fn enrolled_courses(&self, account_id: AccountId) -> Result<Vec<CourseSummary>> {
    let account = self.account(account_id).await?;
    Ok(
      account
        .enrolled_courses
        .iter()
        .filter_map(|code| self.catalog.find_course(code))
        .collect(),
    )
  }

  // ── Schedule ──────────────────────────────────────────────────────────────

  /// Add a slot to the calendar entry for `course_code`.
  ///
  /// A new entry is titled `course_title` if given, else the catalog title,
  /// else the code itself.
  pub async fn add_slot(
    &self,
    account_id: AccountId,
    course_code: &str,
    course_title: Option<&str>,
    slot: TimeSlot,
    is_personal: bool,
  ) -> Result<ScheduleEntry> {
    let _guard = self.locks.lock(account_id).await;
    let account = self.account(account_id).await?;

    let title = match course_title.filter(|t| !t.trim().is_empty()) {
      Some(t) => t.to_owned(),
      None => self
        .catalog
        .find_course(course_code)
        .map(|c| c.title)
        .unwrap_or_else(|| course_code.to_owned()),
    };

    let entry = self
      .schedules
      .write()
      .await
      .add_slot(&account, course_code, &title, slot, is_personal)?;

    tracing::info!(%account_id, course_code, slots = entry.time_slots.len(), "added slot");
    Ok(entry)
  }

  /// Remove the slot starting at `start_time` on `day`. Succeeds whether or
  /// not such a slot exists.
  pub async fn remove_slot(
    &self,
    account_id: AccountId,
    course_code: &str,
    day: Day,
    start_time: ClockTime,
  ) {
    let _guard = self.locks.lock(account_id).await;
    let removed = self
      .schedules
      .write()
      .await
      .remove_slot(account_id, course_code, day, start_time);
    tracing::info!(%account_id, course_code, %day, %start_time, removed, "removed slot");
  }

  /// A snapshot of the account's calendar entries, in creation order.
  pub async fn list_schedule(&self, account_id: AccountId) -> Vec<ScheduleEntry> {
    self.schedules.read().await.list(account_id).to_vec()
  }

  pub async fn schedule_view(&self, account_id: AccountId) -> ScheduleView {
    let schedule = self.list_schedule(account_id).await;
    ScheduleView {
      total_courses: schedule.len(),
      total_hours_per_week: weekly_hours(&schedule),
      schedule,
    }
  }

  pub async fn conflicts(&self, account_id: AccountId) -> Vec<Conflict> {
    find_conflicts(&self.list_schedule(account_id).await)
  }
}
