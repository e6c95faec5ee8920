//! Per-account mutual exclusion.
//!
//! Every read-then-write sequence against one account (enroll, unenroll,
//! slot changes) runs while holding that account's guard. Different accounts
//! never contend.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, PoisonError},
};

use studyflow_core::account::AccountId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Default)]
pub(crate) struct AccountLocks {
  inner: Mutex<HashMap<AccountId, Arc<AsyncMutex<()>>>>,
}

impl AccountLocks {
  /// Wait for exclusive access to `account_id`.
  pub(crate) async fn lock(&self, account_id: AccountId) -> OwnedMutexGuard<()> {
    let lock = {
      let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
      Arc::clone(map.entry(account_id).or_default())
    };
    lock.lock_owned().await
  }
}
