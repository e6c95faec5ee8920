//! The `AssignmentStore` trait.
//!
//! Implemented by storage backends (e.g. `studyflow-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.
//!
//! Every method is scoped to an owning account: an assignment belonging to
//! someone else behaves exactly like one that does not exist.

use std::future::Future;

use uuid::Uuid;

use crate::{
  account::AccountId,
  assignment::{Assignment, AssignmentFilter, AssignmentPatch, NewAssignment},
};

/// Abstraction over an assignment store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait AssignmentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new assignment in `Pending` status. `id` and `created_at` are
  /// assigned by the store.
  fn create(
    &self,
    account_id: AccountId,
    input: NewAssignment,
  ) -> impl Future<Output = Result<Assignment, Self::Error>> + Send + '_;

  /// Fetch one assignment. Returns `None` if absent or owned by another account.
  fn get(
    &self,
    account_id: AccountId,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + '_;

  /// All of an account's assignments matching `filter`, oldest first.
  fn list(
    &self,
    account_id: AccountId,
    filter: AssignmentFilter,
  ) -> impl Future<Output = Result<Vec<Assignment>, Self::Error>> + Send + '_;

  /// Apply a partial update. Returns the updated record, or `None` if absent.
  fn update(
    &self,
    account_id: AccountId,
    id: Uuid,
    patch: AssignmentPatch,
  ) -> impl Future<Output = Result<Option<Assignment>, Self::Error>> + Send + '_;

  /// Delete one assignment. Returns `false` if there was nothing to delete.
  fn delete(
    &self,
    account_id: AccountId,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
