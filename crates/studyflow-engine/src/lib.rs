//! Enrollment and schedule consistency engine.
//!
//! [`Planner`] is the entry point: it owns the identity store, the schedule
//! store, the token service and a handle to the course catalog, and it is the
//! only place where enrollment changes and calendar changes meet.

mod locks;
mod persist;

pub mod catalog;
pub mod error;
pub mod identity;
pub mod password;
pub mod planner;
pub mod schedule;
pub mod token;

pub use catalog::JsonCatalog;
pub use error::{Error, ErrorKind, Result, TokenError};
pub use identity::IdentityStore;
pub use planner::{Planner, ScheduleView, Session};
pub use token::{Claims, IssuedToken, TokenService};
