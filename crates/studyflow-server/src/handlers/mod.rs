//! Route handlers, one module per resource.

pub mod assignments;
pub mod courses;
pub mod enrollment;
pub mod schedule;
pub mod session;
