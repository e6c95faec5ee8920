//! Core types and pure algorithms for the StudyFlow planner.
//!
//! This crate is deliberately free of HTTP, file and database dependencies.
//! Everything that touches storage or the network lives in the crates that
//! depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod assignment;
pub mod catalog;
pub mod conflict;
pub mod error;
pub mod hours;
pub mod schedule;
pub mod store;

pub use error::{Error, Result};
