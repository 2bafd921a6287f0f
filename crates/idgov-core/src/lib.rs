//! idgov core: provisioning-policy domain model, wire records, and the
//! entitlement codec that translates between them.
//!
//! This crate carries no transport or runtime dependencies. Everything here is
//! a pure, synchronous transform; lookups that need the network are reached
//! through the resolver traits in [`codec::resolve`], which callers satisfy
//! with references resolved ahead of time.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed policies or wire records surface as `IdGovError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod codec;
pub mod error;
pub mod model;
pub mod wire;

/// Shared result type.
pub use error::{ErrorCode, IdGovError, Result};
