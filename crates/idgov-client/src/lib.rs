//! idgov client library entry.
//!
//! This crate wires strict configuration, directory lookups, the policy codec
//! and the policy-service seam into a `PolicyClient`. It is consumed by the
//! `idgov` binary (`main.rs`) and by integration tests.

pub mod client;
pub mod config;
pub mod document;
pub mod service;

pub use client::PolicyClient;
