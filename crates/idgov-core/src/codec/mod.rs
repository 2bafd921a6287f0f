//! Policy codecs (domain model <-> wire records).
//!
//! Leaves first:
//! - `parameter`: one attribute's constraints <-> three parallel wire arrays.
//! - `entitlement`: per-target entitlement blocks, built on `parameter`.
//! - `membership`: everyone vs. explicit role list.
//! - `assembler`: full policy records for add/modify/delete calls.
//!
//! All codecs are synchronous and stateless. Reference lookups go through the
//! `resolve` traits so that no network I/O happens inside an encode call.

pub mod assembler;
pub mod entitlement;
pub mod membership;
pub mod parameter;
pub mod resolve;

pub use assembler::{
    assemble_add, assemble_delete, assemble_modify, decode_policy, local_timestamp, DeleteCall,
    PolicyCall,
};
pub use resolve::{PassThrough, ResolvedReferences, Resolvers, ServiceResolver, WorkflowResolver};
