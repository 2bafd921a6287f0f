//! Top-level facade crate for idgov.
//!
//! Re-exports the policy codec core and the service client so users can depend on a single crate.

pub mod core {
    pub use idgov_core::*;
}

pub mod client {
    pub use idgov_client::*;
}
