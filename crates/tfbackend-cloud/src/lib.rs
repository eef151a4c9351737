//! tfbackend control plane
//!
//! This crate defines the control-plane abstraction the bootstrap workflow
//! drives. A provider crate wraps the vendor CLI and implements
//! [`ControlPlane`]; the workflow never talks to the CLI directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 tfbackend CLI                    │
//! │                (tfbackend init)                  │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               tfbackend-core                     │
//! │        provisioning state machine                │
//! └─────────────────┬───────────────────────────────┘
//!                   │ trait ControlPlane { ... }
//! ┌─────────────────▼───────────────────────────────┐
//! │               tfbackend-gcp                      │
//! │             (gcloud CLI wrapper)                 │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod provider;

// Re-exports
pub use error::{CloudError, Result};
pub use provider::{
    AuthStatus, BillingAccount, BillingInfo, BucketInfo, BucketSpec, ControlPlane, ProjectInfo,
};
