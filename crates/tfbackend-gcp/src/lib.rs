//! Google Cloud control plane for tfbackend
//!
//! This crate implements the `ControlPlane` trait for Google Cloud by
//! shelling out to the `gcloud` CLI.
//!
//! # Requirements
//!
//! - `gcloud` must be installed (Google Cloud SDK)
//! - Authentication is managed through `gcloud auth`
//!
//! # Example
//!
//! ```ignore
//! use tfbackend_cloud::ControlPlane;
//! use tfbackend_gcp::GcpControlPlane;
//!
//! let provider = GcpControlPlane::default();
//!
//! let auth = provider.check_auth()?;
//! if !auth.authenticated {
//!     panic!("Not authenticated: {:?}", auth.error);
//! }
//!
//! let projects = provider.list_projects()?;
//! ```

pub mod error;
pub mod gcloud;
pub mod provider;

pub use error::{GcpError, Result, is_conflict_message};
pub use gcloud::{Gcloud, bucket_url};
pub use provider::GcpControlPlane;
