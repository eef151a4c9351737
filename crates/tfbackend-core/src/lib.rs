//! tfbackend core
//!
//! The provisioning state machine that bootstraps a Terraform GCS backend:
//!
//! ```text
//! CheckPrerequisites ─▶ SelectProject ─▶ CheckBilling ─▶ GetBucketDetails ─▶ CreateBucket ─▶ Success
//!                          │    ▲            │    ▲                              │
//!                          ▼    │            ▼    │                              ▼
//!                       CreateProject ─▶ LinkBilling                    conflict resolution
//! ```
//!
//! Every state resolves its own failures into the next state; `Terminal`
//! ends the run. [`Provisioner::execute`] restores the operator's active
//! project on every exit path.

pub mod backend;
pub mod context;
pub mod machine;
pub mod prompt;
pub mod state;
mod states;

pub use backend::{BackendConfig, BackendError};
pub use context::{OriginalProject, ProvisionContext};
pub use machine::{Provisioner, RunReport};
pub use prompt::{PromptError, Prompter, Tone};
pub use state::ProvisionState;
pub use states::bucket::{ConflictResolution, MAX_CONFLICT_RESOLUTIONS, rename_target};
pub use states::project::{ProjectChoice, is_valid_project_id};
