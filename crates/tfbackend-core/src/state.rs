//! Workflow states

use std::fmt;

/// One phase of the provisioning workflow
///
/// Exactly one state is current at a time. `Terminal` has no handler; the
/// driver stops when a handler returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisionState {
    CheckPrerequisites,
    SelectProject,
    CreateProject,
    LinkBilling,
    CheckBilling,
    GetBucketDetails,
    CreateBucket,
    Success,
    Terminal,
}

impl ProvisionState {
    pub fn is_terminal(self) -> bool {
        self == ProvisionState::Terminal
    }
}

impl fmt::Display for ProvisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProvisionState::CheckPrerequisites => "CheckPrerequisites",
            ProvisionState::SelectProject => "SelectProject",
            ProvisionState::CreateProject => "CreateProject",
            ProvisionState::LinkBilling => "LinkBilling",
            ProvisionState::CheckBilling => "CheckBilling",
            ProvisionState::GetBucketDetails => "GetBucketDetails",
            ProvisionState::CreateBucket => "CreateBucket",
            ProvisionState::Success => "Success",
            ProvisionState::Terminal => "Terminal",
        };
        write!(f, "{}", name)
    }
}
