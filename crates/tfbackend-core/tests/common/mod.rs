#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use tfbackend_cloud::{
    AuthStatus, BillingAccount, BillingInfo, BucketInfo, BucketSpec, CloudError, ControlPlane,
    ProjectInfo, Result,
};
use tfbackend_config::Settings;
use tfbackend_core::{
    PromptError, Prompter, ProvisionContext, ProvisionState, Provisioner, RunReport, Tone,
};

/// Control-plane operation recorded by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetActive(String),
    Login,
    CreateProject(String),
    LinkBilling(String, String),
    DescribeBilling(String),
    ListBuckets(String),
    CreateBucket(String),
    DeleteBucket(String),
    MoveBucket(String, String),
    EnableVersioning(String),
}

#[derive(Debug, Default)]
struct FakeState {
    installed: bool,
    authenticated: bool,
    login_authenticates: bool,
    active_project: Option<String>,
    projects: Vec<ProjectInfo>,
    projects_fail: bool,
    billing_accounts: Vec<BillingAccount>,
    billing_enabled: HashSet<String>,
    link_fails: bool,
    describe_billing_fails: bool,
    buckets: HashSet<String>,
    sticky_conflict: bool,
    create_bucket_error: Option<String>,
    delete_fails: bool,
    move_fails: bool,
    versioning_fails: bool,
    set_active_fails: bool,
    calls: Vec<Call>,
}

/// In-memory control plane with scripted failures
pub struct FakeControlPlane {
    state: RefCell<FakeState>,
}

impl FakeControlPlane {
    /// Installed, authenticated, no projects
    pub fn new() -> Self {
        Self {
            state: RefCell::new(FakeState {
                installed: true,
                authenticated: true,
                login_authenticates: true,
                ..FakeState::default()
            }),
        }
    }

    pub fn with_active_project(self, project: &str) -> Self {
        self.state.borrow_mut().active_project = Some(project.to_string());
        self
    }

    pub fn with_project(self, project_id: &str, billing_enabled: bool) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state
                .projects
                .push(ProjectInfo::new(project_id, project_id.to_uppercase()));
            if billing_enabled {
                state.billing_enabled.insert(project_id.to_string());
            }
        }
        self
    }

    pub fn with_billing_account(self, id: &str, open: bool) -> Self {
        self.state.borrow_mut().billing_accounts.push(BillingAccount {
            id: id.to_string(),
            display_name: format!("Account {}", id),
            open,
        });
        self
    }

    pub fn with_bucket(self, name: &str) -> Self {
        self.state.borrow_mut().buckets.insert(name.to_string());
        self
    }

    pub fn not_installed(self) -> Self {
        self.state.borrow_mut().installed = false;
        self
    }

    pub fn unauthenticated(self, login_authenticates: bool) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.authenticated = false;
            state.login_authenticates = login_authenticates;
        }
        self
    }

    pub fn failing_project_list(self) -> Self {
        self.state.borrow_mut().projects_fail = true;
        self
    }

    pub fn failing_link(self) -> Self {
        self.state.borrow_mut().link_fails = true;
        self
    }

    /// Every create reports a name conflict, whatever happened before
    pub fn sticky_conflict(self) -> Self {
        self.state.borrow_mut().sticky_conflict = true;
        self
    }

    pub fn failing_describe_billing(self) -> Self {
        self.state.borrow_mut().describe_billing_fails = true;
        self
    }

    pub fn failing_create_bucket(self, message: &str) -> Self {
        self.state.borrow_mut().create_bucket_error = Some(message.to_string());
        self
    }

    pub fn failing_delete(self) -> Self {
        self.state.borrow_mut().delete_fails = true;
        self
    }

    pub fn failing_move(self) -> Self {
        self.state.borrow_mut().move_fails = true;
        self
    }

    pub fn failing_versioning(self) -> Self {
        self.state.borrow_mut().versioning_fails = true;
        self
    }

    pub fn failing_set_active(self) -> Self {
        self.state.borrow_mut().set_active_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|&call| pred(call)).count()
    }

    pub fn current_active_project(&self) -> Option<String> {
        self.state.borrow().active_project.clone()
    }

    pub fn has_bucket(&self, name: &str) -> bool {
        self.state.borrow().buckets.contains(name)
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl ControlPlane for FakeControlPlane {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_installed(&self) -> bool {
        self.state.borrow().installed
    }

    fn active_project(&self) -> Result<Option<String>> {
        Ok(self.state.borrow().active_project.clone())
    }

    fn set_active_project(&self, project_id: &str) -> Result<()> {
        self.record(Call::SetActive(project_id.to_string()));
        let mut state = self.state.borrow_mut();
        if state.set_active_fails {
            return Err(CloudError::CommandFailed("config is read-only".into()));
        }
        state.active_project = Some(project_id.to_string());
        Ok(())
    }

    fn check_auth(&self) -> Result<AuthStatus> {
        if self.state.borrow().authenticated {
            Ok(AuthStatus::ok("ops@example.com"))
        } else {
            Ok(AuthStatus::failed("No active credentialed account"))
        }
    }

    fn login(&self) -> Result<()> {
        self.record(Call::Login);
        let mut state = self.state.borrow_mut();
        if state.login_authenticates {
            state.authenticated = true;
            Ok(())
        } else {
            Err(CloudError::CommandFailed("login cancelled".into()))
        }
    }

    fn list_projects(&self) -> Result<Vec<ProjectInfo>> {
        let state = self.state.borrow();
        if state.projects_fail {
            return Err(CloudError::CommandFailed("projects unavailable".into()));
        }
        Ok(state.projects.clone())
    }

    fn create_project(&self, project_id: &str, display_name: &str) -> Result<()> {
        self.record(Call::CreateProject(project_id.to_string()));
        let mut state = self.state.borrow_mut();
        if state.projects.iter().any(|p| p.project_id == project_id) {
            return Err(CloudError::AlreadyExists(project_id.to_string()));
        }
        state.projects.push(ProjectInfo::new(project_id, display_name));
        Ok(())
    }

    fn list_billing_accounts(&self) -> Result<Vec<BillingAccount>> {
        Ok(self.state.borrow().billing_accounts.clone())
    }

    fn link_billing(&self, project_id: &str, account_id: &str) -> Result<()> {
        self.record(Call::LinkBilling(
            project_id.to_string(),
            account_id.to_string(),
        ));
        let mut state = self.state.borrow_mut();
        if state.link_fails {
            return Err(CloudError::PermissionDenied(
                "billing.resourceAssociations.create".into(),
            ));
        }
        state.billing_enabled.insert(project_id.to_string());
        Ok(())
    }

    fn describe_billing(&self, project_id: &str) -> Result<BillingInfo> {
        self.record(Call::DescribeBilling(project_id.to_string()));
        if self.state.borrow().describe_billing_fails {
            return Err(CloudError::PermissionDenied(
                "billing.resourceAssociations.list".into(),
            ));
        }
        Ok(BillingInfo {
            enabled: self.state.borrow().billing_enabled.contains(project_id),
            account_id: None,
        })
    }

    fn list_buckets(&self, project_id: &str) -> Result<Vec<BucketInfo>> {
        self.record(Call::ListBuckets(project_id.to_string()));
        Ok(self
            .state
            .borrow()
            .buckets
            .iter()
            .map(|name| BucketInfo {
                name: name.clone(),
                location: Some("EUROPE-WEST4".to_string()),
            })
            .collect())
    }

    fn create_bucket(&self, spec: &BucketSpec) -> Result<()> {
        assert!(spec.uniform_access, "buckets must use uniform access");
        self.record(Call::CreateBucket(spec.name.clone()));
        let mut state = self.state.borrow_mut();
        if let Some(message) = &state.create_bucket_error {
            return Err(CloudError::CommandFailed(message.clone()));
        }
        if state.sticky_conflict || state.buckets.contains(&spec.name) {
            return Err(CloudError::AlreadyExists(format!("gs://{}", spec.name)));
        }
        state.buckets.insert(spec.name.clone());
        Ok(())
    }

    fn delete_bucket(&self, name: &str) -> Result<()> {
        self.record(Call::DeleteBucket(name.to_string()));
        let mut state = self.state.borrow_mut();
        if state.delete_fails {
            return Err(CloudError::PermissionDenied("storage.buckets.delete".into()));
        }
        state.buckets.remove(name);
        Ok(())
    }

    fn move_bucket(&self, from: &str, to: &str) -> Result<()> {
        self.record(Call::MoveBucket(from.to_string(), to.to_string()));
        let mut state = self.state.borrow_mut();
        if state.move_fails {
            return Err(CloudError::NotFound(format!("gs://{}", from)));
        }
        state.buckets.remove(from);
        state.buckets.insert(to.to_string());
        Ok(())
    }

    fn enable_versioning(&self, name: &str, _project_id: &str) -> Result<()> {
        self.record(Call::EnableVersioning(name.to_string()));
        if self.state.borrow().versioning_fails {
            return Err(CloudError::PermissionDenied("storage.buckets.update".into()));
        }
        Ok(())
    }
}

/// Scripted operator answer
#[derive(Debug, Clone)]
pub enum Answer {
    Input(&'static str),
    Confirm(bool),
    Select(Option<usize>),
    Cancel,
}

/// Prompter replaying scripted answers; running out cancels the prompt
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub notes: Vec<(Tone, String)>,
    pub selects: Vec<Vec<String>>,
    pub confirms: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn saw(&self, fragment: &str) -> bool {
        self.notes.iter().any(|(_, note)| note.contains(fragment))
    }

    fn next(&mut self, expected: &str) -> Option<Answer> {
        let answer = self.answers.pop_front();
        if let Some(answer) = &answer {
            let matches = matches!(
                (expected, answer),
                ("input", Answer::Input(_))
                    | ("confirm", Answer::Confirm(_))
                    | ("select", Answer::Select(_))
                    | (_, Answer::Cancel)
            );
            assert!(matches, "expected {} answer, script has {:?}", expected, answer);
        }
        answer
    }
}

impl Prompter for ScriptedPrompter {
    fn select(
        &mut self,
        _message: &str,
        items: &[String],
    ) -> std::result::Result<Option<usize>, PromptError> {
        self.selects.push(items.to_vec());
        match self.next("select") {
            Some(Answer::Select(choice)) => Ok(choice),
            _ => Err(PromptError::Cancelled),
        }
    }

    fn input(
        &mut self,
        _message: &str,
        default: Option<&str>,
    ) -> std::result::Result<String, PromptError> {
        match self.next("input") {
            Some(Answer::Input("")) => Ok(default.unwrap_or_default().to_string()),
            Some(Answer::Input(text)) => Ok(text.to_string()),
            _ => Err(PromptError::Cancelled),
        }
    }

    fn confirm(&mut self, message: &str) -> std::result::Result<bool, PromptError> {
        self.confirms.push(message.to_string());
        match self.next("confirm") {
            Some(Answer::Confirm(yes)) => Ok(yes),
            _ => Err(PromptError::Cancelled),
        }
    }

    fn notify(&mut self, tone: Tone, message: &str) {
        self.notes.push((tone, message.to_string()));
    }
}

/// Run the full workflow the way the CLI does
pub fn run_workflow(
    control_plane: &FakeControlPlane,
    prompter: &mut ScriptedPrompter,
    settings: Settings,
) -> RunReport {
    let mut ctx = ProvisionContext::capture(control_plane);
    let mut provisioner = Provisioner::new(control_plane, prompter, settings);
    provisioner.execute(ProvisionState::CheckPrerequisites, &mut ctx)
}
