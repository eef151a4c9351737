//! SelectProject and CreateProject

use crate::context::ProvisionContext;
use crate::machine::Provisioner;
use crate::prompt::Tone;
use crate::state::ProvisionState;
use regex::Regex;
use std::sync::LazyLock;

/// Lowercase letter, 4-28 of `[a-z0-9-]`, lowercase alphanumeric end (6-30 chars)
static PROJECT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]{4,28}[a-z0-9]$").expect("valid regex"));

pub fn is_valid_project_id(project_id: &str) -> bool {
    PROJECT_ID_PATTERN.is_match(project_id)
}

/// Operator answer to the project menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectChoice {
    /// Zero-based index into the listed projects
    Existing(usize),
    Create,
    Quit,
    OutOfRange,
    NotANumber,
}

impl ProjectChoice {
    pub fn parse(answer: &str, count: usize) -> Self {
        let answer = answer.trim().to_lowercase();
        match answer.as_str() {
            "c" => return ProjectChoice::Create,
            "q" => return ProjectChoice::Quit,
            _ => {}
        }

        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => ProjectChoice::Existing(n - 1),
            Ok(_) => ProjectChoice::OutOfRange,
            Err(_) => ProjectChoice::NotANumber,
        }
    }
}

pub(crate) fn select(p: &mut Provisioner<'_>, ctx: &mut ProvisionContext) -> ProvisionState {
    p.prompter
        .notify(Tone::Heading, "--- Selecting Google Cloud Project ---");
    ctx.discard_selection();

    let projects = match p.control_plane.list_projects() {
        Ok(projects) => projects,
        Err(e) => {
            p.prompter
                .notify(Tone::Error, &format!("Failed to list projects: {}", e));
            return ProvisionState::Terminal;
        }
    };

    if projects.is_empty() {
        p.prompter.notify(Tone::Info, "No projects found.");
    } else {
        p.prompter.notify(Tone::Info, "Available projects:");
        for (i, project) in projects.iter().enumerate() {
            p.prompter.notify(
                Tone::Info,
                &format!("  {}: {} ({})", i + 1, project.name, project.project_id),
            );
        }
    }
    p.prompter.notify(Tone::Info, "  C: Create a new project");
    p.prompter.notify(Tone::Info, "  Q: Quit");

    loop {
        let answer = match p
            .prompter
            .input("Select a project by number or enter 'C'", None)
        {
            Ok(answer) => answer,
            Err(_) => return ProvisionState::Terminal,
        };

        match ProjectChoice::parse(&answer, projects.len()) {
            ProjectChoice::Existing(index) => {
                let project = &projects[index];
                tracing::debug!(project = %project.project_id, "Project selected");
                ctx.select_project(project.project_id.clone());
                return ProvisionState::CheckBilling;
            }
            ProjectChoice::Create => return ProvisionState::CreateProject,
            ProjectChoice::Quit => return ProvisionState::Terminal,
            ProjectChoice::OutOfRange => {
                p.prompter.notify(Tone::Warning, "Invalid number.");
            }
            ProjectChoice::NotANumber => {
                p.prompter
                    .notify(Tone::Warning, "Please enter a valid number or 'C'.");
            }
        }
    }
}

pub(crate) fn create(p: &mut Provisioner<'_>, ctx: &mut ProvisionContext) -> ProvisionState {
    p.prompter
        .notify(Tone::Heading, "--- Creating a New Google Cloud Project ---");

    let project_id = match p
        .prompter
        .input("Enter a unique project ID (e.g., 'gcp-ops-data')", None)
    {
        Ok(answer) => answer.trim().to_string(),
        Err(_) => return ProvisionState::Terminal,
    };

    if !is_valid_project_id(&project_id) {
        p.prompter.notify(
            Tone::Error,
            "Invalid project ID format. Use 6-30 lowercase letters, digits or hyphens, \
             starting with a letter and not ending with a hyphen.",
        );
        return ProvisionState::SelectProject;
    }

    let display_name = match p.prompter.input(
        &format!("Enter a display name for '{}'", project_id),
        Some(&project_id),
    ) {
        Ok(answer) => super::or_default(answer, &project_id),
        Err(_) => return ProvisionState::Terminal,
    };

    match p.control_plane.create_project(&project_id, &display_name) {
        Ok(()) => {
            p.prompter.notify(
                Tone::Success,
                &format!("✔ Project '{}' created.", project_id),
            );
            ctx.select_project(project_id);
            ProvisionState::LinkBilling
        }
        Err(e) => {
            p.prompter.notify(Tone::Error, &e.to_string());
            p.prompter.notify(
                Tone::Warning,
                "Project creation failed. Please try again.",
            );
            ProvisionState::SelectProject
        }
    }
}
