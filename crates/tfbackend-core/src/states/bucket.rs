//! GetBucketDetails and CreateBucket
//!
//! CreateBucket owns the conflict-resolution protocol: a taken name offers
//! destroy, rename or abort. Every other creation error ends the run.

use crate::context::ProvisionContext;
use crate::machine::Provisioner;
use crate::prompt::Tone;
use crate::state::ProvisionState;
use chrono::{DateTime, Local};
use tfbackend_cloud::BucketSpec;

/// Upper bound on resolved conflicts within one CreateBucket pass
pub const MAX_CONFLICT_RESOLUTIONS: usize = 5;

const RENAME_SUFFIX: &str = "-old-";

/// Operator's answer to a bucket-name conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    DestroyAndRecreate,
    RenameAndRecreate,
    Abort,
}

impl ConflictResolution {
    pub const ALL: [ConflictResolution; 3] = [
        ConflictResolution::DestroyAndRecreate,
        ConflictResolution::RenameAndRecreate,
        ConflictResolution::Abort,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConflictResolution::DestroyAndRecreate => "Destroy & re-create",
            ConflictResolution::RenameAndRecreate => "Rename old & re-create",
            ConflictResolution::Abort => "Abort",
        }
    }
}

/// Destination for moving an existing bucket out of the way
pub fn rename_target(name: &str, now: DateTime<Local>) -> String {
    format!("{}{}{}", name, RENAME_SUFFIX, now.format("%Y%m%d%H%M%S"))
}

pub(crate) fn details(p: &mut Provisioner<'_>, ctx: &mut ProvisionContext) -> ProvisionState {
    let Some(project_id) = ctx.project_id().map(str::to_owned) else {
        tracing::warn!("GetBucketDetails entered without a project");
        return ProvisionState::SelectProject;
    };

    p.prompter.notify(
        Tone::Heading,
        &format!("--- Checking for Existing Buckets in '{}' ---", project_id),
    );

    match p.control_plane.list_buckets(&project_id) {
        Ok(buckets) if !buckets.is_empty() => {
            p.prompter.notify(Tone::Info, "Found existing buckets:");
            for bucket in &buckets {
                let line = match &bucket.location {
                    Some(location) => format!("  gs://{} ({})", bucket.name, location),
                    None => format!("  gs://{}", bucket.name),
                };
                p.prompter.notify(Tone::Info, &line);
            }
        }
        Ok(_) => {
            p.prompter
                .notify(Tone::Info, "No buckets found in this project.");
        }
        Err(e) => {
            tracing::warn!("Failed to list buckets in {}: {}", project_id, e);
            p.prompter
                .notify(Tone::Info, "No buckets found in this project.");
        }
    }

    p.prompter.notify(Tone::Heading, "--- Configuring GCS Bucket ---");

    let suggested = p.settings.suggested_bucket(&project_id);
    let bucket_name = match p.prompter.input("Enter a bucket name", Some(&suggested)) {
        Ok(answer) => super::or_default(answer, &suggested),
        Err(_) => return ProvisionState::Terminal,
    };

    let default_location = p.settings.default_location.clone();
    let location = match p.prompter.input(
        &format!("Enter a location (e.g., {})", default_location),
        Some(&default_location),
    ) {
        Ok(answer) => super::or_default(answer, &default_location),
        Err(_) => return ProvisionState::Terminal,
    };

    ctx.set_bucket(bucket_name, location);
    ProvisionState::CreateBucket
}

pub(crate) fn create(p: &mut Provisioner<'_>, ctx: &mut ProvisionContext) -> ProvisionState {
    let (Some(project_id), Some(bucket_name), Some(location)) = (
        ctx.project_id().map(str::to_owned),
        ctx.bucket_name().map(str::to_owned),
        ctx.location().map(str::to_owned),
    ) else {
        tracing::warn!("CreateBucket entered without bucket details");
        return ProvisionState::GetBucketDetails;
    };

    p.prompter.notify(
        Tone::Heading,
        &format!(
            "--- Ensuring Bucket '{}' Exists and is Configured ---",
            bucket_name
        ),
    );

    let spec = BucketSpec::uniform(&bucket_name, &project_id, &location);
    let mut resolved = 0;

    loop {
        let err = match p.control_plane.create_bucket(&spec) {
            Ok(()) => {
                p.prompter.notify(
                    Tone::Success,
                    &format!("✔ Bucket '{}' created successfully.", bucket_name),
                );
                break;
            }
            Err(e) => e,
        };

        if !err.is_conflict() {
            p.prompter.notify(Tone::Error, &err.to_string());
            return ProvisionState::Terminal;
        }

        if resolved >= MAX_CONFLICT_RESOLUTIONS {
            p.prompter.notify(
                Tone::Error,
                &format!(
                    "Bucket '{}' still exists after {} attempts. Aborting.",
                    bucket_name, resolved
                ),
            );
            return ProvisionState::Terminal;
        }

        p.prompter.notify(
            Tone::Warning,
            &format!("Bucket '{}' already exists.", bucket_name),
        );

        let resolution = match ask_resolution(p) {
            Some(resolution) => resolution,
            None => ConflictResolution::Abort,
        };
        tracing::info!(bucket = %bucket_name, ?resolution, "Resolving bucket conflict");

        let cleared = match resolution {
            ConflictResolution::DestroyAndRecreate => destroy(p, &bucket_name),
            ConflictResolution::RenameAndRecreate => rename(p, &bucket_name),
            ConflictResolution::Abort => {
                p.prompter.notify(Tone::Info, "Operation aborted by user.");
                false
            }
        };
        if !cleared {
            return ProvisionState::Terminal;
        }
        resolved += 1;
    }

    p.prompter.notify(Tone::Info, "Ensuring versioning is enabled...");
    if let Err(e) = p.control_plane.enable_versioning(&bucket_name, &project_id) {
        p.prompter.notify(Tone::Error, &e.to_string());
        p.prompter.notify(Tone::Error, "Failed to enable versioning.");
        return ProvisionState::Terminal;
    }
    p.prompter.notify(Tone::Success, "✔ Versioning is enabled.");

    ProvisionState::Success
}

fn ask_resolution(p: &mut Provisioner<'_>) -> Option<ConflictResolution> {
    let items: Vec<String> = ConflictResolution::ALL
        .iter()
        .map(|r| r.label().to_string())
        .collect();

    match p.prompter.select("Choose an action", &items) {
        Ok(Some(index)) => ConflictResolution::ALL.get(index).copied(),
        Ok(None) | Err(_) => None,
    }
}

/// Delete the existing bucket after a second confirmation
fn destroy(p: &mut Provisioner<'_>, bucket_name: &str) -> bool {
    let confirmed = p
        .prompter
        .confirm(&format!(
            "This will PERMANENTLY DELETE gs://{} and all its contents. Are you sure?",
            bucket_name
        ))
        .unwrap_or(false);

    if !confirmed {
        p.prompter.notify(Tone::Info, "Destruction cancelled.");
        return false;
    }

    p.prompter
        .notify(Tone::Info, &format!("Destroying gs://{}...", bucket_name));
    if let Err(e) = p.control_plane.delete_bucket(bucket_name) {
        p.prompter.notify(Tone::Error, &e.to_string());
        p.prompter
            .notify(Tone::Error, "Failed to destroy bucket. Aborting.");
        return false;
    }

    p.prompter
        .notify(Tone::Info, "Destruction complete. Retrying creation...");
    true
}

/// Move the existing bucket to a timestamped name
fn rename(p: &mut Provisioner<'_>, bucket_name: &str) -> bool {
    let target = rename_target(bucket_name, Local::now());

    p.prompter.notify(
        Tone::Info,
        &format!("Renaming gs://{} to gs://{}...", bucket_name, target),
    );
    if let Err(e) = p.control_plane.move_bucket(bucket_name, &target) {
        p.prompter.notify(Tone::Error, &e.to_string());
        p.prompter
            .notify(Tone::Error, "Failed to rename bucket. Aborting.");
        return false;
    }

    p.prompter
        .notify(Tone::Info, "Rename complete. Retrying creation...");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rename_target() {
        let now = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(
            rename_target("ops-data-tfstate", now),
            "ops-data-tfstate-old-20260307090501"
        );
    }

    #[test]
    fn test_rename_target_distinct_with_timestamp() {
        let target = rename_target("demo", Local::now());
        assert_ne!(target, "demo");

        let stamp = target.strip_prefix("demo-old-").unwrap();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_resolution_labels() {
        let labels: Vec<_> = ConflictResolution::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(
            labels,
            vec!["Destroy & re-create", "Rename old & re-create", "Abort"]
        );
    }
}
