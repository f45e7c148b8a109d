//! The upload flow, driven end to end from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::warn;

use coursefiles_core::api::{ApiClient, UploadFile};
use coursefiles_core::model::{ResourceType, Semester};
use coursefiles_core::upload::{Field, SubmitOutcome, UploadForm, Uploader, parse_year};

/// Fills the upload form from CLI input, validates, and submits.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    client: &ApiClient,
    course_id: &str,
    kind: ResourceType,
    title: String,
    description: Option<String>,
    semester: Option<Semester>,
    year: Option<&str>,
    files: &[PathBuf],
    url: Option<&str>,
) -> Result<()> {
    let mut form = UploadForm::for_kind(kind);
    form.title = title;
    if let Some(description) = description {
        form.description = description;
    }
    form.semester = semester;
    if let Some(year) = year {
        match parse_year(year) {
            Ok(parsed) => form.academic_year = parsed,
            Err(message) => {
                println!("year: {message}");
                bail!("upload blocked by validation");
            }
        }
    }
    if let Some(url) = url {
        form.link_url = url.to_string();
    }

    let mut batch = Vec::new();
    for path in files {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        batch.push(UploadFile { name, bytes });
    }
    form.attach_files(batch);

    let mut uploader = Uploader::new();
    match uploader.submit(client, course_id, &form).await? {
        SubmitOutcome::Invalid(errors) => {
            for error in errors {
                println!("{}: {}", field_name(error.field), error.message);
            }
            bail!("upload blocked by validation");
        }
        SubmitOutcome::LinkUrlMissing => {
            bail!("link URL is empty; nothing was submitted");
        }
        SubmitOutcome::RejectedByServer { status, body } => {
            // The server's body is shown raw; it carries its own detail.
            println!("{body}");
            bail!("upload rejected (HTTP {status})");
        }
        SubmitOutcome::Busy => bail!("another submission is already in flight"),
        SubmitOutcome::Submitted { invalidate } => {
            println!("Upload accepted.");
            // Targeted refresh of just the affected tabs, instead of a full
            // reload of every view.
            for tab in invalidate {
                match client.course_details(course_id, tab.resource_type()).await {
                    Ok(details) => println!(
                        "{} now has {} resources and {} links.",
                        tab.label(),
                        details.resources.len(),
                        details.links.len()
                    ),
                    Err(error) => {
                        warn!(%error, tab = tab.label(), "refresh after upload failed");
                    }
                }
            }
            Ok(())
        }
    }
}

fn field_name(field: Field) -> &'static str {
    match field {
        Field::Title => "title",
        Field::ResourceType => "resource type",
        Field::AcademicYear => "year",
        Field::Semester => "semester",
    }
}
