//! Download-all for one resource: fetch every file into a single archive.

use std::path::Path;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};

use coursefiles_core::api::ApiClient;
use coursefiles_core::bundle::bundle_resource;
use coursefiles_core::detail::Tab;
use coursefiles_core::model::ResourceEntry;

/// Bundles one resource's files into `{title}.zip` under `output`.
pub async fn run(
    client: &ApiClient,
    course_id: &str,
    resource: &str,
    output: &Path,
) -> Result<()> {
    let entry = find_resource(client, course_id, resource).await?;
    let title = &entry.resource_info.title;
    if entry.files.is_empty() {
        bail!("resource '{title}' has no files to bundle");
    }

    let bar = ProgressBar::new(entry.files.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} files",
    )?);

    let outcome = bundle_resource(client, title, &entry.files, |done, _| {
        bar.set_position(done as u64);
    })
    .await?;
    bar.finish_and_clear();

    for failure in &outcome.failures {
        println!("failed: {} — {}", failure.file_name, failure.error);
    }

    let Some(archive) = outcome.archive else {
        bail!("no files could be fetched; archive not written");
    };
    let path = output.join(&outcome.archive_name);
    tokio::fs::write(&path, archive)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "Saved {} ({} of {} files).",
        path.display(),
        outcome.bundled.len(),
        entry.files.len()
    );
    Ok(())
}

/// Looks the resource up by id or exact title, checking both tabs.
async fn find_resource(
    client: &ApiClient,
    course_id: &str,
    needle: &str,
) -> Result<ResourceEntry> {
    for tab in [Tab::Notes, Tab::Exams] {
        let details = client.course_details(course_id, tab.resource_type()).await?;
        if let Some(entry) = details.resources.into_iter().find(|e| {
            e.resource_info.resource_id == needle || e.resource_info.title == needle
        }) {
            return Ok(entry);
        }
    }
    bail!("no resource '{needle}' in course {course_id}")
}
