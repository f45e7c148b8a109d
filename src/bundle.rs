//! Download-all bundling: fetch a resource's files into one ZIP archive.
//!
//! Files are fetched one at a time, in sequence, bounding peak memory and
//! connection use. Each per-file fetch is individually guarded: a failure is
//! recorded and the remaining files are still fetched and archived, so one
//! bad file URL costs exactly that file, not the whole bundle. The outcome
//! reports the bundled set and the failure list side by side.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::api::{ApiClient, ApiError};
use crate::model::FileInfo;

/// Errors assembling the archive itself (fetch failures are per-file data,
/// not errors — see [`BundleOutcome::failures`]).
#[derive(Debug, Error)]
pub enum BundleError {
    /// Failed to write one entry's bytes into the archive.
    #[error("failed to write {entry} into the archive: {source}")]
    Write {
        /// The archive entry name.
        entry: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The archive writer itself failed.
    #[error("failed to assemble archive: {source}")]
    Archive {
        #[from]
        source: zip::result::ZipError,
    },
}

/// One file that could not be fetched.
#[derive(Debug)]
pub struct BundleFailure {
    pub file_name: String,
    pub file_url: String,
    pub error: ApiError,
}

/// Result of bundling one resource's files.
#[derive(Debug)]
pub struct BundleOutcome {
    /// Archive file name: `{resource title}.zip`.
    pub archive_name: String,
    /// Finished archive bytes; `None` when no file could be fetched.
    pub archive: Option<Vec<u8>>,
    /// Entry names that made it into the archive, in fetch order.
    pub bundled: Vec<String>,
    /// Files that failed to fetch, with their errors.
    pub failures: Vec<BundleFailure>,
}

impl BundleOutcome {
    /// True when every file landed in the archive.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.archive.is_some()
    }
}

/// Fetches every file of a resource and assembles them into one in-memory
/// ZIP named after the resource title.
///
/// `progress` is called after each file completes (fetched or failed) with
/// `(done, total)`.
///
/// # Errors
///
/// Returns [`BundleError`] only when archive assembly itself fails; fetch
/// failures are collected into the outcome instead.
#[instrument(skip(client, files, progress), fields(title, files = files.len()))]
pub async fn bundle_resource(
    client: &ApiClient,
    title: &str,
    files: &[FileInfo],
    mut progress: impl FnMut(usize, usize),
) -> Result<BundleOutcome, BundleError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let mut used_names = HashSet::new();
    let mut bundled = Vec::new();
    let mut failures = Vec::new();

    for (index, file) in files.iter().enumerate() {
        match client.fetch_file(&file.file_url).await {
            Ok(bytes) => {
                let entry = unique_entry_name(&file.file_name, &used_names);
                used_names.insert(entry.clone());
                writer.start_file(entry.as_str(), options)?;
                writer.write_all(&bytes).map_err(|source| BundleError::Write {
                    entry: entry.clone(),
                    source,
                })?;
                debug!(entry = %entry, bytes = bytes.len(), "file archived");
                bundled.push(entry);
            }
            Err(error) => {
                warn!(file = %file.file_name, url = %file.file_url, %error, "file skipped");
                failures.push(BundleFailure {
                    file_name: file.file_name.clone(),
                    file_url: file.file_url.clone(),
                    error,
                });
            }
        }
        progress(index + 1, files.len());
    }

    let archive = if bundled.is_empty() {
        None
    } else {
        Some(writer.finish()?.into_inner())
    };

    info!(
        bundled = bundled.len(),
        failed = failures.len(),
        "bundle assembled"
    );

    Ok(BundleOutcome {
        archive_name: format!("{title}.zip"),
        archive,
        bundled,
        failures,
    })
}

/// Picks an entry name that is free in the archive, suffixing duplicates
/// with `_2`, `_3`, ... before the extension.
fn unique_entry_name(file_name: &str, used: &HashSet<String>) -> String {
    if !used.contains(file_name) {
        return file_name.to_string();
    }
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (file_name, String::new()),
    };
    let mut suffix = 2;
    loop {
        let candidate = format!("{stem}_{suffix}{extension}");
        if !used.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zip::ZipArchive;

    fn file(server: &MockServer, name: &str, route: &str) -> FileInfo {
        FileInfo {
            file_id: route.trim_start_matches('/').to_string(),
            file_name: name.to_string(),
            file_url: format!("{}{route}", server.uri()),
        }
    }

    async fn mount_file(server: &MockServer, route: &str, body: &[u8]) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(server)
            .await;
    }

    fn entries(archive: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut reader = ZipArchive::new(Cursor::new(archive.to_vec())).unwrap();
        (0..reader.len())
            .map(|i| {
                let mut entry = reader.by_index(i).unwrap();
                let mut contents = Vec::new();
                std::io::Read::read_to_end(&mut entry, &mut contents).unwrap();
                (entry.name().to_string(), contents)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_three_files_bundle_into_one_named_archive() {
        let server = MockServer::start().await;
        mount_file(&server, "/f/1", b"questions").await;
        mount_file(&server, "/f/2", b"answers").await;
        mount_file(&server, "/f/3", b"marking scheme").await;

        let client = ApiClient::from_base(&server.uri()).unwrap();
        let files = [
            file(&server, "questions.pdf", "/f/1"),
            file(&server, "answers.pdf", "/f/2"),
            file(&server, "scheme.pdf", "/f/3"),
        ];

        let outcome = bundle_resource(&client, "Midterm 2023", &files, |_, _| {})
            .await
            .unwrap();

        assert_eq!(outcome.archive_name, "Midterm 2023.zip");
        assert!(outcome.is_complete());
        let entries = entries(outcome.archive.as_ref().unwrap());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], ("questions.pdf".to_string(), b"questions".to_vec()));
        assert_eq!(entries[2].0, "scheme.pdf");
    }

    #[tokio::test]
    async fn test_failed_file_is_reported_and_rest_still_bundle() {
        let server = MockServer::start().await;
        mount_file(&server, "/f/ok", b"fine").await;
        Mock::given(method("GET"))
            .and(path("/f/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = ApiClient::from_base(&server.uri()).unwrap();
        let files = [
            file(&server, "ok.pdf", "/f/ok"),
            file(&server, "gone.pdf", "/f/gone"),
        ];

        let outcome = bundle_resource(&client, "Quiz 1", &files, |_, _| {})
            .await
            .unwrap();

        assert!(!outcome.is_complete());
        assert_eq!(outcome.bundled, ["ok.pdf"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].file_name, "gone.pdf");
        assert!(matches!(
            outcome.failures[0].error,
            ApiError::Rejected { status: 404, .. }
        ));
        assert_eq!(entries(outcome.archive.as_ref().unwrap()).len(), 1);
    }

    #[tokio::test]
    async fn test_no_archive_when_every_fetch_fails() {
        let server = MockServer::start().await;
        let client = ApiClient::from_base(&server.uri()).unwrap();
        let files = [file(&server, "gone.pdf", "/missing")];

        let outcome = bundle_resource(&client, "Final 2022", &files, |_, _| {})
            .await
            .unwrap();
        assert!(outcome.archive.is_none());
        assert_eq!(outcome.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_file_names_get_suffixes() {
        let server = MockServer::start().await;
        mount_file(&server, "/f/1", b"one").await;
        mount_file(&server, "/f/2", b"two").await;

        let client = ApiClient::from_base(&server.uri()).unwrap();
        let files = [
            file(&server, "notes.pdf", "/f/1"),
            file(&server, "notes.pdf", "/f/2"),
        ];

        let outcome = bundle_resource(&client, "Week 1", &files, |_, _| {})
            .await
            .unwrap();
        assert_eq!(outcome.bundled, ["notes.pdf", "notes_2.pdf"]);
    }

    #[tokio::test]
    async fn test_progress_reports_each_file() {
        let server = MockServer::start().await;
        mount_file(&server, "/f/1", b"one").await;
        mount_file(&server, "/f/2", b"two").await;

        let client = ApiClient::from_base(&server.uri()).unwrap();
        let files = [
            file(&server, "a.pdf", "/f/1"),
            file(&server, "b.pdf", "/f/2"),
        ];

        let mut seen = Vec::new();
        bundle_resource(&client, "Week 1", &files, |done, total| {
            seen.push((done, total));
        })
        .await
        .unwrap();
        assert_eq!(seen, [(1, 2), (2, 2)]);
    }

    #[test]
    fn test_unique_entry_name_suffixes_before_extension() {
        let mut used = HashSet::new();
        assert_eq!(unique_entry_name("notes.pdf", &used), "notes.pdf");
        used.insert("notes.pdf".to_string());
        assert_eq!(unique_entry_name("notes.pdf", &used), "notes_2.pdf");
        used.insert("notes_2.pdf".to_string());
        assert_eq!(unique_entry_name("notes.pdf", &used), "notes_3.pdf");
        used.insert("README".to_string());
        assert_eq!(unique_entry_name("README", &used), "README_2");
    }
}
