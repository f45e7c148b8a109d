//! Upload flow: typed form, validation rule table, and submission.
//!
//! The interaction is two-step, as in the product: the user first picks a
//! resource kind (Notes / Past Exam / Link), which seeds a fresh form via
//! [`UploadForm::for_kind`]; then fills and submits it. Switching the detail
//! tab discards any draft — callers simply construct a new form.
//!
//! Validation is an enumerated rule table (field → rule → message) applied
//! before any network call. Submission branches by kind: links go out as one
//! JSON POST, file-bearing resources as one multipart POST with a `metadata`
//! part and one `files` part per attachment. A successful submission names
//! the detail tabs whose cache slots must be invalidated and refetched — no
//! whole-page reload.

use chrono::Datelike;
use tracing::{debug, info, instrument};

use crate::api::{ApiClient, ApiError, UploadFile};
use crate::detail::Tab;
use crate::model::{InsertLinkRequest, InsertResourceRequest, ResourceType, Semester};

// ==================== Validation ====================

/// Form fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    ResourceType,
    AcademicYear,
    Semester,
}

/// One failed validation rule, surfaced inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
enum Check {
    TitleMinLen(usize),
    ResourceTypeChosen,
    YearAtLeast(i32),
    YearAtMostNextYear,
    SemesterChosen,
}

/// The full rule table: field → rule → message.
const VALIDATION_RULES: &[(Field, Check, &str)] = &[
    (
        Field::Title,
        Check::TitleMinLen(2),
        "Title must be at least 2 characters.",
    ),
    (
        Field::ResourceType,
        Check::ResourceTypeChosen,
        "Please select a resource type first.",
    ),
    (
        Field::AcademicYear,
        Check::YearAtLeast(2000),
        "Year must be 2000 or later.",
    ),
    (
        Field::AcademicYear,
        Check::YearAtMostNextYear,
        "Year cannot be in the future.",
    ),
    (
        Field::Semester,
        Check::SemesterChosen,
        "Please select a semester.",
    ),
];

/// Parses a year as typed by the user.
///
/// # Errors
///
/// Returns the user-facing message when the input is not a whole number.
pub fn parse_year(input: &str) -> Result<i32, &'static str> {
    input
        .trim()
        .parse()
        .map_err(|_| "Year must be a whole number.")
}

// ==================== Form ====================

/// Draft of one upload, with named, typed fields.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub title: String,
    /// Optional free-text description; empty means no subtitle on the wire.
    pub description: String,
    /// Only meaningful for Link uploads.
    pub link_url: String,
    resource_type: Option<ResourceType>,
    pub semester: Option<Semester>,
    pub academic_year: i32,
    files: Vec<UploadFile>,
}

impl UploadForm {
    /// Fresh form seeded with a resource kind (step one of the interaction).
    /// The academic year defaults to the current year.
    #[must_use]
    pub fn for_kind(kind: ResourceType) -> Self {
        Self {
            resource_type: Some(kind),
            academic_year: chrono::Utc::now().year(),
            ..Self::default()
        }
    }

    /// The seeded resource kind, if step one has happened.
    #[must_use]
    pub fn resource_type(&self) -> Option<ResourceType> {
        self.resource_type
    }

    /// Adds a batch of chosen files. New picks go ahead of earlier ones.
    pub fn attach_files(&mut self, batch: impl IntoIterator<Item = UploadFile>) {
        let mut batch: Vec<UploadFile> = batch.into_iter().collect();
        batch.append(&mut self.files);
        self.files = batch;
    }

    /// Removes one selected file by position.
    pub fn remove_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.files.remove(index);
        }
    }

    /// The files currently attached, in display order.
    #[must_use]
    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    /// Runs the rule table against the form.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        self.validate_at(chrono::Utc::now().year())
    }

    /// Rule-table validation with an explicit current year (for tests).
    #[must_use]
    pub fn validate_at(&self, current_year: i32) -> Vec<FieldError> {
        VALIDATION_RULES
            .iter()
            .filter_map(|(field, check, message)| {
                let failed = match check {
                    Check::TitleMinLen(min) => self.title.chars().count() < *min,
                    Check::ResourceTypeChosen => self.resource_type.is_none(),
                    Check::YearAtLeast(min) => self.academic_year < *min,
                    Check::YearAtMostNextYear => self.academic_year > current_year + 1,
                    Check::SemesterChosen => self.semester.is_none(),
                };
                failed.then_some(FieldError {
                    field: *field,
                    message,
                })
            })
            .collect()
    }

    fn subtitle(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

// ==================== Submission ====================

/// Result of one submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Accepted by the server. The named tabs' cache slots are now stale and
    /// must be invalidated and refetched by the caller.
    Submitted { invalidate: Vec<Tab> },

    /// The server rejected the submission; `body` is shown to the user raw
    /// and the form stays open with its state intact.
    RejectedByServer { status: u16, body: String },

    /// Client-side validation failed; nothing reached the network.
    Invalid(Vec<FieldError>),

    /// A Link upload had an empty URL. The link-URL requirement is not a
    /// validation rule (see DESIGN.md); submission reports the no-op
    /// distinctly instead of silently doing nothing.
    LinkUrlMissing,

    /// A submission is already in flight; this one was not started.
    Busy,
}

/// Detail tabs a successful upload of this kind makes stale.
///
/// Links appear in every tab's details payload, so a link insert stales
/// both slots.
#[must_use]
pub fn tabs_to_invalidate(kind: ResourceType) -> Vec<Tab> {
    match kind {
        ResourceType::Notes => vec![Tab::Notes],
        ResourceType::PastExam => vec![Tab::Exams],
        ResourceType::Link => vec![Tab::Notes, Tab::Exams],
    }
}

/// Drives submissions and enforces the single-flight busy flag.
#[derive(Debug, Default)]
pub struct Uploader {
    busy: bool,
}

impl Uploader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submission is in flight (inputs and the submit control are
    /// disabled meanwhile).
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Validates and submits one form for one course.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] only for transport-level failures. Application
    /// rejections and validation failures are [`SubmitOutcome`] variants.
    #[instrument(skip(self, client, form), fields(course_id))]
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        course_id: &str,
        form: &UploadForm,
    ) -> Result<SubmitOutcome, ApiError> {
        if self.busy {
            debug!("submission already in flight");
            return Ok(SubmitOutcome::Busy);
        }
        self.busy = true;
        let outcome = self.submit_inner(client, course_id, form).await;
        self.busy = false;
        outcome
    }

    async fn submit_inner(
        &self,
        client: &ApiClient,
        course_id: &str,
        form: &UploadForm,
    ) -> Result<SubmitOutcome, ApiError> {
        let errors = form.validate();
        if !errors.is_empty() {
            debug!(failed_rules = errors.len(), "validation blocked submission");
            return Ok(SubmitOutcome::Invalid(errors));
        }
        // Validation guarantees these; bail back to the rule table otherwise.
        let Some(kind) = form.resource_type() else {
            return Ok(SubmitOutcome::Invalid(form.validate()));
        };

        let sent = match kind {
            ResourceType::Link => {
                if form.link_url.trim().is_empty() {
                    return Ok(SubmitOutcome::LinkUrlMissing);
                }
                let request = InsertLinkRequest {
                    title: form.title.clone(),
                    url: form.link_url.trim().to_string(),
                };
                client.insert_link(course_id, &request).await
            }
            ResourceType::Notes | ResourceType::PastExam => {
                let Some(semester) = form.semester else {
                    return Ok(SubmitOutcome::Invalid(form.validate()));
                };
                let request = InsertResourceRequest {
                    title: form.title.clone(),
                    subtitle: form.subtitle(),
                    course_id: course_id.to_string(),
                    resource_type: kind,
                    semester,
                    academic_year: form.academic_year,
                    issolved: false,
                };
                client
                    .insert_resource(course_id, &request, form.files())
                    .await
            }
        };

        match sent {
            Ok(()) => {
                info!(kind = kind.label(), "upload accepted");
                Ok(SubmitOutcome::Submitted {
                    invalidate: tabs_to_invalidate(kind),
                })
            }
            Err(ApiError::Rejected { status, body, .. }) => {
                Ok(SubmitOutcome::RejectedByServer { status, body })
            }
            Err(other) => Err(other),
        }
    }
}
