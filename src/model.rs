//! Wire data shapes for the course-resource API.
//!
//! Every struct here mirrors the server's JSON contract field-for-field; serde
//! attributes carry the exact wire names. The server owns all of this data —
//! the client never mutates a `Course` or `ResourceInfo` after decoding it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Courses ====================

/// One course as returned by the listing and details endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Server-assigned course identifier (e.g. `CS116`). Identity key.
    pub course_id: String,
    pub course_name: String,
    /// Numeric faculty id; see [`faculty_full_name`] / [`faculty_short_name`].
    pub course_faculty: i64,
}

/// Response envelope for the paginated course listing.
///
/// Produced fresh per (page, search, faculty) combination; pages are never
/// merged client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub courses: Vec<Course>,
    pub total_courses: u64,
}

// ==================== Resources ====================

/// Kind of an uploaded resource. Serialized as its numeric wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Notes,
    PastExam,
    Link,
}

impl ResourceType {
    /// Numeric code used on the wire and in `resource_type` query parameters.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Notes => 0,
            Self::PastExam => 1,
            Self::Link => 2,
        }
    }

    /// Decodes a wire code; returns `None` for unknown codes.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Notes),
            1 => Some(Self::PastExam),
            2 => Some(Self::Link),
            _ => None,
        }
    }

    /// Human label used in CLI output and upload prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Notes => "Notes",
            Self::PastExam => "Past Exam",
            Self::Link => "Link",
        }
    }

    /// Hint text shown next to the title field for this kind of upload.
    #[must_use]
    pub fn title_hint(self) -> &'static str {
        match self {
            Self::Notes => "i.e., Slides, Student Notes, etc.",
            Self::PastExam => "i.e., Final, Midterm, Quiz 1/2... etc.",
            Self::Link => "i.e., Dr's Recorded Lectures (YouTube, etc.).",
        }
    }
}

impl Serialize for ResourceType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown resource type code {code}")))
    }
}

/// Academic term a resource belongs to. Serialized as the plain term name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Semester {
    Fall,
    Spring,
    Summer,
}

impl Semester {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one uploaded resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub title: String,
    pub subtitle: Option<String>,
    pub resource_id: String,
    pub resource_type: ResourceType,
    pub dateuploaded: DateTime<Utc>,
    pub semester: Semester,
    pub academic_year: i32,
    pub issolved: bool,
}

/// One physical file belonging to exactly one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_id: String,
    pub file_name: String,
    pub file_url: String,
}

/// A resource together with its files, as the details endpoint returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub resource_info: ResourceInfo,
    pub files: Vec<FileInfo>,
}

/// Lightweight link resource (no files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub title: String,
    pub url: String,
}

/// Response envelope for one course's details, scoped to one resource-type
/// tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetails {
    pub metadata: Course,
    pub resources: Vec<ResourceEntry>,
    pub links: Vec<LinkInfo>,
}

// ==================== Insert request bodies ====================

/// JSON `metadata` part of the multipart resource-insert request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertResourceRequest {
    pub title: String,
    pub subtitle: Option<String>,
    pub course_id: String,
    pub resource_type: ResourceType,
    pub semester: Semester,
    pub academic_year: i32,
    /// Always false on upload; flipped server-side once a solution is posted.
    pub issolved: bool,
}

/// JSON body of the link-insert request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertLinkRequest {
    pub title: String,
    pub url: String,
}

// ==================== Faculty name tables ====================

/// Full faculty name for a faculty id.
///
/// Id 1 has no entry here (only a short name); lookups for it return `None`.
#[must_use]
pub fn faculty_full_name(faculty_id: i64) -> Option<&'static str> {
    match faculty_id {
        0 => Some("Business School"),
        2 => Some("School of Basic Sciences and Humanities"),
        3 => Some("School of Applied Medical Sciences"),
        4 => Some("School of Applied Technical Sciences"),
        5 => Some("School of Architecture and Built Environment"),
        6 => Some("School of Electrical Engineering and Information Technology"),
        7 => Some("German Language Center"),
        8 => Some("School of Natural Resources Engineering and Management"),
        9 => Some("School of Nursing"),
        _ => None,
    }
}

/// Short faculty abbreviation for a faculty id.
#[must_use]
pub fn faculty_short_name(faculty_id: i64) -> Option<&'static str> {
    match faculty_id {
        0 => Some("BS"),
        1 => Some("GSBA"),
        2 => Some("SBSH"),
        3 => Some("SAMS"),
        4 => Some("SATS"),
        5 => Some("SABE"),
        6 => Some("SEEIT"),
        7 => Some("GLC"),
        8 => Some("SNREM"),
        9 => Some("SN"),
        _ => None,
    }
}

/// Faculty ids that can be offered as list filters, in menu order.
pub const FACULTY_FILTER_IDS: &[i64] = &[0, 2, 3, 4, 5, 6, 7, 8, 9];
