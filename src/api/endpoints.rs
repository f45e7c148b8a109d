//! Endpoint table and URL construction for the course-resource API.
//!
//! The four URL prefixes mirror the server's route layout. `from_base`
//! derives all of them from one origin; each prefix can also be overridden
//! individually, which is how tests point the client at a mock server.

use crate::model::ResourceType;

/// Courses shown per listing page. Page count is `ceil(total / PAGE_SIZE)`.
pub const PAGE_SIZE: u64 = 12;

/// URL prefixes for every operation the client performs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Course listing endpoint (query string appended).
    pub courses: String,
    /// Course details prefix; the course id is concatenated directly.
    pub course_details: String,
    /// Resource-insert prefix; `/{course_id}` is appended.
    pub insert_course: String,
    /// Link-insert prefix; `/{course_id}` is appended.
    pub insert_link: String,
}

impl Endpoints {
    /// Derives the full endpoint table from a single API origin.
    #[must_use]
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            courses: format!("{base}/courses"),
            course_details: format!("{base}/course_details/"),
            insert_course: format!("{base}/insert_course"),
            insert_link: format!("{base}/insert_course_link"),
        }
    }

    /// Builds the course-listing URL for one (page, search, faculty) state.
    ///
    /// The search term is percent-encoded. When `faculty` is `None` (the
    /// "all faculties" state) the `faculty` parameter is omitted entirely.
    #[must_use]
    pub fn list_url(&self, page: u64, search: &str, faculty: Option<i64>) -> String {
        let mut url = format!(
            "{}?page={page}&search={}",
            self.courses,
            urlencoding::encode(search)
        );
        if let Some(faculty) = faculty {
            url.push_str(&format!("&faculty={faculty}"));
        }
        url
    }

    /// Builds the course-details URL for one course and resource-type tab.
    #[must_use]
    pub fn details_url(&self, course_id: &str, resource_type: ResourceType) -> String {
        format!(
            "{}{course_id}?resource_type={}",
            self.course_details,
            resource_type.code()
        )
    }

    /// Builds the multipart resource-insert URL for one course.
    #[must_use]
    pub fn insert_resource_url(&self, course_id: &str) -> String {
        format!("{}/{course_id}", self.insert_course)
    }

    /// Builds the JSON link-insert URL for one course.
    #[must_use]
    pub fn insert_link_url(&self, course_id: &str) -> String {
        format!("{}/{course_id}", self.insert_link)
    }
}

/// Total page count for a listing of `total` courses.
#[must_use]
pub fn page_count(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}
