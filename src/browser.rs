//! Course list view state: pagination, debounced search, faculty filter.
//!
//! `CourseBrowser` never performs network I/O itself. State changes produce a
//! [`CourseListRequest`]; the caller executes it against the API client and
//! feeds the outcome back through `apply_success` / `apply_error`. Every
//! request carries a generation token, and responses from superseded
//! generations are discarded — a slow old response can never overwrite the
//! state of a newer one.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::api::{ApiError, Endpoints, page_count};
use crate::model::{Course, CourseListResponse};

/// Quiet window a search edit must survive before a request is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(230);

/// Delays search commits until edits pause for a fixed quiet interval.
///
/// Each edit re-arms the deadline; the pending text is committed only when
/// `poll` (or `settle`) observes that the window elapsed with no newer edit.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Records an edit and (re)arms the quiet-window deadline.
    pub fn edit(&mut self, text: impl Into<String>) {
        let deadline = Instant::now() + self.quiet;
        self.pending = Some((text.into(), deadline));
    }

    /// Commits the pending text if its quiet window has elapsed.
    pub fn poll(&mut self) -> Option<String> {
        let (_, deadline) = self.pending.as_ref()?;
        if Instant::now() < *deadline {
            return None;
        }
        self.pending.take().map(|(text, _)| text)
    }

    /// Waits out the quiet window and commits the pending text, if any.
    ///
    /// Edits made while waiting are honored: the sleep re-checks the deadline
    /// until an uninterrupted window has passed.
    pub async fn settle(&mut self) -> Option<String> {
        loop {
            let (_, deadline) = self.pending.as_ref()?;
            let deadline = *deadline;
            if Instant::now() >= deadline {
                return self.pending.take().map(|(text, _)| text);
            }
            tokio::time::sleep_until(deadline).await;
        }
    }

    /// Drops any pending edit without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether an edit is waiting for its quiet window.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// One listing request the caller should execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseListRequest {
    /// Token identifying this request; pass it back with the outcome.
    pub generation: u64,
    /// Fully constructed listing URL.
    pub url: String,
    pub page: u64,
    pub search: String,
    pub faculty: Option<i64>,
}

/// State machine behind the course listing screen.
#[derive(Debug)]
pub struct CourseBrowser {
    endpoints: Endpoints,
    page: u64,
    search: String,
    faculty: Option<i64>,
    debouncer: Debouncer,
    generation: u64,
    in_flight: bool,
    listing: Option<CourseListResponse>,
    favorites: Vec<Course>,
    error: Option<String>,
}

impl CourseBrowser {
    #[must_use]
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            page: 1,
            search: String::new(),
            faculty: None,
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            generation: 0,
            in_flight: false,
            listing: None,
            favorites: Vec::new(),
            error: None,
        }
    }

    /// Issues the initial request for the mount state (page 1, no filters).
    pub fn mount(&mut self) -> CourseListRequest {
        self.issue()
    }

    /// Seeds the favorites section, read once per mount from the injected
    /// store. The browser itself never touches persistence.
    pub fn set_favorites(&mut self, favorites: Vec<Course>) {
        self.favorites = favorites;
    }

    /// Jumps to a page and issues a request immediately.
    pub fn set_page(&mut self, page: u64) -> CourseListRequest {
        self.page = page.max(1);
        self.issue()
    }

    /// Records a search edit. No request is issued until the 230 ms quiet
    /// window elapses; see [`poll_search`](Self::poll_search).
    pub fn edit_search(&mut self, text: impl Into<String>) {
        self.debouncer.edit(text);
    }

    /// Commits a debounced search once its quiet window has elapsed,
    /// resetting the page to 1.
    pub fn poll_search(&mut self) -> Option<CourseListRequest> {
        let committed = self.debouncer.poll()?;
        Some(self.commit_search(committed))
    }

    /// Waits out the debounce window and commits the pending search, if any.
    pub async fn settle_search(&mut self) -> Option<CourseListRequest> {
        let committed = self.debouncer.settle().await?;
        Some(self.commit_search(committed))
    }

    /// Applies a faculty filter change immediately (not debounced),
    /// resetting the page to 1.
    pub fn set_faculty(&mut self, faculty: Option<i64>) -> CourseListRequest {
        self.faculty = faculty;
        self.page = 1;
        self.issue()
    }

    fn commit_search(&mut self, search: String) -> CourseListRequest {
        debug!(search = %search, "search committed after quiet window");
        self.search = search;
        self.page = 1;
        self.issue()
    }

    fn issue(&mut self) -> CourseListRequest {
        self.generation += 1;
        self.in_flight = true;
        self.error = None;
        let url = self
            .endpoints
            .list_url(self.page, &self.search, self.faculty);
        trace!(generation = self.generation, url = %url, "listing request issued");
        CourseListRequest {
            generation: self.generation,
            url,
            page: self.page,
            search: self.search.clone(),
            faculty: self.faculty,
        }
    }

    /// Applies a successful response. Returns false (state untouched) when
    /// the response belongs to a superseded request.
    pub fn apply_success(&mut self, generation: u64, listing: CourseListResponse) -> bool {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "stale listing response discarded");
            return false;
        }
        self.listing = Some(listing);
        self.in_flight = false;
        self.error = None;
        true
    }

    /// Applies a failed response. The error text shown to the user includes
    /// the failed URL. Stale failures are discarded like stale successes.
    pub fn apply_error(&mut self, generation: u64, error: &ApiError) -> bool {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "stale listing error discarded");
            return false;
        }
        self.error = Some(error.to_string());
        self.in_flight = false;
        true
    }

    /// The last successfully fetched page of cards. Retained (callers render
    /// it dimmed) while a newer request is in flight, so the grid never
    /// flashes empty.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        self.listing.as_ref().map_or(&[], |l| &l.courses)
    }

    /// The favorites section shown above the grid.
    #[must_use]
    pub fn favorites(&self) -> &[Course] {
        &self.favorites
    }

    /// Whether a request is in flight (render retained cards dimmed).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Current user-visible error, if the latest request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn faculty(&self) -> Option<i64> {
        self.faculty
    }

    /// Total page count for the current listing; 0 before the first response
    /// or when the listing is empty.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.listing
            .as_ref()
            .map_or(0, |l| page_count(l.total_courses))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn browser() -> CourseBrowser {
        CourseBrowser::new(Endpoints::from_base("https://api.example"))
    }

    fn listing(total: u64, ids: &[&str]) -> CourseListResponse {
        CourseListResponse {
            courses: ids
                .iter()
                .map(|id| Course {
                    course_id: (*id).to_string(),
                    course_name: format!("Course {id}"),
                    course_faculty: 0,
                })
                .collect(),
            total_courses: total,
        }
    }

    #[test]
    fn test_mount_issues_page_one_without_filters() {
        let mut b = browser();
        let req = b.mount();
        assert_eq!(req.page, 1);
        assert_eq!(req.search, "");
        assert_eq!(req.faculty, None);
        assert_eq!(req.url, "https://api.example/courses?page=1&search=");
        assert!(b.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_does_not_fire_inside_quiet_window() {
        let mut b = browser();
        b.edit_search("alg");
        tokio::time::advance(Duration::from_millis(150)).await;
        assert!(b.poll_search().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_edit_cancels_pending_commit() {
        let mut b = browser();
        b.edit_search("alg");
        tokio::time::advance(Duration::from_millis(150)).await;
        // Re-edit before the window elapses: the old commit never fires.
        b.edit_search("algo");
        tokio::time::advance(Duration::from_millis(150)).await;
        assert!(b.poll_search().is_none(), "re-armed window must not fire early");

        tokio::time::advance(Duration::from_millis(90)).await;
        let req = b.poll_search().unwrap();
        assert_eq!(req.search, "algo");
        assert_eq!(req.page, 1, "search commit resets to page 1");
        // Only one commit per quiet window.
        assert!(b.poll_search().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_search_waits_out_the_window() {
        let mut b = browser();
        b.edit_search("networks");
        let req = b.settle_search().await.unwrap();
        assert_eq!(req.search, "networks");
        assert!(req.url.contains("search=networks"));
    }

    #[test]
    fn test_faculty_change_is_immediate_and_resets_page() {
        let mut b = browser();
        let _ = b.mount();
        let _ = b.set_page(3);
        let req = b.set_faculty(Some(3));
        assert_eq!(req.page, 1);
        assert!(req.url.ends_with("&faculty=3"));
        let req = b.set_faculty(None);
        assert!(!req.url.contains("faculty"));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut b = browser();
        let first = b.mount();
        let second = b.set_page(2);

        // The slow first response arrives after the second was issued.
        assert!(!b.apply_success(first.generation, listing(24, &["OLD"])));
        assert!(b.courses().is_empty(), "stale data must not land");
        assert!(b.is_loading(), "newest request is still in flight");

        assert!(b.apply_success(second.generation, listing(24, &["NEW"])));
        assert_eq!(b.courses()[0].course_id, "NEW");
        assert!(!b.is_loading());
    }

    #[test]
    fn test_stale_error_does_not_clobber_fresh_state() {
        let mut b = browser();
        let first = b.mount();
        let second = b.set_page(2);
        assert!(b.apply_success(second.generation, listing(1, &["CS116"])));

        let err = ApiError::Timeout {
            url: first.url.clone(),
        };
        assert!(!b.apply_error(first.generation, &err));
        assert!(b.error().is_none());
        assert_eq!(b.courses().len(), 1);
    }

    #[test]
    fn test_error_text_contains_failed_url() {
        let mut b = browser();
        let req = b.mount();
        let err = ApiError::Timeout {
            url: req.url.clone(),
        };
        assert!(b.apply_error(req.generation, &err));
        let text = b.error().unwrap();
        assert!(text.contains(&req.url), "error must name the failed URL: {text}");
        assert!(!b.is_loading(), "loading always clears on failure");
    }

    #[test]
    fn test_cards_retained_while_next_page_loads() {
        let mut b = browser();
        let req = b.mount();
        assert!(b.apply_success(req.generation, listing(24, &["CS116", "MATH101"])));

        let _ = b.set_page(2);
        assert_eq!(b.courses().len(), 2, "previous cards stay visible");
        assert!(b.is_loading(), "rendered dimmed while the new page loads");
    }

    #[test]
    fn test_page_count_follows_total() {
        let mut b = browser();
        assert_eq!(b.page_count(), 0);
        let req = b.mount();
        assert!(b.apply_success(req.generation, listing(37, &[])));
        assert_eq!(b.page_count(), 4);

        let req = b.set_page(2);
        assert!(b.apply_success(req.generation, listing(0, &[])));
        assert_eq!(b.page_count(), 0);
    }

    #[test]
    fn test_favorites_are_injected_not_fetched() {
        let mut b = browser();
        assert!(b.favorites().is_empty());
        b.set_favorites(vec![Course {
            course_id: "CS116".to_string(),
            course_name: "Computing".to_string(),
            course_faculty: 6,
        }]);
        assert_eq!(b.favorites().len(), 1);
    }
}
