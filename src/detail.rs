//! Course detail view state: resource-type tabs and the per-tab cache.
//!
//! The view tracks the *selected* tab and the *displayed* tab separately: the
//! previous tab's content stays on screen until the newly selected tab's data
//! is available, so a cache hit switches instantly with no loading flash and
//! a cache miss never blanks the screen while fetching.
//!
//! Once a tab's details are fetched they are kept for the lifetime of the
//! view and never refetched — the only way to force a refetch is the explicit
//! [`DetailView::invalidate_tab`] path used after a successful upload.

use tracing::{debug, trace};

use crate::api::{ApiError, Endpoints};
use crate::model::{CourseDetails, ResourceType};

/// Resource-type tab within one course's detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Notes,
    Exams,
}

impl Tab {
    /// The resource type this tab is scoped to.
    #[must_use]
    pub fn resource_type(self) -> ResourceType {
        match self {
            Self::Notes => ResourceType::Notes,
            Self::Exams => ResourceType::PastExam,
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Notes => 0,
            Self::Exams => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Notes => "Notes",
            Self::Exams => "Exams",
        }
    }
}

/// One details request the caller should execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    /// Token identifying this request; pass it back with the outcome.
    pub generation: u64,
    /// The tab the fetched details belong to.
    pub tab: Tab,
    /// Fully constructed details URL.
    pub url: String,
}

/// State machine behind one course's detail screen.
#[derive(Debug)]
pub struct DetailView {
    endpoints: Endpoints,
    course_id: String,
    selected: Tab,
    displayed: Tab,
    cache: [Option<CourseDetails>; 2],
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl DetailView {
    #[must_use]
    pub fn new(endpoints: Endpoints, course_id: impl Into<String>) -> Self {
        Self {
            endpoints,
            course_id: course_id.into(),
            selected: Tab::Notes,
            displayed: Tab::Notes,
            cache: [None, None],
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// Issues the initial fetch for the Notes tab.
    pub fn mount(&mut self) -> DetailRequest {
        self.issue(Tab::Notes)
    }

    /// Selects a tab. Returns a request only on a cache miss; a hit flips
    /// the displayed tab immediately with no network call and no loading
    /// indicator.
    pub fn select_tab(&mut self, tab: Tab) -> Option<DetailRequest> {
        self.selected = tab;
        if self.cache[tab.slot()].is_some() {
            trace!(tab = tab.label(), "tab cache hit");
            self.displayed = tab;
            return None;
        }
        Some(self.issue(tab))
    }

    fn issue(&mut self, tab: Tab) -> DetailRequest {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        let url = self
            .endpoints
            .details_url(&self.course_id, tab.resource_type());
        trace!(generation = self.generation, url = %url, "details request issued");
        DetailRequest {
            generation: self.generation,
            tab,
            url,
        }
    }

    /// Applies a successful details response, filling the tab's cache slot
    /// and switching the display to it. Stale generations are discarded.
    pub fn apply_success(&mut self, generation: u64, tab: Tab, details: CourseDetails) -> bool {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "stale details response discarded");
            return false;
        }
        self.cache[tab.slot()] = Some(details);
        self.displayed = tab;
        self.loading = false;
        self.error = None;
        true
    }

    /// Applies a failed details response: records the error, halts the
    /// loading indicator, attempts no retry.
    pub fn apply_error(&mut self, generation: u64, error: &ApiError) -> bool {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "stale details error discarded");
            return false;
        }
        self.error = Some(error.to_string());
        self.loading = false;
        true
    }

    /// Clears one tab's cache slot so the next select refetches it.
    ///
    /// This is the targeted consistency path the upload flow uses after a
    /// successful mutation, instead of reloading every view.
    pub fn invalidate_tab(&mut self, tab: Tab) {
        debug!(tab = tab.label(), "tab cache invalidated");
        self.cache[tab.slot()] = None;
    }

    /// Details for the displayed tab, when available.
    #[must_use]
    pub fn displayed_details(&self) -> Option<&CourseDetails> {
        self.cache[self.displayed.slot()].as_ref()
    }

    /// Whether a tab's details are cached.
    #[must_use]
    pub fn is_cached(&self, tab: Tab) -> bool {
        self.cache[tab.slot()].is_some()
    }

    #[must_use]
    pub fn selected(&self) -> Tab {
        self.selected
    }

    #[must_use]
    pub fn displayed(&self) -> Tab {
        self.displayed
    }

    /// Whether a fetch is in flight (show the spinner only on cache misses).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn course_id(&self) -> &str {
        &self.course_id
    }
}
