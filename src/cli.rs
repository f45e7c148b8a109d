//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use coursefiles_core::detail::Tab;
use coursefiles_core::model::{ResourceType, Semester};

/// Browse and share student course resources from the terminal.
///
/// Coursefiles is a client for a course-resource API: list and search
/// courses, browse a course's notes and past exams, upload resources, and
/// bundle a resource's files into a single archive.
#[derive(Parser, Debug)]
#[command(name = "coursefiles")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// API base URL (falls back to COURSEFILES_API_BASE, then localhost)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List courses with search and faculty filtering
    Courses {
        /// Page to show (12 courses per page)
        #[arg(short, long, default_value_t = 1)]
        page: u64,

        /// Search term (committed after the debounce quiet window)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Faculty id filter; omit for all faculties
        #[arg(short, long)]
        faculty: Option<i64>,
    },

    /// Show one course's resources for a tab
    Show {
        /// Course id (e.g. CS116)
        course_id: String,

        /// Which resource tab to show
        #[arg(long, value_enum, default_value_t = TabArg::Notes)]
        tab: TabArg,
    },

    /// Upload a resource or link to a course
    Upload {
        /// Course id the upload belongs to
        course_id: String,

        /// Kind of resource to upload
        #[arg(long, value_enum)]
        kind: KindArg,

        /// Resource title
        #[arg(long, default_value = "")]
        title: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Academic term
        #[arg(long, value_enum)]
        semester: Option<SemesterArg>,

        /// Academic year (defaults to the current year)
        #[arg(long)]
        year: Option<String>,

        /// File to attach; repeat for multiple files
        #[arg(long = "file")]
        files: Vec<PathBuf>,

        /// Link URL (link uploads only)
        #[arg(long)]
        url: Option<String>,
    },

    /// Download all of a resource's files into one ZIP archive
    Bundle {
        /// Course id the resource belongs to
        course_id: String,

        /// Resource id or exact title
        resource: String,

        /// Directory to save the archive into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Manage favorite courses
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// About this tool
    About,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// Add a course to favorites
    Add { course_id: String },
    /// Remove a course from favorites
    Remove { course_id: String },
    /// List favorite courses
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabArg {
    Notes,
    Exams,
}

impl From<TabArg> for Tab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Notes => Tab::Notes,
            TabArg::Exams => Tab::Exams,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Notes,
    Exam,
    Link,
}

impl From<KindArg> for ResourceType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Notes => ResourceType::Notes,
            KindArg::Exam => ResourceType::PastExam,
            KindArg::Link => ResourceType::Link,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SemesterArg {
    Fall,
    Spring,
    Summer,
}

impl From<SemesterArg> for Semester {
    fn from(semester: SemesterArg) -> Self {
        match semester {
            SemesterArg::Fall => Semester::Fall,
            SemesterArg::Spring => Semester::Spring,
            SemesterArg::Summer => Semester::Summer,
        }
    }
}
