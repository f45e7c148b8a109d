//! Command implementations behind each CLI subcommand.
//!
//! Each submodule renders one screen of the product: the listing, a course's
//! detail tabs, the upload flow, the bundle download, and favorites
//! management. All user-facing text goes to stdout; diagnostics go through
//! tracing.

pub mod bundle;
pub mod courses;
pub mod favorites;
pub mod show;
pub mod upload;

use coursefiles_core::model::{Course, faculty_short_name};

/// One-line rendering of a course: id, name, faculty chip.
pub(crate) fn course_line(course: &Course) -> String {
    let chip = faculty_short_name(course.course_faculty)
        .map_or_else(|| course.course_faculty.to_string(), str::to_string);
    format!("{:<10} {}  [{chip}]", course.course_id, course.course_name)
}

/// Static info screen.
pub fn about() {
    println!("coursefiles {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("A shared library of course notes, past exams, and links,");
    println!("built by students for students. Courses and resources live");
    println!("on the shared server; favorites are stored locally.");
}
