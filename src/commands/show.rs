//! One course's detail screen: resources and links for a tab.

use anyhow::Result;

use coursefiles_core::api::ApiClient;
use coursefiles_core::detail::{DetailRequest, DetailView, Tab};
use coursefiles_core::model::{CourseDetails, faculty_short_name};

/// Shows a course's resources for the requested tab.
pub async fn run(client: &ApiClient, course_id: &str, tab: Tab) -> Result<()> {
    let mut view = DetailView::new(client.endpoints().clone(), course_id);

    let request = view.mount();
    execute(client, &mut view, request).await;

    if tab == Tab::Exams && view.error().is_none() {
        if let Some(request) = view.select_tab(Tab::Exams) {
            execute(client, &mut view, request).await;
        }
    }

    if let Some(error) = view.error() {
        println!("Error: {error}");
        return Ok(());
    }
    let Some(details) = view.displayed_details() else {
        println!("No details available.");
        return Ok(());
    };
    render(details, view.displayed());
    Ok(())
}

async fn execute(client: &ApiClient, view: &mut DetailView, request: DetailRequest) {
    let course_id = view.course_id().to_string();
    match client
        .course_details(&course_id, request.tab.resource_type())
        .await
    {
        Ok(details) => {
            view.apply_success(request.generation, request.tab, details);
        }
        Err(error) => {
            view.apply_error(request.generation, &error);
        }
    }
}

fn render(details: &CourseDetails, tab: Tab) {
    let meta = &details.metadata;
    println!("{}", meta.course_name);
    let chip = faculty_short_name(meta.course_faculty)
        .map_or_else(|| meta.course_faculty.to_string(), str::to_string);
    println!("[{}] [{chip}]", meta.course_id);
    println!();

    println!("{} ({})", tab.label(), details.resources.len());
    if details.resources.is_empty() {
        println!("  nothing here yet");
    }
    for entry in &details.resources {
        let info = &entry.resource_info;
        let solved = if info.issolved { "  [solved]" } else { "" };
        println!(
            "  {} — {} {}{solved}",
            info.title, info.semester, info.academic_year
        );
        if let Some(subtitle) = &info.subtitle {
            println!("    {subtitle}");
        }
        for file in &entry.files {
            println!("    {} ({})", file.file_name, file.file_url);
        }
    }

    if !details.links.is_empty() {
        println!();
        println!("Links ({})", details.links.len());
        for link in &details.links {
            println!("  {} — {}", link.title, link.url);
        }
    }
}
