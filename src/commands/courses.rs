//! The course listing screen.

use anyhow::Result;
use tracing::warn;

use coursefiles_core::api::ApiClient;
use coursefiles_core::browser::CourseBrowser;
use coursefiles_core::favorites::FavoritesStore;

use super::course_line;

/// Lists one page of courses, with optional search and faculty filter.
pub async fn run(
    client: &ApiClient,
    store: &dyn FavoritesStore,
    page: u64,
    search: &str,
    faculty: Option<i64>,
) -> Result<()> {
    let mut browser = CourseBrowser::new(client.endpoints().clone());

    // Favorites are read once per mount; an unreadable store degrades to an
    // empty section rather than blocking the listing.
    match store.list().await {
        Ok(favorites) => browser.set_favorites(favorites),
        Err(error) => warn!(%error, "favorites unavailable"),
    }

    // Compose the view state the way the screen would reach it: mount, then
    // filter, then (debounced) search, then pagination. Only the latest
    // generation's request is executed.
    let mut request = browser.mount();
    if faculty.is_some() {
        request = browser.set_faculty(faculty);
    }
    if !search.is_empty() {
        browser.edit_search(search);
        if let Some(committed) = browser.settle_search().await {
            request = committed;
        }
    }
    if page > 1 {
        request = browser.set_page(page);
    }

    match client
        .list_courses(request.page, &request.search, request.faculty)
        .await
    {
        Ok(listing) => {
            browser.apply_success(request.generation, listing);
        }
        Err(error) => {
            browser.apply_error(request.generation, &error);
        }
    }

    if let Some(error) = browser.error() {
        println!("Error: {error}");
        return Ok(());
    }

    if !browser.favorites().is_empty() {
        println!("Favorites");
        for course in browser.favorites() {
            println!("  {}", course_line(course));
        }
        println!();
    }

    if browser.courses().is_empty() {
        println!("No courses found.");
        return Ok(());
    }
    for course in browser.courses() {
        println!("  {}", course_line(course));
    }
    println!();
    println!("page {} of {}", browser.page(), browser.page_count());
    Ok(())
}
