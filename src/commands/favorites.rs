//! Favorites management: the write path plus a plain listing.

use anyhow::Result;

use coursefiles_core::api::ApiClient;
use coursefiles_core::favorites::FavoritesStore;
use coursefiles_core::model::ResourceType;

use crate::cli::FavoritesAction;

use super::course_line;

/// Runs one favorites action against the injected store.
pub async fn run(
    client: &ApiClient,
    store: &dyn FavoritesStore,
    action: FavoritesAction,
) -> Result<()> {
    match action {
        FavoritesAction::Add { course_id } => {
            // The store keeps full course records; fetch the metadata once.
            let details = client
                .course_details(&course_id, ResourceType::Notes)
                .await?;
            let course = details.metadata;
            let name = course.course_name.clone();
            store.add(course).await?;
            println!("Added {name} ({course_id}) to favorites.");
        }
        FavoritesAction::Remove { course_id } => {
            store.remove(&course_id).await?;
            println!("Removed {course_id} from favorites.");
        }
        FavoritesAction::List => {
            let favorites = store.list().await?;
            if favorites.is_empty() {
                println!("No favorites yet.");
            }
            for course in favorites {
                println!("  {}", course_line(&course));
            }
        }
    }
    Ok(())
}
