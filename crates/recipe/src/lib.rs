mod error;
mod mealdb;

use async_trait::async_trait;
use grocer_shared::Recipe;

pub use error::*;
pub use mealdb::*;

/// Catalogue of ready-made recipes.
///
/// Lookups never fail from the caller's point of view: an unreachable or
/// misbehaving catalogue yields an empty list.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn fetch_recipes(&self, cuisine: Option<&str>, count: usize) -> Vec<Recipe>;
}
