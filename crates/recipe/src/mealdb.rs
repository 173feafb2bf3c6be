use std::time::Duration;

use async_trait::async_trait;
use grocer_shared::{Recipe, RecipeIngredient};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{RecipeSource, RecipeSourceError};

/// TheMealDB exposes ingredients as numbered `strIngredientN` fields
const MAX_INGREDIENTS: usize = 20;

#[derive(Deserialize)]
struct MealsResponse {
    meals: Option<Vec<Map<String, Value>>>,
}

/// TheMealDB client.
///
/// Without a cuisine the general search is used; with one, the area filter.
/// Filter results only carry id, name and thumbnail, so each one is
/// completed with a lookup by id.
#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RecipeSourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    async fn get_meals(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<Recipe>, RecipeSourceError> {
        let response = self
            .client
            .get(format!("{}/{endpoint}", self.base_url))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecipeSourceError::Status(status.as_u16()));
        }

        let body: MealsResponse = response.json().await?;

        Ok(body
            .meals
            .unwrap_or_default()
            .iter()
            .filter_map(recipe_from_meal)
            .collect())
    }

    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, RecipeSourceError> {
        let meals = self.get_meals("lookup.php", &[("i", id)]).await?;
        Ok(meals.into_iter().next())
    }

    async fn try_fetch(
        &self,
        cuisine: Option<&str>,
        count: usize,
    ) -> Result<Vec<Recipe>, RecipeSourceError> {
        let mut recipes = match cuisine {
            Some(area) => self.get_meals("filter.php", &[("a", area)]).await?,
            None => self.get_meals("search.php", &[("s", "")]).await?,
        };
        recipes.truncate(count);

        for recipe in recipes.iter_mut().filter(|r| r.ingredients.is_empty()) {
            match self.lookup(&recipe.id).await {
                Ok(Some(full)) => *recipe = full,
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(recipe = %recipe.id, err = %err, "recipe lookup failed")
                }
            }
        }

        Ok(recipes)
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    #[tracing::instrument(skip(self))]
    async fn fetch_recipes(&self, cuisine: Option<&str>, count: usize) -> Vec<Recipe> {
        match self.try_fetch(cuisine, count).await {
            Ok(recipes) => recipes,
            Err(err) => {
                tracing::error!(err = %err, "failed to fetch recipes");
                Vec::new()
            }
        }
    }
}

fn field<'a>(meal: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    meal.get(key).and_then(Value::as_str)
}

/// Maps one TheMealDB meal object. Meals without an id or a name are skipped.
fn recipe_from_meal(meal: &Map<String, Value>) -> Option<Recipe> {
    let id = field(meal, "idMeal")?.to_owned();
    let name = field(meal, "strMeal")?.to_owned();
    let image = field(meal, "strMealThumb").unwrap_or_default().to_owned();

    let ingredients = (1..=MAX_INGREDIENTS)
        .filter_map(|n| {
            let name = field(meal, &format!("strIngredient{n}"))?.trim();
            if name.is_empty() {
                return None;
            }

            let measure = field(meal, &format!("strMeasure{n}"))
                .unwrap_or_default()
                .trim();

            Some(RecipeIngredient {
                name: name.to_owned(),
                measure: measure.to_owned(),
            })
        })
        .collect();

    Some(Recipe {
        id,
        name,
        image,
        ingredients,
    })
}
