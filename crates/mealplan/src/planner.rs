use std::sync::Arc;

use grocer_llm::{LanguageModel, strip_code_fence};
use grocer_shared::{Pantry, PlannedRecipe};
use serde_json::Value;

use crate::templates::{fallback_plan, staples_recipe};
use crate::{Cuisine, MAX_RECIPES};

const PLANNER_TEMPERATURE: f32 = 0.7;
const PLANNER_MAX_TOKENS: u32 = 1500;

pub fn meal_plan_prompt(pantry: &Pantry, cuisine: Option<Cuisine>) -> String {
    let pantry_lines = pantry
        .iter()
        .map(|(item, quantity)| format!("- {item}: {quantity}"))
        .collect::<Vec<_>>()
        .join("\n");

    let cuisine_line = match cuisine {
        Some(cuisine) => format!("The user would like {cuisine} food.\n"),
        None => String::new(),
    };

    format!(
        r#"You are a thrifty home cook planning meals from what is already in the pantry.

Pantry contents:
{pantry_lines}
{cuisine_line}
Suggest up to {MAX_RECIPES} recipes. For each recipe:
- Prefer recipes where at least 60% of the ingredients are already in the pantry.
- Mark every ingredient with "has": true when the pantry covers it (treat plurals and common variants such as "tomatoes"/"tomato" as the same item), otherwise false.
- For each missing ingredient, suggest a cheap or common substitution when one exists.

Respond with ONLY a JSON object of this shape, no other text:
{{"recipes": [{{"name": "...", "ingredients": [{{"name": "...", "has": true, "substitution": null}}], "instructions": "...", "cooking_time": "...", "tips": "..."}}]}}"#
    )
}

/// Pantry-aware recipe recommendation.
///
/// An empty pantry always gets the staples recipe. Otherwise the model is
/// asked first and the template generator covers any failure.
#[derive(Clone)]
pub struct MealPlanner {
    model: Arc<dyn LanguageModel>,
}

impl MealPlanner {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    #[tracing::instrument(skip_all, fields(items = pantry.len(), cuisine = ?cuisine))]
    pub async fn plan(&self, pantry: &Pantry, cuisine: Option<Cuisine>) -> Vec<PlannedRecipe> {
        if pantry.is_empty() {
            return vec![staples_recipe()];
        }

        let prompt = meal_plan_prompt(pantry, cuisine);

        match self
            .model
            .complete(&prompt, PLANNER_TEMPERATURE, PLANNER_MAX_TOKENS)
            .await
        {
            Ok(text) => match parse_model_recipes(&text) {
                Some(recipes) => return recipes,
                None => tracing::warn!(response = %text, "model meal plan unusable, using templates"),
            },
            Err(err) => tracing::warn!(err = %err, "model meal plan failed, using templates"),
        }

        fallback_plan(pantry)
    }
}

/// Recipes from a `{"recipes": [...]}` answer. Elements that do not fit the
/// recipe shape are dropped; `None` when nothing usable remains.
fn parse_model_recipes(text: &str) -> Option<Vec<PlannedRecipe>> {
    let value: Value = serde_json::from_str(strip_code_fence(text)).ok()?;
    let elements = value.as_object()?.get("recipes")?.as_array()?;

    let recipes: Vec<PlannedRecipe> = elements
        .iter()
        .filter_map(|element| serde_json::from_value::<PlannedRecipe>(element.clone()).ok())
        .filter(|recipe| !recipe.name.trim().is_empty() && !recipe.ingredients.is_empty())
        .take(MAX_RECIPES)
        .collect();

    if recipes.is_empty() {
        None
    } else {
        Some(recipes)
    }
}
