use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub measure: String,
}

/// Recipe as returned by the recipe catalogue: a plain ingredient list with
/// no knowledge of the user's pantry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedIngredient {
    pub name: String,
    #[serde(default)]
    pub has: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitution: Option<String>,
}

impl PlannedIngredient {
    pub fn new(name: impl Into<String>, has: bool, substitution: Option<String>) -> Self {
        Self {
            name: name.into(),
            has,
            substitution,
        }
    }
}

/// Recipe produced by the pantry-aware planner, each ingredient annotated
/// with whether the pantry already covers it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedRecipe {
    pub name: String,
    pub ingredients: Vec<PlannedIngredient>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub cooking_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

impl PlannedRecipe {
    pub fn missing(&self) -> impl Iterator<Item = &PlannedIngredient> {
        self.ingredients.iter().filter(|i| !i.has)
    }
}

/// The meal plan held in a session. The two variants come from the two ways
/// of acquiring recipes and carry different ingredient shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "recipes", rename_all = "snake_case")]
pub enum MealPlan {
    Fetched(Vec<Recipe>),
    Planned(Vec<PlannedRecipe>),
}

impl MealPlan {
    pub fn len(&self) -> usize {
        match self {
            MealPlan::Fetched(recipes) => recipes.len(),
            MealPlan::Planned(recipes) => recipes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
