use serde::{Deserialize, Serialize};

use crate::{Intent, MealPlan, Pantry, ShoppingListItem};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// Everything remembered about one conversation between turns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub pantry: Pantry,
    pub current_meal_plan: Option<MealPlan>,
    pub current_shopping_list: Vec<ShoppingListItem>,
    pub user_preferences: UserPreferences,
    pub pending_intent: Option<Intent>,
}
