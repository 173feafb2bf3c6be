use std::sync::Arc;

use grocer_kroger::Retailer;
use grocer_llm::LanguageModel;
use grocer_mealplan::{Cuisine, MAX_RECIPES, MealPlanner};
use grocer_pantry::{EntityExtractor, PantryStore, apply};
use grocer_recipe::RecipeSource;
use grocer_shared::{Action, Entity, Intent, MealPlan, SessionState, ShoppingListItem};
use grocer_shopping::ShoppingListBuilder;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};

use crate::intent::{IntentClassifier, find_zip_code};
use crate::{AssistantError, Reply, SessionStore};

const EMPTY_PANTRY: &str =
    "Your pantry is empty. You can add items by telling me what you bought or have.";
const UPDATE_NOT_UNDERSTOOD: &str =
    "I couldn't understand what items you want to update. Please try again.";
const NO_RECIPES: &str = "Sorry, I couldn't find any recipes. Please try again.";
const ASK_ZIP_CODE: &str =
    "I need your zip code to find a nearby Kroger store. What is your zip code?";
const EMPTY_SHOPPING_LIST: &str =
    "You don't have any items in your shopping list. Please create a meal plan first.";
const HELP: &str = "I'm not sure what you want to do. You can ask me to check your pantry, update your pantry, create a meal plan, or add items to your Kroger cart.";

/// Where meal plans come from
#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MealPlanSource {
    /// Pantry-aware planner; the shopping list follows its availability flags
    #[default]
    Planner,
    /// Recipe catalogue; the shopping list compares ingredient counts with
    /// the pantry
    RecipeApi,
}

/// The conversation state machine.
///
/// Each message is handled start to finish: load the session and the pantry,
/// classify, run the matching branch, persist the session. Only storage
/// failures escape as errors.
pub struct Assistant {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
    planner: MealPlanner,
    recipes: Arc<dyn RecipeSource>,
    retailer: Arc<dyn Retailer>,
    pantry: Arc<dyn PantryStore>,
    sessions: Arc<dyn SessionStore>,
    meal_plan_source: MealPlanSource,
}

impl Assistant {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        recipes: Arc<dyn RecipeSource>,
        retailer: Arc<dyn Retailer>,
        pantry: Arc<dyn PantryStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(model.clone()),
            extractor: EntityExtractor::new(model.clone()),
            planner: MealPlanner::new(model),
            recipes,
            retailer,
            pantry,
            sessions,
            meal_plan_source: MealPlanSource::default(),
        }
    }

    pub fn with_meal_plan_source(mut self, source: MealPlanSource) -> Self {
        self.meal_plan_source = source;
        self
    }

    #[tracing::instrument(skip(self, message))]
    pub async fn handle_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<Reply, AssistantError> {
        let mut state = self.sessions.load(session_id).await?;
        state.pantry = self.pantry.load().await?;

        let intent = self.classifier.classify(message, state.pending_intent).await;
        tracing::info!(intent = %intent, "message classified");

        let reply = match intent {
            Intent::CheckPantry => check_pantry(&state),
            Intent::UpdatePantry => self.update_pantry(&mut state, message).await?,
            Intent::RequestMealPlan => self.request_meal_plan(&mut state, message).await,
            Intent::AddToCart => self.add_to_cart(&mut state, message).await,
            Intent::Clarification => Reply::text(HELP),
        };

        self.sessions.save(session_id, &state).await?;

        Ok(reply)
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_zip_code(&self, session_id: &str, zip_code: &str) -> Result<(), AssistantError> {
        let mut state = self.sessions.load(session_id).await?;
        state.user_preferences.zip_code = Some(zip_code.to_owned());
        self.sessions.save(session_id, &state).await?;

        Ok(())
    }

    async fn update_pantry(
        &self,
        state: &mut SessionState,
        message: &str,
    ) -> Result<Reply, AssistantError> {
        let entities = self.extractor.extract(message).await;
        if entities.is_empty() {
            return Ok(Reply::text(UPDATE_NOT_UNDERSTOOD));
        }

        state.pantry = apply(std::mem::take(&mut state.pantry), &entities);
        self.pantry.save(&state.pantry).await?;

        tracing::info!(changes = entities.len(), items = state.pantry.len(), "pantry updated");

        Ok(Reply::text(format!(
            "I've updated your pantry! {}.",
            describe_changes(&entities)
        )))
    }

    async fn request_meal_plan(&self, state: &mut SessionState, message: &str) -> Reply {
        let cuisine = Cuisine::detect(message);

        let plan = match self.meal_plan_source {
            MealPlanSource::Planner => {
                MealPlan::Planned(self.planner.plan(&state.pantry, cuisine).await)
            }
            MealPlanSource::RecipeApi => {
                let area = cuisine.map(|c| c.to_string());
                MealPlan::Fetched(
                    self.recipes
                        .fetch_recipes(area.as_deref(), MAX_RECIPES)
                        .await,
                )
            }
        };

        if plan.is_empty() {
            return Reply::text(NO_RECIPES);
        }

        let shopping_list = ShoppingListBuilder::for_meal_plan(&plan, &state.pantry);
        let message = format!("Here's your meal plan with {} recipes!", plan.len());

        state.current_meal_plan = Some(plan.clone());
        state.current_shopping_list = shopping_list.clone();

        Reply::meal_plan(message, plan, shopping_list)
    }

    async fn add_to_cart(&self, state: &mut SessionState, message: &str) -> Reply {
        let mut prefix = String::new();

        let zip_code = match state
            .user_preferences
            .zip_code
            .clone()
            .filter(|zip| !zip.is_empty())
        {
            Some(zip) => zip,
            None => match find_zip_code(message) {
                Some(zip) => {
                    prefix = format!("Got it! I've set your zip code to {zip}. ");
                    state.user_preferences.zip_code = Some(zip.to_owned());
                    zip.to_owned()
                }
                None => {
                    state.pending_intent = Some(Intent::AddToCart);
                    return Reply::text(ASK_ZIP_CODE);
                }
            },
        };

        let outcome = self
            .fill_cart(&state.current_shopping_list, &zip_code)
            .await;
        state.pending_intent = None;

        Reply::text(format!("{prefix}{outcome}"))
    }

    /// Searches every shopping list item and submits the found products in
    /// one cart call. Returns the message to show the user.
    async fn fill_cart(&self, shopping_list: &[ShoppingListItem], zip_code: &str) -> String {
        if shopping_list.is_empty() {
            return EMPTY_SHOPPING_LIST.to_owned();
        }

        let store_id = self.retailer.find_store(zip_code).await;
        if store_id.is_none() {
            tracing::warn!(zip_code, "no store found, searching without a location");
        }

        let mut product_ids = Vec::new();
        let mut not_found = Vec::new();

        for item in shopping_list {
            let product_id = self
                .retailer
                .search_products(&item.name, store_id.as_deref())
                .await
                .into_iter()
                .next()
                .and_then(|product| product.product_id);

            match product_id {
                Some(id) => product_ids.push(id),
                None => not_found.push(item.name.as_str()),
            }
        }

        if product_ids.is_empty() {
            return format!(
                "I couldn't find any of the items in your shopping list at Kroger: {}",
                not_found.join(", ")
            );
        }

        let outcome = self.retailer.add_to_cart(&product_ids).await;
        if !outcome.ok {
            return format!(
                "Sorry, I had trouble adding items to your cart: {}",
                outcome.message
            );
        }

        let mut message = format!("I've added {} items to your Kroger cart!", product_ids.len());
        if !not_found.is_empty() {
            message.push_str(&format!(
                " I couldn't find these items: {}",
                not_found.join(", ")
            ));
        }

        message
    }
}

fn check_pantry(state: &SessionState) -> Reply {
    if state.pantry.is_empty() {
        return Reply::text(EMPTY_PANTRY);
    }

    let items = state
        .pantry
        .iter()
        .map(|(item, quantity)| format!("{item}: {quantity}"))
        .collect::<Vec<_>>()
        .join(", ");

    Reply::text(format!("Your pantry contains: {items}"))
}

/// "Added 2 tomato, removed milk"
fn describe_changes(entities: &[Entity]) -> String {
    let changes = entities
        .iter()
        .map(|entity| match (entity.action, entity.quantity) {
            (Action::Add, quantity) => format!("added {quantity} {}", entity.item),
            (Action::Remove, 0) => format!("removed {}", entity.item),
            (Action::Remove, quantity) => format!("removed {quantity} {}", entity.item),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut chars = changes.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => changes,
    }
}
