use std::collections::HashMap;

use grocer_pantry::normalize;
use grocer_shared::{MealPlan, Pantry, PlannedRecipe, Recipe, ShoppingListItem};

/// Running totals keyed by a canonical name, remembering first-seen order
/// and the spelling the name was first seen with.
#[derive(Default)]
struct Tally {
    index: HashMap<String, usize>,
    items: Vec<(String, u32)>,
}

impl Tally {
    fn add(&mut self, key: String, spelling: &str) {
        match self.index.get(&key) {
            Some(&position) => self.items[position].1 += 1,
            None => {
                self.index.insert(key, self.items.len());
                self.items.push((spelling.to_owned(), 1));
            }
        }
    }
}

/// Shopping list derivation
///
/// Stateless domain service turning a meal plan into the items still to buy.
/// Two strategies exist because the two recipe shapes carry different
/// information:
/// - planned recipes already say per ingredient whether the pantry has it
/// - fetched recipes only list names, so counts are compared with the pantry
pub struct ShoppingListBuilder;

impl ShoppingListBuilder {
    /// One item per ingredient the planner marked unavailable, `needed`
    /// counting how many recipes miss it. Names are merged by their
    /// normalized form; the first spelling and first-seen order are kept.
    pub fn from_availability(recipes: &[PlannedRecipe]) -> Vec<ShoppingListItem> {
        let mut tally = Tally::default();

        for ingredient in recipes.iter().flat_map(|recipe| recipe.missing()) {
            tally.add(normalize(&ingredient.name), &ingredient.name);
        }

        tally
            .items
            .into_iter()
            .map(|(name, needed)| ShoppingListItem::new(name, needed))
            .collect()
    }

    /// Counts how many recipes use each ingredient and compares that with
    /// the quantity stored under exactly that (lowercased, trimmed) name.
    /// No synonym matching is done here.
    pub fn from_counts(recipes: &[Recipe], pantry: &Pantry) -> Vec<ShoppingListItem> {
        let mut tally = Tally::default();

        for ingredient in recipes.iter().flat_map(|recipe| &recipe.ingredients) {
            let name = ingredient.name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            tally.add(name.clone(), &name);
        }

        tally
            .items
            .into_iter()
            .filter_map(|(name, required)| {
                let on_hand = pantry.get(&name).copied().unwrap_or_default();
                (on_hand < required).then(|| ShoppingListItem::new(name, required - on_hand))
            })
            .collect()
    }

    pub fn for_meal_plan(plan: &MealPlan, pantry: &Pantry) -> Vec<ShoppingListItem> {
        match plan {
            MealPlan::Planned(recipes) => Self::from_availability(recipes),
            MealPlan::Fetched(recipes) => Self::from_counts(recipes, pantry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_shared::{PlannedIngredient, RecipeIngredient};

    fn planned(name: &str, ingredients: &[(&str, bool)]) -> PlannedRecipe {
        PlannedRecipe {
            name: name.to_owned(),
            ingredients: ingredients
                .iter()
                .map(|(n, has)| PlannedIngredient::new(*n, *has, None))
                .collect(),
            instructions: String::new(),
            cooking_time: String::new(),
            tips: None,
        }
    }

    fn fetched(name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: name.to_lowercase(),
            name: name.to_owned(),
            image: String::new(),
            ingredients: ingredients
                .iter()
                .map(|n| RecipeIngredient {
                    name: n.to_string(),
                    measure: "1".to_owned(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_availability_dedups_missing_ingredient() {
        let list = ShoppingListBuilder::from_availability(&[
            planned("Pizza", &[("cheese", false), ("flour", true)]),
            planned("Quesadilla", &[("tortilla", false), ("cheese", false)]),
        ]);

        assert_eq!(
            list,
            vec![
                ShoppingListItem::new("cheese", 2),
                ShoppingListItem::new("tortilla", 1),
            ]
        );
    }

    #[test]
    fn test_availability_merges_variants_keeping_first_spelling() {
        let list = ShoppingListBuilder::from_availability(&[
            planned("Salad", &[("Tomatoes", false)]),
            planned("Sauce", &[("tomato", false), ("garlic", true)]),
        ]);

        assert_eq!(list, vec![ShoppingListItem::new("Tomatoes", 2)]);
    }

    #[test]
    fn test_availability_nothing_missing() {
        let list = ShoppingListBuilder::from_availability(&[planned("Toast", &[("bread", true)])]);
        assert!(list.is_empty());
    }

    #[test]
    fn test_counts_against_raw_pantry() {
        let pantry = Pantry::from([("garlic".to_string(), 1), ("onion".to_string(), 5)]);
        let list = ShoppingListBuilder::from_counts(
            &[
                fetched("Arrabiata", &["Penne", "Garlic", "Tomatoes"]),
                fetched("Soup", &["garlic", "onion", "tomatoes "]),
            ],
            &pantry,
        );

        assert_eq!(
            list,
            vec![
                ShoppingListItem::new("penne", 1),
                ShoppingListItem::new("garlic", 1),
                ShoppingListItem::new("tomatoes", 2),
            ]
        );
    }

    #[test]
    fn test_counts_does_not_use_synonyms() {
        let pantry = Pantry::from([("tomato".to_string(), 3)]);
        let list = ShoppingListBuilder::from_counts(&[fetched("Salad", &["tomatoes"])], &pantry);

        assert_eq!(list, vec![ShoppingListItem::new("tomatoes", 1)]);
    }

    #[test]
    fn test_for_meal_plan_dispatches_on_variant() {
        let pantry = Pantry::new();

        let planned_list = ShoppingListBuilder::for_meal_plan(
            &MealPlan::Planned(vec![planned("Rice", &[("rice", false)])]),
            &pantry,
        );
        assert_eq!(planned_list, vec![ShoppingListItem::new("rice", 1)]);

        let fetched_list = ShoppingListBuilder::for_meal_plan(
            &MealPlan::Fetched(vec![fetched("Rice", &["Rice"])]),
            &pantry,
        );
        assert_eq!(fetched_list, vec![ShoppingListItem::new("rice", 1)]);
    }
}
