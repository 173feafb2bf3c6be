use grocer_pantry::available;
use grocer_shared::{Pantry, PlannedIngredient, PlannedRecipe};

use crate::MAX_RECIPES;

/// Ingredient line of a template with the cheaper stand-in offered when the
/// pantry does not have it
struct TemplateIngredient {
    name: &'static str,
    substitution: Option<&'static str>,
}

const fn ingredient(name: &'static str, substitution: Option<&'static str>) -> TemplateIngredient {
    TemplateIngredient { name, substitution }
}

struct Template {
    signature: &'static str,
    name: &'static str,
    ingredients: &'static [TemplateIngredient],
    instructions: &'static str,
    cooking_time: &'static str,
    tips: &'static str,
}

/// One template per signature ingredient, in the order signatures are checked
const SIGNATURE_TEMPLATES: [Template; 3] = [
    Template {
        signature: "egg",
        name: "Vegetable Omelette",
        ingredients: &[
            ingredient("egg", None),
            ingredient("onion", Some("spring onion")),
            ingredient("bell pepper", Some("frozen mixed vegetables")),
            ingredient("cheese", Some("a splash of milk")),
            ingredient("butter", Some("vegetable oil")),
        ],
        instructions: "Whisk the eggs with a pinch of salt. Soften the chopped onion and pepper in butter, pour in the eggs, cook until just set, scatter the cheese over and fold.",
        cooking_time: "15 minutes",
        tips: "Any leftover cooked vegetables work in place of the pepper.",
    },
    Template {
        signature: "pasta",
        name: "Garlic Tomato Pasta",
        ingredients: &[
            ingredient("pasta", None),
            ingredient("garlic", Some("garlic powder")),
            ingredient("tomato", Some("canned tomatoes")),
            ingredient("olive oil", Some("vegetable oil")),
            ingredient("parmesan cheese", Some("any hard cheese")),
        ],
        instructions: "Boil the pasta in salted water. Meanwhile fry sliced garlic in olive oil, add chopped tomatoes and simmer for ten minutes. Toss with the drained pasta and top with cheese.",
        cooking_time: "25 minutes",
        tips: "Keep a cup of the pasta water to loosen the sauce.",
    },
    Template {
        signature: "rice",
        name: "Vegetable Fried Rice",
        ingredients: &[
            ingredient("rice", None),
            ingredient("egg", Some("firm tofu")),
            ingredient("onion", Some("spring onion")),
            ingredient("frozen peas", Some("any frozen vegetables")),
            ingredient("soy sauce", Some("salt and a squeeze of lemon")),
        ],
        instructions: "Cook the rice and let it cool. Stir-fry the onion and peas, push them aside to scramble the egg, then add the rice and soy sauce and fry until hot.",
        cooking_time: "30 minutes",
        tips: "Day-old rice fries best.",
    },
];

/// Recipe offered when the pantry holds nothing at all
pub(crate) fn staples_recipe() -> PlannedRecipe {
    PlannedRecipe {
        name: "Simple Tomato Pasta".to_owned(),
        ingredients: ["pasta", "canned tomatoes", "garlic", "olive oil", "salt"]
            .into_iter()
            .map(|name| PlannedIngredient::new(name, false, None))
            .collect(),
        instructions: "Boil the pasta. Warm garlic in olive oil, add the tomatoes and simmer, season with salt and toss with the pasta.".to_owned(),
        cooking_time: "20 minutes".to_owned(),
        tips: Some("These staples keep for months and cover many quick meals.".to_owned()),
    }
}

fn basics_recipe() -> PlannedRecipe {
    PlannedRecipe {
        name: "Go Shopping for Basics".to_owned(),
        ingredients: SIGNATURE_TEMPLATES
            .iter()
            .map(|template| PlannedIngredient::new(template.signature, false, None))
            .collect(),
        instructions: "Your pantry has none of the usual meal bases. Pick up eggs, pasta or rice and ask again for recipes built around them.".to_owned(),
        cooking_time: "0 minutes".to_owned(),
        tips: None,
    }
}

fn from_template(template: &Template, pantry: &Pantry) -> PlannedRecipe {
    let ingredients = template
        .ingredients
        .iter()
        .map(|line| {
            let (has, _) = available(line.name, pantry);
            let substitution = if has {
                None
            } else {
                line.substitution.map(str::to_owned)
            };

            PlannedIngredient::new(line.name, has, substitution)
        })
        .collect();

    PlannedRecipe {
        name: template.name.to_owned(),
        ingredients,
        instructions: template.instructions.to_owned(),
        cooking_time: template.cooking_time.to_owned(),
        tips: Some(template.tips.to_owned()),
    }
}

/// Deterministic plan used when the model is unavailable or unusable.
///
/// One recipe per signature ingredient (eggs, pasta, rice) found in the
/// pantry, each ingredient marked against the pantry. A pantry without any
/// signature gets a single shopping prompt instead.
pub fn fallback_plan(pantry: &Pantry) -> Vec<PlannedRecipe> {
    let mut recipes: Vec<PlannedRecipe> = SIGNATURE_TEMPLATES
        .iter()
        .filter(|template| available(template.signature, pantry).0)
        .map(|template| from_template(template, pantry))
        .collect();

    if recipes.is_empty() {
        return vec![basics_recipe()];
    }

    recipes.truncate(MAX_RECIPES);
    recipes
}
