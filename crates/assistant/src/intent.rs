use std::sync::{Arc, LazyLock};

use grocer_llm::LanguageModel;
use grocer_shared::Intent;
use regex::Regex;

const CLASSIFIER_TEMPERATURE: f32 = 0.1;
const CLASSIFIER_MAX_TOKENS: u32 = 20;

static ZIP_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{5}\b").expect("zip code pattern is valid"));

const PANTRY_WORDS: &[&str] = &[
    "pantry",
    "have",
    "inventory",
    "bought",
    "finished",
    "added",
    "removed",
];
const QUERY_WORDS: &[&str] = &["what", "show", "check", "list"];
const MEAL_WORDS: &[&str] = &[
    "recipe",
    "meal",
    "cook",
    "dinner",
    "lunch",
    "breakfast",
    "plan",
];
const CART_WORDS: &[&str] = &["cart", "buy", "purchase", "kroger"];

/// First standalone five-digit number in the message
pub fn find_zip_code(message: &str) -> Option<&str> {
    ZIP_CODE.find(message).map(|m| m.as_str())
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

struct KeywordRule {
    intent: Intent,
    matches: fn(&str) -> bool,
}

/// Evaluated top to bottom against the lowercased message; first hit wins
const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        intent: Intent::CheckPantry,
        matches: |text| contains_any(text, PANTRY_WORDS) && contains_any(text, QUERY_WORDS),
    },
    KeywordRule {
        intent: Intent::UpdatePantry,
        matches: |text| contains_any(text, PANTRY_WORDS),
    },
    KeywordRule {
        intent: Intent::RequestMealPlan,
        matches: |text| contains_any(text, MEAL_WORDS),
    },
    KeywordRule {
        intent: Intent::AddToCart,
        matches: |text| contains_any(text, CART_WORDS),
    },
];

/// Substring keyword matching, used whenever the model gives no usable label
pub fn classify_by_keywords(message: &str) -> Intent {
    let lowered = message.to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|rule| (rule.matches)(&lowered))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Clarification)
}

fn intent_prompt(message: &str) -> String {
    format!(
        r#"Classify the user's message for a grocery assistant into exactly one intent.

Intents:
- check_pantry: asking what is in the pantry. Example: "What do I have in my pantry?"
- update_pantry: reporting items bought, used up or thrown away. Example: "I bought 2 onions and finished the milk"
- request_meal_plan: asking for recipes or a meal plan. Example: "Can you plan dinners for this week?"
- add_to_cart: asking to buy the shopping list or add it to a Kroger cart. Example: "Add my shopping list to my cart"
- clarification: anything else. Example: "Hello there!"

Respond with only the intent name.

Message: "{message}"
Intent:"#
    )
}

/// Maps a message to an [`Intent`].
///
/// The model's answer is used when it is exactly one of the intent labels.
/// Otherwise the keyword rules decide. A pending cart request turns a bare
/// zip code reply into [`Intent::AddToCart`] instead of small talk.
#[derive(Clone)]
pub struct IntentClassifier {
    model: Arc<dyn LanguageModel>,
}

impl IntentClassifier {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn classify(&self, message: &str, pending_intent: Option<Intent>) -> Intent {
        let intent = match self
            .model
            .complete(
                &intent_prompt(message),
                CLASSIFIER_TEMPERATURE,
                CLASSIFIER_MAX_TOKENS,
            )
            .await
        {
            Ok(label) => Intent::from_label(&label).unwrap_or_else(|| {
                tracing::debug!(label = %label, "unrecognised intent label, using keywords");
                classify_by_keywords(message)
            }),
            Err(err) => {
                tracing::debug!(err = %err, "model intent classification failed, using keywords");
                classify_by_keywords(message)
            }
        };

        if intent == Intent::Clarification
            && pending_intent == Some(Intent::AddToCart)
            && find_zip_code(message).is_some()
        {
            return Intent::AddToCart;
        }

        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_llm::{DisabledModel, ModelError};

    struct LabelModel(&'static str);

    #[async_trait::async_trait]
    impl LanguageModel for LabelModel {
        async fn complete(&self, _: &str, _: f32, _: u32) -> Result<String, ModelError> {
            Ok(self.0.to_owned())
        }
    }

    fn keywords_only() -> IntentClassifier {
        IntentClassifier::new(Arc::new(DisabledModel))
    }

    #[test]
    fn test_keyword_rules() {
        assert_eq!(classify_by_keywords("What's in my pantry?"), Intent::CheckPantry);
        assert_eq!(classify_by_keywords("I bought 3 apples"), Intent::UpdatePantry);
        assert_eq!(classify_by_keywords("I want a meal plan"), Intent::RequestMealPlan);
        assert_eq!(classify_by_keywords("Add items to my cart"), Intent::AddToCart);
        assert_eq!(classify_by_keywords("Hello there!"), Intent::Clarification);
    }

    #[test]
    fn test_keyword_rules_order() {
        // pantry vocabulary wins over meal vocabulary
        assert_eq!(
            classify_by_keywords("I have chicken, what can I cook?"),
            Intent::CheckPantry
        );
        assert_eq!(
            classify_by_keywords("I finished the rice for dinner"),
            Intent::UpdatePantry
        );
        assert_eq!(classify_by_keywords("Plan meals, then buy them"), Intent::RequestMealPlan);
    }

    #[test]
    fn test_find_zip_code() {
        assert_eq!(find_zip_code("my zip is 90210."), Some("90210"));
        assert_eq!(find_zip_code("90210"), Some("90210"));
        assert_eq!(find_zip_code("call 5551234567"), None);
        assert_eq!(find_zip_code("1234"), None);
    }

    #[test]
    fn test_prompt_names_every_intent() {
        let prompt = intent_prompt("hi");
        for intent in <Intent as strum::VariantArray>::VARIANTS {
            let label: &str = intent.as_ref();
            assert!(prompt.contains(label));
        }
    }

    #[tokio::test]
    async fn test_fallback_with_failing_model() {
        let classifier = keywords_only();

        assert_eq!(
            classifier.classify("What's in my pantry?", None).await,
            Intent::CheckPantry
        );
        assert_eq!(
            classifier.classify("Hello there!", None).await,
            Intent::Clarification
        );
    }

    #[tokio::test]
    async fn test_model_label_is_trusted() {
        let classifier = IntentClassifier::new(Arc::new(LabelModel(" Request_Meal_Plan\n")));

        assert_eq!(
            classifier.classify("surprise me", None).await,
            Intent::RequestMealPlan
        );
    }

    #[tokio::test]
    async fn test_unknown_label_uses_keywords() {
        let classifier = IntentClassifier::new(Arc::new(LabelModel("The intent is: shopping")));

        assert_eq!(
            classifier.classify("Add items to my cart", None).await,
            Intent::AddToCart
        );
    }

    #[tokio::test]
    async fn test_pending_cart_resumes_on_zip_code() {
        let classifier = keywords_only();

        assert_eq!(
            classifier.classify("90210", Some(Intent::AddToCart)).await,
            Intent::AddToCart
        );
        assert_eq!(classifier.classify("90210", None).await, Intent::Clarification);
        assert_eq!(
            classifier.classify("no idea", Some(Intent::AddToCart)).await,
            Intent::Clarification
        );
    }

    #[tokio::test]
    async fn test_pending_cart_does_not_override_other_intents() {
        let classifier = keywords_only();

        assert_eq!(
            classifier
                .classify("I bought 2 eggs at 90210", Some(Intent::AddToCart))
                .await,
            Intent::UpdatePantry
        );
    }
}
