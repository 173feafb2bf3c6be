use std::sync::Arc;

use grocer_llm::{LanguageModel, strip_code_fence};
use grocer_shared::{Action, Entity};
use serde_json::Value;

const EXTRACTION_TEMPERATURE: f32 = 0.1;
const EXTRACTION_MAX_TOKENS: u32 = 500;

const ADD_TRIGGERS: [&str; 2] = ["bought", "added"];
const REMOVE_TRIGGERS: [&str; 2] = ["finished", "removed"];

/// Builds the prompt asking the model for pantry changes as a JSON array
pub fn entity_extraction_prompt(message: &str) -> String {
    format!(
        r#"You track a household pantry. Extract every pantry change from the user's message.

Respond with ONLY a JSON array, no other text. Each element must be an object with:
- "item": the ingredient as a lowercase singular noun (e.g. "egg", "tomato", "ground beef")
- "quantity": a number (whole units)
- "action": "add" or "remove"

Rules:
- Buying, picking up, getting or adding something is "add". Default the quantity to 1 when none is given.
- Eating, using up, finishing, running out of, throwing out or spoilage is "remove".
- For a removal without an explicit count, use quantity 0 (meaning the item is gone).
- Convert words to numbers ("half a dozen" is 6, "a couple" is 2).
- If nothing in the message changes the pantry, respond with [].

Example:
Message: "I bought 2 onions and finished the milk"
Answer: [{{"item": "onion", "quantity": 2, "action": "add"}}, {{"item": "milk", "quantity": 0, "action": "remove"}}]

Message: "{message}"
Answer:"#
    )
}

/// Turns free-text pantry updates into [`Entity`] lists.
///
/// The language model is tried first and its answer is validated element by
/// element. When the call fails or nothing valid comes back, a keyword rule
/// set takes over. Callers only ever see the resulting list.
#[derive(Clone)]
pub struct EntityExtractor {
    model: Arc<dyn LanguageModel>,
}

impl EntityExtractor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn extract(&self, message: &str) -> Vec<Entity> {
        let prompt = entity_extraction_prompt(message);

        match self
            .model
            .complete(&prompt, EXTRACTION_TEMPERATURE, EXTRACTION_MAX_TOKENS)
            .await
        {
            Ok(text) => match parse_model_entities(&text) {
                Some(entities) => return entities,
                None => tracing::warn!(
                    response = %text,
                    "model entity extraction unusable, using keyword rules"
                ),
            },
            Err(err) => tracing::warn!(
                err = %err,
                "model entity extraction failed, using keyword rules"
            ),
        }

        extract_with_rules(message)
    }
}

/// Validated entities from a model answer, or `None` when the answer is not
/// a JSON array or holds no valid element.
fn parse_model_entities(text: &str) -> Option<Vec<Entity>> {
    let value: Value = serde_json::from_str(strip_code_fence(text)).ok()?;
    let elements = value.as_array()?;

    let entities: Vec<Entity> = elements.iter().filter_map(validate_entity).collect();

    if entities.is_empty() {
        None
    } else {
        Some(entities)
    }
}

fn validate_entity(value: &Value) -> Option<Entity> {
    let object = value.as_object()?;

    let item = object.get("item")?.as_str()?.trim().to_lowercase();
    let quantity = object.get("quantity")?.as_f64()?;
    let action: Action = object.get("action")?.as_str()?.parse().ok()?;

    if item.is_empty() || !quantity.is_finite() || quantity < 0.0 {
        return None;
    }

    let quantity = quantity.round().min(u32::MAX as f64) as u32;
    if action == Action::Add && quantity == 0 {
        return None;
    }

    Some(Entity {
        item,
        quantity,
        action,
    })
}

/// Keyword fallback.
///
/// "bought"/"added" followed by a count and an item adds; "finished"/"removed"
/// removes whatever single token comes next. Multi-word items and filler words
/// are not understood ("finished the bread" removes "the").
fn extract_with_rules(message: &str) -> Vec<Entity> {
    let lowered = message.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let mut entities = Vec::new();

    for (i, word) in words.iter().enumerate() {
        if !ADD_TRIGGERS.contains(word) {
            continue;
        }

        let (Some(count), Some(item)) = (words.get(i + 1), words.get(i + 2)) else {
            continue;
        };
        let Ok(quantity) = count.parse::<u32>() else {
            continue;
        };

        let item = strip_trailing_punctuation(item);
        if quantity > 0 && !item.is_empty() {
            entities.push(Entity::add(item, quantity));
        }
    }

    for (i, word) in words.iter().enumerate() {
        if !REMOVE_TRIGGERS.contains(word) {
            continue;
        }

        if let Some(next) = words.get(i + 1) {
            let item = strip_trailing_punctuation(next);
            if !item.is_empty() {
                entities.push(Entity::remove(item, 0));
            }
        }
    }

    entities
}

fn strip_trailing_punctuation(word: &str) -> &str {
    word.trim_end_matches(|c: char| c.is_ascii_punctuation())
}
