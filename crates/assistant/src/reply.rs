use grocer_shared::{MealPlan, ShoppingListItem};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Text,
    MealPlan,
}

/// Response to one user message
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "type")]
    pub kind: ReplyKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<MealPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_list: Option<Vec<ShoppingListItem>>,
}

impl Reply {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            message: message.into(),
            meal_plan: None,
            shopping_list: None,
        }
    }

    pub fn meal_plan(
        message: impl Into<String>,
        meal_plan: MealPlan,
        shopping_list: Vec<ShoppingListItem>,
    ) -> Self {
        Self {
            kind: ReplyKind::MealPlan,
            message: message.into(),
            meal_plan: Some(meal_plan),
            shopping_list: Some(shopping_list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_reply_wire_format() {
        let json = serde_json::to_value(Reply::text("hello")).unwrap();

        assert_eq!(json, serde_json::json!({"type": "text", "message": "hello"}));
    }

    #[test]
    fn test_meal_plan_reply_wire_format() {
        let reply = Reply::meal_plan(
            "Here's your meal plan with 0 recipes!",
            MealPlan::Planned(vec![]),
            vec![ShoppingListItem::new("rice", 1)],
        );

        let json = serde_json::to_value(reply).unwrap();

        assert_eq!(json["type"], "meal_plan");
        assert_eq!(json["meal_plan"]["source"], "planned");
        assert_eq!(json["shopping_list"][0]["needed"], 1);
    }
}
