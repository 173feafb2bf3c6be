use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CheckPantry,
    UpdatePantry,
    RequestMealPlan,
    AddToCart,
    #[default]
    Clarification,
}

impl Intent {
    /// Parses a label such as `" Update_Pantry\n"` into an intent.
    ///
    /// Anything other than one of the five labels, after trimming, is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_is_case_insensitive_and_trimmed() {
        assert_eq!(Intent::from_label("update_pantry"), Some(Intent::UpdatePantry));
        assert_eq!(Intent::from_label("  ADD_TO_CART\n"), Some(Intent::AddToCart));
        assert_eq!(Intent::from_label("Check_Pantry"), Some(Intent::CheckPantry));
    }

    #[test]
    fn test_from_label_rejects_unknown() {
        assert_eq!(Intent::from_label("invalid_intent"), None);
        assert_eq!(Intent::from_label("update pantry"), None);
        assert_eq!(Intent::from_label(""), None);
    }

    #[test]
    fn test_display_matches_wire_name() {
        for intent in Intent::VARIANTS {
            let json = serde_json::to_string(intent).unwrap();
            assert_eq!(json, format!("\"{}\"", intent));
        }
    }
}
