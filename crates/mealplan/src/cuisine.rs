use strum::{AsRefStr, Display, VariantArray};

/// Cuisines the assistant recognises in a meal-plan request
#[derive(Display, AsRefStr, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cuisine {
    Italian,
    Mexican,
    Chinese,
}

impl Cuisine {
    /// First cuisine named anywhere in the message, checked in declaration
    /// order, so "italian or mexican" is Italian.
    pub fn detect(message: &str) -> Option<Self> {
        let lowered = message.to_lowercase();

        Self::VARIANTS
            .iter()
            .copied()
            .find(|cuisine| lowered.contains(&cuisine.as_ref().to_lowercase()))
    }
}
