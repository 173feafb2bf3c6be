use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Add,
    Remove,
}

/// A single pantry instruction parsed out of a user message.
///
/// `quantity == 0` together with [`Action::Remove`] means the item is gone
/// entirely, whatever amount was stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub item: String,
    pub quantity: u32,
    pub action: Action,
}

impl Entity {
    pub fn add(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
            action: Action::Add,
        }
    }

    pub fn remove(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
            action: Action::Remove,
        }
    }
}
