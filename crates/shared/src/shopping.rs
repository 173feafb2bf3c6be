use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub needed: u32,
}

impl ShoppingListItem {
    pub fn new(name: impl Into<String>, needed: u32) -> Self {
        Self {
            name: name.into(),
            needed,
        }
    }
}
