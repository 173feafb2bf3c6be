mod entity;
mod intent;
mod product;
mod recipe;
mod session;
mod shopping;

use std::collections::BTreeMap;

pub use entity::*;
pub use intent::*;
pub use product::*;
pub use recipe::*;
pub use session::*;
pub use shopping::*;

/// Ingredient name to quantity on hand. Keys are stored the way the user
/// (or the extractor) named them; values are always strictly positive.
pub type Pantry = BTreeMap<String, u32>;
