mod builder;

pub use builder::ShoppingListBuilder;
