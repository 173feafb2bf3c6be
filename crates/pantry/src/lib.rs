pub mod extract;
pub mod ledger;
pub mod normalize;
pub mod store;

pub use extract::EntityExtractor;
pub use ledger::apply;
pub use normalize::{available, normalize};
pub use store::{JsonFilePantryStore, MemoryPantryStore, PantryStore, PantryStoreError};
