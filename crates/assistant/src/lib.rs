mod assistant;
mod error;
pub mod intent;
mod reply;
mod session;

pub use assistant::*;
pub use error::*;
pub use intent::{IntentClassifier, classify_by_keywords, find_zip_code};
pub use reply::*;
pub use session::*;
