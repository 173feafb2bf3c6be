mod cuisine;
mod planner;
mod templates;

pub use cuisine::*;
pub use planner::*;
pub use templates::fallback_plan;

/// Upper bound on recipes in one plan
pub const MAX_RECIPES: usize = 3;
