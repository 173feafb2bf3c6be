mod client;
mod error;

use async_trait::async_trait;
use grocer_shared::Product;

pub use client::*;
pub use error::*;

/// Result of a cart submission, with a message fit to show the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartOutcome {
    pub ok: bool,
    pub message: String,
}

impl CartOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Grocery retailer with a store locator, a product search and a cart.
///
/// Failures are logged by the implementation and degrade to "nothing found"
/// or a failed [`CartOutcome`]; they are never returned as errors.
#[async_trait]
pub trait Retailer: Send + Sync {
    async fn find_store(&self, zip_code: &str) -> Option<String>;

    async fn search_products(&self, term: &str, store_id: Option<&str>) -> Vec<Product>;

    async fn add_to_cart(&self, product_ids: &[String]) -> CartOutcome;
}
