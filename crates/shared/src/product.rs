use serde::{Deserialize, Serialize};

/// A retailer catalogue entry. Only `product_id` matters to the assistant;
/// the rest is carried for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub product_id: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub size: Option<String>,
}
