use std::time::Duration;

use async_trait::async_trait;
use grocer_shared::Product;
use serde::{Deserialize, Serialize};

use crate::{CartOutcome, Retailer, RetailerError};

const PRODUCT_SEARCH_LIMIT: &str = "5";

#[derive(Debug, Clone)]
pub struct KrogerConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
}

/// Kroger public API client. The bearer token is supplied by configuration;
/// obtaining and refreshing it happens elsewhere.
#[derive(Debug, Clone)]
pub struct KrogerClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

#[derive(Deserialize)]
struct DataResponse<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    location_id: String,
}

#[derive(Serialize)]
struct CartRequest<'a> {
    items: Vec<CartItem<'a>>,
}

#[derive(Serialize)]
struct CartItem<'a> {
    upc: &'a str,
    quantity: u32,
}

impl KrogerClient {
    pub fn new(config: KrogerConfig) -> Result<Self, RetailerError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            access_token: config.access_token,
        })
    }

    async fn get_data<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, RetailerError> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RetailerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: DataResponse<T> = response.json().await?;
        Ok(body.data)
    }
}

#[async_trait]
impl Retailer for KrogerClient {
    #[tracing::instrument(skip(self))]
    async fn find_store(&self, zip_code: &str) -> Option<String> {
        let query = [("filter.zipCode.near", zip_code), ("filter.limit", "1")];

        match self.get_data::<Location>("/locations", &query).await {
            Ok(locations) => locations.into_iter().next().map(|l| l.location_id),
            Err(err) => {
                tracing::error!(err = %err, "failed to find Kroger location");
                None
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn search_products(&self, term: &str, store_id: Option<&str>) -> Vec<Product> {
        let mut query = vec![("filter.term", term), ("filter.limit", PRODUCT_SEARCH_LIMIT)];
        if let Some(store_id) = store_id {
            query.push(("filter.locationId", store_id));
        }

        match self.get_data::<Product>("/products", &query).await {
            Ok(products) => products,
            Err(err) => {
                tracing::error!(err = %err, "failed to search Kroger products");
                Vec::new()
            }
        }
    }

    #[tracing::instrument(skip(self), fields(items = product_ids.len()))]
    async fn add_to_cart(&self, product_ids: &[String]) -> CartOutcome {
        let request = CartRequest {
            items: product_ids
                .iter()
                .map(|id| CartItem {
                    upc: id,
                    quantity: 1,
                })
                .collect(),
        };

        let response = match self
            .client
            .put(format!("{}/cart/add", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(err = %err, "failed to add items to Kroger cart");
                return CartOutcome::failed(format!("Error adding items to cart: {err}"));
            }
        };

        let status = response.status();
        if matches!(status.as_u16(), 200 | 204) {
            return CartOutcome::ok("Items successfully added to cart");
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), body = %body, "Kroger cart API error");

        CartOutcome::failed(format!("Failed to add items to cart: {}", status.as_u16()))
    }
}
