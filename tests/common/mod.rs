#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use grocer_assistant::Assistant;
use grocer_genie::routes::{AppState, router};
use grocer_genie::session::SqliteSessionStore;
use grocer_kroger::{CartOutcome, Retailer};
use grocer_llm::DisabledModel;
use grocer_pantry::MemoryPantryStore;
use grocer_recipe::RecipeSource;
use grocer_shared::{Pantry, Product, Recipe};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

/// Retailer answering searches from a fixed term -> product id table
#[derive(Default)]
pub struct StubRetailer {
    pub catalogue: HashMap<String, String>,
    pub carts: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl Retailer for StubRetailer {
    async fn find_store(&self, zip_code: &str) -> Option<String> {
        Some(format!("store-{zip_code}"))
    }

    async fn search_products(&self, term: &str, _store_id: Option<&str>) -> Vec<Product> {
        self.catalogue
            .get(term)
            .map(|id| {
                vec![Product {
                    product_id: Some(id.clone()),
                    ..Default::default()
                }]
            })
            .unwrap_or_default()
    }

    async fn add_to_cart(&self, product_ids: &[String]) -> CartOutcome {
        self.carts.lock().unwrap().push(product_ids.to_vec());
        CartOutcome::ok("Items successfully added to cart")
    }
}

pub struct NoRecipes;

#[async_trait]
impl RecipeSource for NoRecipes {
    async fn fetch_recipes(&self, _cuisine: Option<&str>, _count: usize) -> Vec<Recipe> {
        Vec::new()
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub pantry: Arc<MemoryPantryStore>,
    pub retailer: Arc<StubRetailer>,
}

pub async fn create_test_app(pantry: Pantry, retailer: StubRetailer) -> TestApp {
    let pool = setup_test_db().await;
    let pantry = Arc::new(MemoryPantryStore::new(pantry));
    let retailer = Arc::new(retailer);

    let assistant = Assistant::new(
        Arc::new(DisabledModel),
        Arc::new(NoRecipes),
        retailer.clone(),
        pantry.clone(),
        Arc::new(SqliteSessionStore::new(pool.clone())),
    );

    let router = router(AppState {
        assistant: Arc::new(assistant),
        pool: pool.clone(),
    });

    TestApp {
        router,
        pool,
        pantry,
        retailer,
    }
}
