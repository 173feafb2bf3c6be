mod common;

use common::setup_test_db;
use grocer_assistant::SessionStore;
use grocer_genie::session::SqliteSessionStore;
use grocer_shared::{
    Intent, MealPlan, Pantry, PlannedIngredient, PlannedRecipe, SessionState, ShoppingListItem,
    UserPreferences,
};

#[tokio::test]
async fn test_unknown_session_loads_default() {
    let store = SqliteSessionStore::new(setup_test_db().await);

    assert_eq!(store.load("nobody").await.unwrap(), SessionState::default());
}

#[tokio::test]
async fn test_session_round_trip_and_overwrite() {
    let pool = setup_test_db().await;
    let store = SqliteSessionStore::new(pool.clone());

    let mut state = SessionState {
        pantry: Pantry::from([("egg".to_string(), 6)]),
        current_meal_plan: Some(MealPlan::Planned(vec![PlannedRecipe {
            name: "Omelette".to_owned(),
            ingredients: vec![PlannedIngredient::new("chives", false, Some("spring onion".to_owned()))],
            instructions: "Whisk and fry.".to_owned(),
            cooking_time: "10 minutes".to_owned(),
            tips: None,
        }])),
        current_shopping_list: vec![ShoppingListItem::new("chives", 1)],
        user_preferences: UserPreferences {
            zip_code: Some("90210".to_owned()),
        },
        pending_intent: Some(Intent::AddToCart),
    };

    store.save("s1", &state).await.unwrap();
    assert_eq!(store.load("s1").await.unwrap(), state);

    state.pending_intent = None;
    store.save("s1", &state).await.unwrap();
    assert_eq!(store.load("s1").await.unwrap(), state);

    let rows: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows.0, 1);
}

#[tokio::test]
async fn test_corrupt_state_is_an_error() {
    let pool = setup_test_db().await;
    sqlx::query("INSERT INTO sessions (id, state, updated_at) VALUES ('bad', 'not json', 0)")
        .execute(&pool)
        .await
        .unwrap();

    let store = SqliteSessionStore::new(pool);

    assert!(store.load("bad").await.is_err());
}
