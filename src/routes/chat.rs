use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use grocer_assistant::Reply;
use serde::Deserialize;
use serde_json::json;
use ulid::Ulid;

use crate::error::AppError;
use crate::routes::AppState;

pub const SESSION_COOKIE: &str = "grocer_session";

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ChatInput {
    pub message: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ZipCodeInput {
    pub zipcode: String,
}

/// Session id from the cookie, or a fresh one added to the jar
fn session(jar: CookieJar) -> (CookieJar, String) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let id = cookie.value().to_owned();
        return (jar, id);
    }

    let id = Ulid::new().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    (jar.add(cookie), id)
}

/// POST /chat-with-agent
pub async fn chat_with_agent(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<ChatInput>,
) -> Result<(CookieJar, Json<Reply>), AppError> {
    let (jar, session_id) = session(jar);

    let reply = state
        .assistant
        .handle_message(&session_id, &input.message)
        .await?;

    Ok((jar, Json(reply)))
}

/// POST /set-zipcode
pub async fn set_zipcode(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<ZipCodeInput>,
) -> Result<impl IntoResponse, AppError> {
    let zipcode = input.zipcode.trim();
    if zipcode.is_empty() {
        return Err(AppError::ValidationError("zipcode is required".to_string()));
    }

    let (jar, session_id) = session(jar);
    state.assistant.set_zip_code(&session_id, zipcode).await?;

    Ok((
        jar,
        Json(json!({ "message": format!("Zip code set to {zipcode}") })),
    ))
}
